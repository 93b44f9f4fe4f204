use serde::Serialize;

use loto_db::models::Combination;
use loto_db::store::RecordStore;

use super::metrics::shared_count;
use crate::config::BalanceRules;

/// Diagnostic d'une grille soumise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub sum: u32,
    pub sum_in_range: bool,
    pub even_count: usize,
    pub parity_balanced: bool,
    pub repeat_with_last: usize,
    /// Premier tirage (du plus récent au plus ancien) dont les 6 numéros forment le même ensemble.
    pub matched_draw: Option<i64>,
}

impl MatchResult {
    pub fn odd_count(&self) -> usize {
        loto_db::models::PRIMARY_COUNT - self.even_count
    }
}

/// Cherche la grille dans tout l'historique, pas seulement dans la fenêtre.
/// Le numéro fort n'intervient jamais dans la comparaison.
pub fn find_winning_draw(store: &RecordStore, combination: &Combination) -> Option<i64> {
    let target = combination.number_set();
    store
        .records()
        .iter()
        .find(|record| record.number_set() == target)
        .map(|record| record.draw_id)
}

pub fn check(store: &RecordStore, combination: &Combination, rules: &BalanceRules) -> MatchResult {
    let sum = combination.sum();
    let even_count = combination.even_count();
    let repeat_with_last = store
        .latest()
        .map(|last| shared_count(&combination.numbers, &last.numbers))
        .unwrap_or(0);

    MatchResult {
        sum,
        sum_in_range: rules.sum_range.contains(sum),
        even_count,
        parity_balanced: rules.balanced_even_counts.contains(&even_count),
        repeat_with_last,
        matched_draw: find_winning_draw(store, combination),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loto_db::models::{DrawRecord, PRIMARY_RANGE, SUPPLEMENTARY_RANGE, make_test_records};

    fn combo(numbers: &[u32], supplementary: u32) -> Combination {
        Combination::new(numbers, supplementary, PRIMARY_RANGE, SUPPLEMENTARY_RANGE).unwrap()
    }

    fn store_with_winner_at_120() -> RecordStore {
        let mut records: Vec<DrawRecord> = make_test_records(30)
            .into_iter()
            .map(|mut r| {
                // aucun tirage synthétique ne contient {1..6}
                if r.numbers == [1, 2, 3, 4, 5, 6] {
                    r.numbers = [1, 2, 3, 4, 5, 7];
                }
                r
            })
            .collect();
        records[17].draw_id = 120;
        records[17].numbers = [4, 6, 1, 3, 5, 2];
        records[17].supplementary = 5;
        RecordStore::new(records)
    }

    #[test]
    fn test_check_known_winner() {
        let store = store_with_winner_at_120();
        let result = check(&store, &combo(&[1, 2, 3, 4, 5, 6], 1), &BalanceRules::default());
        assert_eq!(result.matched_draw, Some(120));
        assert_eq!(result.sum, 21);
        assert!(!result.sum_in_range);
        assert_eq!(result.even_count, 3);
        assert_eq!(result.odd_count(), 3);
        assert!(result.parity_balanced);
    }

    #[test]
    fn test_check_order_independent() {
        let store = store_with_winner_at_120();
        let rules = BalanceRules::default();
        let a = check(&store, &combo(&[1, 2, 3, 4, 5, 6], 1), &rules);
        let b = check(&store, &combo(&[6, 4, 2, 5, 3, 1], 1), &rules);
        let c = check(&store, &combo(&[3, 1, 6, 2, 5, 4], 7), &rules);
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_check_ignores_supplementary() {
        let mut records = make_test_records(3);
        records[2].numbers = [10, 11, 12, 13, 14, 15];
        records[2].supplementary = 2;
        let store = RecordStore::new(records);
        let result = check(&store, &combo(&[10, 11, 12, 13, 14, 15], 6), &BalanceRules::default());
        assert_eq!(result.matched_draw, Some(store.records()[2].draw_id));
    }

    #[test]
    fn test_check_first_match_wins() {
        let mut records = make_test_records(10);
        records[3].numbers = [20, 21, 22, 23, 24, 25];
        records[8].numbers = [25, 24, 23, 22, 21, 20];
        let store = RecordStore::new(records);
        let result = check(&store, &combo(&[20, 21, 22, 23, 24, 25], 1), &BalanceRules::default());
        assert_eq!(result.matched_draw, Some(997));
    }

    #[test]
    fn test_check_no_match_and_repeats() {
        let store = RecordStore::new(make_test_records(5));
        // dernier tirage : 1..6
        let result = check(&store, &combo(&[1, 2, 20, 25, 30, 35], 1), &BalanceRules::default());
        assert_eq!(result.matched_draw, None);
        assert_eq!(result.repeat_with_last, 2);
        assert_eq!(result.sum, 113);
        assert!(result.sum_in_range);
        assert_eq!(result.even_count, 3);
    }

    #[test]
    fn test_check_sum_bounds_inclusive() {
        let store = RecordStore::default();
        let rules = BalanceRules::default();
        // bornes 100 et 170 incluses
        assert!(check(&store, &combo(&[5, 10, 15, 20, 22, 28], 1), &rules).sum_in_range);
        assert!(check(&store, &combo(&[25, 26, 28, 29, 30, 32], 1), &rules).sum_in_range);
        assert!(!check(&store, &combo(&[25, 26, 28, 29, 30, 33], 1), &rules).sum_in_range);
    }

    #[test]
    fn test_check_parity_unbalanced() {
        let store = RecordStore::default();
        let result = check(&store, &combo(&[1, 3, 5, 7, 9, 11], 1), &BalanceRules::default());
        assert_eq!(result.even_count, 0);
        assert!(!result.parity_balanced);
        let result = check(&store, &combo(&[2, 4, 6, 8, 10, 11], 1), &BalanceRules::default());
        assert_eq!(result.even_count, 5);
        assert!(!result.parity_balanced);
    }

    #[test]
    fn test_check_empty_store() {
        let store = RecordStore::default();
        let result = check(&store, &combo(&[1, 2, 3, 4, 5, 6], 1), &BalanceRules::default());
        assert_eq!(result.matched_draw, None);
        assert_eq!(result.repeat_with_last, 0);
    }
}
