use std::collections::HashMap;

use serde::Serialize;

use loto_db::models::Pool;
use loto_db::window::AnalysisWindow;

/// Nombre d'apparitions par numéro, dans l'ordre de première rencontre.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FrequencyTable {
    entries: Vec<(u32, u32)>,
    #[serde(skip)]
    index: HashMap<u32, usize>,
}

impl FrequencyTable {
    pub fn from_numbers<I: IntoIterator<Item = u32>>(numbers: I) -> Self {
        let mut table = Self::default();
        for n in numbers {
            table.add(n);
        }
        table
    }

    fn add(&mut self, number: u32) {
        match self.index.get(&number) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(number, self.entries.len());
                self.entries.push((number, 1));
            }
        }
    }

    #[cfg(test)]
    pub fn count(&self, number: u32) -> u32 {
        self.index
            .get(&number)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nombre total d'apparitions comptées.
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|&(_, c)| c).sum()
    }

    /// Numéros observés, dans l'ordre de première rencontre.
    pub fn numbers(&self) -> Vec<u32> {
        self.entries.iter().map(|&(n, _)| n).collect()
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[(u32, u32)] {
        &self.entries
    }

    /// Numéro le plus fréquent. En cas d'égalité, le premier rencontré l'emporte.
    pub fn most_common(&self) -> Option<(u32, u32)> {
        self.most_common_n(1).first().copied()
    }

    /// Les `k` numéros les plus fréquents, égalités départagées par ordre de rencontre.
    pub fn most_common_n(&self, k: usize) -> Vec<(u32, u32)> {
        let mut sorted = self.entries.clone();
        // tri stable : l'ordre de rencontre est préservé à compte égal
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(k);
        sorted
    }

    pub fn sorted_by_number(&self) -> Vec<(u32, u32)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(|&(n, _)| n);
        sorted
    }
}

/// Compte les numéros du pool sur la fenêtre, tirage par tirage, colonne par colonne.
/// Les zéros (cellules vides ou illisibles) sont ignorés.
pub fn pool_frequency(window: &AnalysisWindow<'_>, pool: Pool) -> FrequencyTable {
    FrequencyTable::from_numbers(
        window
            .iter()
            .flat_map(|record| pool.numbers_from(record).iter().copied())
            .filter(|&n| n > 0),
    )
}

pub fn primary_frequency(window: &AnalysisWindow<'_>) -> FrequencyTable {
    pool_frequency(window, Pool::Primary)
}

pub fn supplementary_frequency(window: &AnalysisWindow<'_>) -> FrequencyTable {
    pool_frequency(window, Pool::Supplementary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loto_db::models::{DrawRecord, make_test_records};
    use loto_db::store::RecordStore;

    fn record(numbers: [u32; 6], supplementary: u32) -> DrawRecord {
        DrawRecord {
            draw_id: 1,
            date: String::new(),
            numbers,
            supplementary,
            primary_winners: 0,
            secondary_winners: 0,
        }
    }

    #[test]
    fn test_primary_frequency_counts() {
        let store = RecordStore::new(vec![
            record([1, 2, 3, 4, 5, 6], 1),
            record([1, 2, 3, 7, 8, 9], 1),
            record([1, 10, 11, 12, 13, 14], 2),
        ]);
        let table = primary_frequency(&store.window(50));
        assert_eq!(table.count(1), 3);
        assert_eq!(table.count(2), 2);
        assert_eq!(table.count(14), 1);
        assert_eq!(table.count(37), 0);
        assert_eq!(table.total(), 18);
        assert_eq!(table.most_common(), Some((1, 3)));
    }

    #[test]
    fn test_frequency_ignores_zeros() {
        let store = RecordStore::new(vec![record([0, 0, 3, 4, 5, 6], 0)]);
        let window = store.window(50);
        let table = primary_frequency(&window);
        assert_eq!(table.count(0), 0);
        assert_eq!(table.len(), 4);
        assert!(supplementary_frequency(&window).is_empty());
    }

    #[test]
    fn test_frequency_limited_to_window() {
        let store = RecordStore::new(make_test_records(10));
        let table = supplementary_frequency(&store.window(3));
        assert_eq!(table.total(), 3);
        assert_eq!(table.numbers(), vec![1, 2, 3]);
    }

    #[test]
    fn test_most_common_tie_first_encountered() {
        let table = FrequencyTable::from_numbers([9, 4, 4, 9, 2]);
        assert_eq!(table.most_common(), Some((9, 2)));

        let table = FrequencyTable::from_numbers([30, 5, 5, 30]);
        assert_eq!(table.most_common(), Some((30, 2)));
    }

    #[test]
    fn test_most_common_is_maximal() {
        let table = FrequencyTable::from_numbers([3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5]);
        let (_, best) = table.most_common().unwrap();
        assert!(table.entries().iter().all(|&(_, c)| best >= c));
        assert_eq!(table.most_common(), Some((5, 3)));
    }

    #[test]
    fn test_most_common_n_stable() {
        let table = FrequencyTable::from_numbers([7, 3, 3, 8, 1, 1]);
        assert_eq!(table.most_common_n(3), vec![(3, 2), (1, 2), (7, 1)]);
        assert_eq!(table.most_common_n(10).len(), 4);
    }

    #[test]
    fn test_empty_table() {
        let store = RecordStore::default();
        let window = store.window(50);
        assert_eq!(primary_frequency(&window).most_common(), None);
        assert_eq!(supplementary_frequency(&window).most_common(), None);
        assert!(primary_frequency(&window).most_common_n(12).is_empty());
    }

    #[test]
    fn test_sorted_by_number() {
        let table = FrequencyTable::from_numbers([12, 3, 7, 3]);
        assert_eq!(table.sorted_by_number(), vec![(3, 2), (7, 1), (12, 1)]);
    }
}
