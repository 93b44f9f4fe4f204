pub mod frequency;
pub mod matcher;
pub mod metrics;
pub mod sampler;
pub mod summary;

use std::collections::BTreeMap;

use rand::Rng;
use serde::Serialize;

use loto_db::models::{Combination, DrawRecord};
use loto_db::store::RecordStore;

use crate::config::AnalysisConfig;
use self::frequency::{FrequencyTable, primary_frequency, supplementary_frequency};
use self::matcher::{MatchResult, check};
use self::metrics::{
    DrawMetrics, SumSummary, compute_metrics, even_distribution, repeat_distribution, sum_summary,
};
use self::sampler::Recommender;
use self::summary::{WinnerPoint, WinnerSummary, winner_summary, winner_trend};

#[derive(Debug, Clone, Serialize)]
pub struct CheckedCombination {
    pub combination: Combination,
    pub result: MatchResult,
}

/// Tous les résultats d'une analyse.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub total_draws: usize,
    pub window_size: usize,
    pub winners: WinnerSummary,
    pub hottest_number: Option<(u32, u32)>,
    pub top_supplementary: Option<(u32, u32)>,
    pub primary_frequency: FrequencyTable,
    pub supplementary_frequency: FrequencyTable,
    pub metrics: Vec<DrawMetrics>,
    pub even_distribution: BTreeMap<usize, usize>,
    pub repeat_distribution: BTreeMap<usize, usize>,
    pub sums: Option<SumSummary>,
    pub winner_trend: Vec<WinnerPoint>,
    pub window_records: Vec<DrawRecord>,
    pub checked: Option<CheckedCombination>,
    pub recommendations: Vec<Combination>,
}

/// Chaîne complète : fenêtre → fréquences et mesures → vérification et suggestions.
pub fn run_analysis<R: Rng + ?Sized>(
    store: &RecordStore,
    config: &AnalysisConfig,
    combination: Option<&Combination>,
    rng: &mut R,
) -> AnalysisReport {
    let window = store.window(config.window_size);
    if window.is_empty() {
        log::warn!("Historique vide : aucune statistique disponible");
    }
    log::info!(
        "Analyse de {} tirages sur {} disponibles",
        window.len(),
        store.len()
    );

    let primary = primary_frequency(&window);
    let supplementary = supplementary_frequency(&window);
    let metrics = compute_metrics(&window);

    let checked = combination.map(|c| CheckedCombination {
        combination: c.clone(),
        result: check(store, c, &config.rules),
    });

    let recommendations = Recommender::from_config(config).recommend(
        &primary,
        &supplementary,
        config.recommender.count,
        rng,
    );

    AnalysisReport {
        total_draws: store.len(),
        window_size: window.len(),
        winners: winner_summary(&window),
        hottest_number: primary.most_common(),
        top_supplementary: supplementary.most_common(),
        even_distribution: even_distribution(&metrics),
        repeat_distribution: repeat_distribution(&metrics),
        sums: sum_summary(&metrics, config.rules.sum_range.min, config.rules.sum_range.max),
        winner_trend: winner_trend(&window),
        window_records: window.records().to_vec(),
        primary_frequency: primary,
        supplementary_frequency: supplementary,
        metrics,
        checked,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loto_db::models::{PRIMARY_RANGE, SUPPLEMENTARY_RANGE, make_test_records};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_run_analysis_full() {
        let store = RecordStore::new(make_test_records(80));
        let config = AnalysisConfig::default();
        let combo = Combination::new(&[1, 2, 3, 4, 5, 6], 1, PRIMARY_RANGE, SUPPLEMENTARY_RANGE).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let report = run_analysis(&store, &config, Some(&combo), &mut rng);

        assert_eq!(report.total_draws, 80);
        assert_eq!(report.window_size, 50);
        assert_eq!(report.metrics.len(), 50);
        assert_eq!(report.window_records.len(), 50);
        assert_eq!(report.winner_trend.len(), 50);
        assert_eq!(report.recommendations.len(), 10);
        assert_eq!(report.primary_frequency.total(), 300);
        assert_eq!(report.even_distribution.values().sum::<usize>(), 50);
        assert_eq!(report.repeat_distribution.values().sum::<usize>(), 50);

        // 50 tirages, blocs de 6 cycliques : 1..6 apparaît dans les tirages 0, 6, ..., 48
        assert_eq!(report.hottest_number, Some((1, 9)));
        let checked = report.checked.unwrap();
        assert_eq!(checked.result.matched_draw, Some(1000));
        assert_eq!(checked.result.repeat_with_last, 6);
    }

    #[test]
    fn test_run_analysis_empty_store() {
        let store = RecordStore::default();
        let combo = Combination::new(&[1, 2, 3, 4, 5, 6], 1, PRIMARY_RANGE, SUPPLEMENTARY_RANGE).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let report = run_analysis(&store, &AnalysisConfig::default(), Some(&combo), &mut rng);

        assert_eq!(report.window_size, 0);
        assert_eq!(report.hottest_number, None);
        assert_eq!(report.top_supplementary, None);
        assert!(report.metrics.is_empty());
        assert!(report.sums.is_none());
        assert_eq!(report.checked.unwrap().result.matched_draw, None);
        assert_eq!(report.recommendations.len(), 10);
    }

    #[test]
    fn test_report_serializes() {
        let store = RecordStore::new(make_test_records(5));
        let mut rng = StdRng::seed_from_u64(5);
        let report = run_analysis(&store, &AnalysisConfig::default(), None, &mut rng);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["window_size"], 5);
        assert!(json["checked"].is_null());
        assert_eq!(json["recommendations"].as_array().unwrap().len(), 10);
    }
}
