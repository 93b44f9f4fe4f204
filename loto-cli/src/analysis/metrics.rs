use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use loto_db::models::DrawRecord;
use loto_db::window::AnalysisWindow;

/// Mesures de structure d'un tirage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawMetrics {
    pub draw_id: i64,
    pub sum: u64,
    pub even_count: usize,
    pub average_gap: f64,
    pub repeat_count: usize,
}

/// Nombre de cellules paires. Un zéro de remplissage compte comme pair.
pub fn even_count(numbers: &[u32]) -> usize {
    numbers.iter().filter(|&&n| n % 2 == 0).count()
}

/// Écart moyen entre numéros consécutifs (triés, zéros exclus). 0 s'il en reste moins de 2.
pub fn average_gap(numbers: &[u32]) -> f64 {
    let mut sorted: Vec<u32> = numbers.iter().copied().filter(|&n| n > 0).collect();
    if sorted.len() < 2 {
        return 0.0;
    }
    sorted.sort_unstable();
    let gaps: Vec<u32> = sorted.windows(2).map(|w| w[1] - w[0]).collect();
    gaps.iter().sum::<u32>() as f64 / gaps.len() as f64
}

/// Nombre de numéros communs aux deux ensembles de cellules.
pub fn shared_count(a: &[u32], b: &[u32]) -> usize {
    let a: BTreeSet<u32> = a.iter().copied().collect();
    let b: BTreeSet<u32> = b.iter().copied().collect();
    a.intersection(&b).count()
}

/// Somme des cellules en `u64` : une cellule corrompue peut valoir jusqu'à `u32::MAX`.
pub fn cell_sum(numbers: &[u32]) -> u64 {
    numbers.iter().map(|&n| u64::from(n)).sum()
}

pub fn draw_metrics(record: &DrawRecord, predecessor: Option<&DrawRecord>) -> DrawMetrics {
    DrawMetrics {
        draw_id: record.draw_id,
        sum: cell_sum(&record.numbers),
        even_count: even_count(&record.numbers),
        average_gap: average_gap(&record.numbers),
        // sans prédécesseur connu : ensemble vide
        repeat_count: predecessor
            .map(|prev| shared_count(&record.numbers, &prev.numbers))
            .unwrap_or(0),
    }
}

/// Mesures de chaque tirage de la fenêtre, du plus récent au plus ancien.
pub fn compute_metrics(window: &AnalysisWindow<'_>) -> Vec<DrawMetrics> {
    if !window.is_empty() && !window.has_trailing_record() {
        log::warn!(
            "Aucun tirage au-delà de la fenêtre : répétitions du tirage {} comptées à 0",
            window.records()[window.len() - 1].draw_id
        );
    }
    window
        .iter()
        .enumerate()
        .map(|(i, record)| draw_metrics(record, window.predecessor(i)))
        .collect()
}

/// Histogramme valeur → nombre de tirages, clés croissantes.
pub fn distribution<I: IntoIterator<Item = usize>>(values: I) -> BTreeMap<usize, usize> {
    let mut dist = BTreeMap::new();
    for v in values {
        *dist.entry(v).or_insert(0) += 1;
    }
    dist
}

pub fn even_distribution(metrics: &[DrawMetrics]) -> BTreeMap<usize, usize> {
    distribution(metrics.iter().map(|m| m.even_count))
}

pub fn repeat_distribution(metrics: &[DrawMetrics]) -> BTreeMap<usize, usize> {
    distribution(metrics.iter().map(|m| m.repeat_count))
}

/// Résumé des sommes par rapport à la zone cible.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SumSummary {
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub in_range: usize,
    pub in_range_share: f64,
}

pub fn sum_summary(metrics: &[DrawMetrics], min: u32, max: u32) -> Option<SumSummary> {
    if metrics.is_empty() {
        return None;
    }
    let (min, max) = (u64::from(min), u64::from(max));
    let sums: Vec<u64> = metrics.iter().map(|m| m.sum).collect();
    let in_range = sums.iter().filter(|&&s| min <= s && s <= max).count();
    Some(SumSummary {
        min: sums.iter().copied().min().unwrap_or(0),
        max: sums.iter().copied().max().unwrap_or(0),
        mean: sums.iter().map(|&s| s as f64).sum::<f64>() / sums.len() as f64,
        in_range,
        in_range_share: in_range as f64 / sums.len() as f64,
    })
}
