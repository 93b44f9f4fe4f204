use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use loto_db::models::{Combination, NumberRange, PRIMARY_COUNT};

use super::frequency::FrequencyTable;
use crate::config::AnalysisConfig;

/// Générateur de grilles biaisé vers les numéros chauds.
#[derive(Debug, Clone)]
pub struct Recommender {
    pub hot_pool_size: usize,
    pub hot_picks: usize,
    pub primary_range: NumberRange,
    pub supplementary_range: NumberRange,
}

impl Default for Recommender {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl Recommender {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            hot_pool_size: config.recommender.hot_pool_size,
            hot_picks: config.recommender.hot_picks,
            primary_range: config.primary_range,
            supplementary_range: config.supplementary_range,
        }
    }

    /// Les numéros les plus fréquents de la plage jouable.
    pub fn hot_pool(&self, primary: &FrequencyTable) -> Vec<u32> {
        primary
            .most_common_n(primary.len())
            .into_iter()
            .map(|(n, _)| n)
            .filter(|&n| self.primary_range.contains(n))
            .take(self.hot_pool_size)
            .collect()
    }

    /// `count` grilles indépendantes ; deux grilles identiques restent possibles.
    pub fn recommend<R: Rng + ?Sized>(
        &self,
        primary: &FrequencyTable,
        supplementary: &FrequencyTable,
        count: usize,
        rng: &mut R,
    ) -> Vec<Combination> {
        let hot_pool = self.hot_pool(primary);
        let supplementary_pool: Vec<u32> = supplementary
            .numbers()
            .into_iter()
            .filter(|&n| self.supplementary_range.contains(n))
            .collect();
        let full_range: Vec<u32> = self.primary_range.iter().collect();

        let mut combinations = Vec::with_capacity(count);
        for _ in 0..count {
            let numbers = self.draw_numbers(&hot_pool, &full_range, rng);
            let supplementary = match supplementary_pool.choose(rng) {
                Some(&n) => n,
                None => rng.random_range(self.supplementary_range.iter()),
            };
            combinations.push(Combination {
                numbers,
                supplementary,
            });
        }
        combinations
    }

    fn draw_numbers<R: Rng + ?Sized>(
        &self,
        hot_pool: &[u32],
        full_range: &[u32],
        rng: &mut R,
    ) -> [u32; PRIMARY_COUNT] {
        // pool chaud trop petit : on tire les numéros « chauds » dans toute la plage
        let source = if hot_pool.len() >= self.hot_picks {
            hot_pool
        } else {
            full_range
        };
        let mut picked: Vec<u32> = source.choose_multiple(rng, self.hot_picks).copied().collect();

        let others: Vec<u32> = full_range
            .iter()
            .copied()
            .filter(|n| !picked.contains(n))
            .collect();
        picked.extend(others.choose_multiple(rng, PRIMARY_COUNT - self.hot_picks).copied());

        picked.sort_unstable();
        let mut numbers = [0u32; PRIMARY_COUNT];
        numbers.copy_from_slice(&picked);
        numbers
    }
}

/// Graine fixe pour la reproductibilité, sinon entropie du système.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

pub fn generate_suggestions(
    recommender: &Recommender,
    primary: &FrequencyTable,
    supplementary: &FrequencyTable,
    count: usize,
    seed: Option<u64>,
) -> Vec<Combination> {
    recommender.recommend(primary, supplementary, count, &mut make_rng(seed))
}
