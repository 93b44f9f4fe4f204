use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use loto_db::encoding::DEFAULT_ENCODING;
use loto_db::models::{NumberRange, PRIMARY_COUNT, PRIMARY_RANGE, SUPPLEMENTARY_RANGE};
use loto_db::store::ColumnSchema;

/// Critères d'équilibre d'une grille.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceRules {
    pub sum_range: NumberRange,
    pub balanced_even_counts: Vec<usize>,
}

impl Default for BalanceRules {
    fn default() -> Self {
        Self {
            sum_range: NumberRange::new(100, 170),
            balanced_even_counts: vec![2, 3, 4],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    pub count: usize,
    pub hot_pool_size: usize,
    pub hot_picks: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            count: 10,
            hot_pool_size: 12,
            hot_picks: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub window_size: usize,
    pub primary_range: NumberRange,
    pub supplementary_range: NumberRange,
    pub encoding: String,
    pub columns: ColumnSchema,
    pub rules: BalanceRules,
    pub recommender: RecommenderConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_size: 50,
            primary_range: PRIMARY_RANGE,
            supplementary_range: SUPPLEMENTARY_RANGE,
            encoding: DEFAULT_ENCODING.to_string(),
            columns: ColumnSchema::default(),
            rules: BalanceRules::default(),
            recommender: RecommenderConfig::default(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Plage principale {range} trop petite pour {} numéros", PRIMARY_COUNT)]
    PrimaryRangeTooSmall { range: NumberRange },
    #[error("Plage du numéro fort vide ({0})")]
    EmptySupplementaryRange(NumberRange),
    #[error("hot_picks = {0} dépasse {}", PRIMARY_COUNT)]
    TooManyHotPicks(usize),
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.primary_range.size() < PRIMARY_COUNT {
            return Err(ConfigError::PrimaryRangeTooSmall {
                range: self.primary_range,
            });
        }
        if self.supplementary_range.is_empty() {
            return Err(ConfigError::EmptySupplementaryRange(self.supplementary_range));
        }
        if self.recommender.hot_picks > PRIMARY_COUNT {
            return Err(ConfigError::TooManyHotPicks(self.recommender.hot_picks));
        }
        Ok(())
    }
}

/// Charge une configuration JSON ; les champs absents prennent leur valeur par défaut.
pub fn load_config(path: &Path) -> Result<AnalysisConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire la configuration {:?}", path))?;
    let config: AnalysisConfig = serde_json::from_str(&json)
        .with_context(|| format!("Configuration invalide {:?}", path))?;
    config.validate()?;
    Ok(config)
}
