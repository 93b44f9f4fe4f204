use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Nombre de numéros principaux par tirage.
pub const PRIMARY_COUNT: usize = 6;

pub const PRIMARY_RANGE: NumberRange = NumberRange::new(1, 37);
pub const SUPPLEMENTARY_RANGE: NumberRange = NumberRange::new(1, 7);

/// Un tirage historique. Les champs numériques illisibles valent 0 (voir `store::coerce_int`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawRecord {
    pub draw_id: i64,
    pub date: String,
    pub numbers: [u32; PRIMARY_COUNT],
    pub supplementary: u32,
    pub primary_winners: u32,
    pub secondary_winners: u32,
}

impl DrawRecord {
    /// Ensemble des numéros principaux, zéros compris.
    pub fn number_set(&self) -> BTreeSet<u32> {
        self.numbers.iter().copied().collect()
    }

    pub fn has_winners(&self) -> bool {
        self.primary_winners > 0 || self.secondary_winners > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Primary,
    Supplementary,
}

impl Pool {
    pub fn numbers_from<'a>(&self, record: &'a DrawRecord) -> &'a [u32] {
        match self {
            Pool::Primary => &record.numbers,
            Pool::Supplementary => std::slice::from_ref(&record.supplementary),
        }
    }
}

/// Plage fermée de numéros jouables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRange {
    pub min: u32,
    pub max: u32,
}

impl NumberRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, n: u32) -> bool {
        self.min <= n && n <= self.max
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    pub fn size(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.max - self.min) as usize + 1
        }
    }

    pub fn iter(&self) -> RangeInclusive<u32> {
        self.min..=self.max
    }
}

impl std::fmt::Display for NumberRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CombinationError {
    #[error("{expected} numéros attendus, {found} reçus")]
    WrongCount { expected: usize, found: usize },
    #[error("Numéro {number} hors limites ({range})")]
    OutOfRange { number: u32, range: NumberRange },
    #[error("Numéro en double : {0}")]
    Duplicate(u32),
    #[error("Numéro fort {number} hors limites ({range})")]
    SupplementaryOutOfRange { number: u32, range: NumberRange },
}

/// Grille de 6 numéros distincts triés plus un numéro fort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Combination {
    pub numbers: [u32; PRIMARY_COUNT],
    pub supplementary: u32,
}

impl Combination {
    /// Valide puis trie les numéros ; l'ordre de saisie est sans importance.
    pub fn new(
        numbers: &[u32],
        supplementary: u32,
        primary_range: NumberRange,
        supplementary_range: NumberRange,
    ) -> Result<Self, CombinationError> {
        validate_combination(numbers, supplementary, primary_range, supplementary_range)?;
        let mut sorted = [0u32; PRIMARY_COUNT];
        sorted.copy_from_slice(numbers);
        sorted.sort_unstable();
        Ok(Self {
            numbers: sorted,
            supplementary,
        })
    }

    pub fn number_set(&self) -> BTreeSet<u32> {
        self.numbers.iter().copied().collect()
    }

    pub fn sum(&self) -> u32 {
        self.numbers.iter().sum()
    }

    pub fn even_count(&self) -> usize {
        self.numbers.iter().filter(|&&n| n % 2 == 0).count()
    }
}

pub fn validate_combination(
    numbers: &[u32],
    supplementary: u32,
    primary_range: NumberRange,
    supplementary_range: NumberRange,
) -> Result<(), CombinationError> {
    if numbers.len() != PRIMARY_COUNT {
        return Err(CombinationError::WrongCount {
            expected: PRIMARY_COUNT,
            found: numbers.len(),
        });
    }
    for &n in numbers {
        if !primary_range.contains(n) {
            return Err(CombinationError::OutOfRange {
                number: n,
                range: primary_range,
            });
        }
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                return Err(CombinationError::Duplicate(numbers[i]));
            }
        }
    }
    if !supplementary_range.contains(supplementary) {
        return Err(CombinationError::SupplementaryOutOfRange {
            number: supplementary,
            range: supplementary_range,
        });
    }
    Ok(())
}

/// Historique synthétique, du plus récent au plus ancien.
pub fn make_test_records(n: usize) -> Vec<DrawRecord> {
    (0..n)
        .map(|i| {
            let base = (i % 6) as u32 * 6;
            DrawRecord {
                draw_id: 1000 - i as i64,
                date: format!("{:02}/01/2024", (i % 28) + 1),
                numbers: [base + 1, base + 2, base + 3, base + 4, base + 5, base + 6],
                supplementary: (i % 7) as u32 + 1,
                primary_winners: if i % 5 == 0 { 1 } else { 0 },
                secondary_winners: if i % 8 == 0 { 2 } else { 0 },
            }
        })
        .collect()
}
