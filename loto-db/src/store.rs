use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::models::{DrawRecord, PRIMARY_COUNT};
use crate::window::AnalysisWindow;

/// Noms des colonnes de l'export officiel. Les espaces autour des noms sont ignorés.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSchema {
    pub draw_id: String,
    pub date: String,
    pub numbers: [String; PRIMARY_COUNT],
    pub supplementary: String,
    pub primary_winners: String,
    pub secondary_winners: String,
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self {
            draw_id: "הגרלה".to_string(),
            date: "תאריך".to_string(),
            numbers: ["1", "2", "3", "4", "5", "6"].map(String::from),
            supplementary: "המספר החזק/נוסף".to_string(),
            primary_winners: "מספר_זוכים_לוטו".to_string(),
            secondary_winners: "מספר_זוכים_דאבל_לוטו".to_string(),
        }
    }
}

/// Position de chaque colonne dans l'en-tête, résolue une seule fois au chargement.
#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    draw_id: usize,
    date: usize,
    numbers: [usize; PRIMARY_COUNT],
    supplementary: usize,
    primary_winners: usize,
    secondary_winners: usize,
}

impl ColumnIndices {
    fn resolve(headers: &csv::StringRecord, schema: &ColumnSchema) -> Result<Self, StoreError> {
        let names: Vec<&str> = headers.iter().map(str::trim).collect();
        let find = |column: &str| -> Result<usize, StoreError> {
            names
                .iter()
                .position(|name| *name == column.trim())
                .ok_or_else(|| StoreError::MissingColumn(column.trim().to_string()))
        };

        let mut numbers = [0usize; PRIMARY_COUNT];
        for (slot, column) in numbers.iter_mut().zip(&schema.numbers) {
            *slot = find(column)?;
        }

        Ok(Self {
            draw_id: find(&schema.draw_id)?,
            date: find(&schema.date)?,
            numbers,
            supplementary: find(&schema.supplementary)?,
            primary_winners: find(&schema.primary_winners)?,
            secondary_winners: find(&schema.secondary_winners)?,
        })
    }
}

/// Convertit une cellule en entier.
///
/// Accepte un entier (`"17"`) ou un décimal fini tronqué vers zéro (`"17.0"`).
/// Toute autre valeur (vide, texte, `NaN`) vaut 0 : les données historiques sont sales
/// et une cellule illisible ne doit jamais faire échouer le chargement.
pub fn coerce_int(raw: &str) -> i64 {
    let s = raw.trim();
    if let Ok(v) = s.parse::<i64>() {
        return v;
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => v.trunc() as i64,
        _ => {
            if !s.is_empty() {
                log::debug!("Valeur non numérique '{}' remplacée par 0", s);
            }
            0
        }
    }
}

/// Comme `coerce_int`, pour les numéros et compteurs : une valeur négative vaut 0.
pub fn coerce_count(raw: &str) -> u32 {
    u32::try_from(coerce_int(raw)).unwrap_or(0)
}

/// Historique complet, du tirage le plus récent au plus ancien. Lecture seule après chargement.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<DrawRecord>,
}

impl RecordStore {
    /// Les enregistrements doivent déjà être triés du plus récent au plus ancien.
    pub fn new(records: Vec<DrawRecord>) -> Self {
        Self { records }
    }

    /// Lit un CSV (déjà décodé) selon le schéma donné.
    ///
    /// Seule une colonne manquante est fatale ; une ligne courte est complétée par des zéros.
    /// L'ordre du fichier est conservé tel quel.
    pub fn load<R: Read>(reader: R, schema: &ColumnSchema) -> Result<Self, StoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(StoreError::EmptyInput);
        }
        let columns = ColumnIndices::resolve(&headers, schema)?;

        let mut records = Vec::new();
        for (i, row) in reader.records().enumerate() {
            let row = row.map_err(|source| StoreError::Row { row: i + 1, source })?;
            records.push(parse_row(&row, &columns));
        }

        log::info!("{} tirages chargés", records.len());
        Ok(Self { records })
    }

    pub fn records(&self) -> &[DrawRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Tirage le plus récent.
    pub fn latest(&self) -> Option<&DrawRecord> {
        self.records.first()
    }

    /// Tirage précédant (plus ancien que) celui d'index `index`.
    pub fn predecessor_of(&self, index: usize) -> Option<&DrawRecord> {
        self.records.get(index + 1)
    }

    /// Les `size` tirages les plus récents (moins si l'historique est plus court).
    pub fn window(&self, size: usize) -> AnalysisWindow<'_> {
        AnalysisWindow::new(self, size.min(self.records.len()))
    }
}

fn parse_row(row: &csv::StringRecord, columns: &ColumnIndices) -> DrawRecord {
    let cell = |idx: usize| row.get(idx).unwrap_or("");

    let mut numbers = [0u32; PRIMARY_COUNT];
    for (slot, &idx) in numbers.iter_mut().zip(&columns.numbers) {
        *slot = coerce_count(cell(idx));
    }

    DrawRecord {
        draw_id: coerce_int(cell(columns.draw_id)),
        date: cell(columns.date).trim().to_string(),
        numbers,
        supplementary: coerce_count(cell(columns.supplementary)),
        primary_winners: coerce_count(cell(columns.primary_winners)),
        secondary_winners: coerce_count(cell(columns.secondary_winners)),
    }
}
