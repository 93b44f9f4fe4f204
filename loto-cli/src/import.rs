use std::path::Path;

use anyhow::{Context, Result};

use loto_db::encoding::decode_text;
use loto_db::store::RecordStore;

use crate::config::AnalysisConfig;

/// Lit l'export CSV, le décode selon l'encodage configuré et construit l'historique.
pub fn import_csv(path: &Path, config: &AnalysisConfig) -> Result<RecordStore> {
    let bytes = std::fs::read(path).with_context(|| format!("Impossible d'ouvrir {:?}", path))?;
    log::info!("{} octets lus depuis {:?}", bytes.len(), path);

    let text = decode_text(&bytes, &config.encoding)
        .with_context(|| format!("Impossible de décoder {:?}", path))?;
    let store = RecordStore::load(text.as_bytes(), &config.columns)
        .with_context(|| format!("Format de fichier invalide : {:?}", path))?;

    if store.is_empty() {
        log::warn!("Aucun tirage dans {:?}", path);
    }
    Ok(store)
}
