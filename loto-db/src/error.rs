use thiserror::Error;

/// Erreurs de chargement de l'historique.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Colonne attendue absente de l'en-tête
    #[error("Colonne obligatoire absente : '{0}'")]
    MissingColumn(String),

    /// Aucune ligne d'en-tête
    #[error("Fichier vide : aucune ligne d'en-tête")]
    EmptyInput,

    #[error("Encodage inconnu : '{0}'")]
    UnknownEncoding(String),

    /// Octets non représentables dans l'encodage déclaré
    #[error("Contenu invalide pour l'encodage {encoding}")]
    Encoding { encoding: &'static str },

    #[error("Erreur CSV à la ligne {row} : {source}")]
    Row {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("Erreur CSV : {0}")]
    Csv(#[from] csv::Error),

    #[error("Erreur d'entrée/sortie : {0}")]
    Io(#[from] std::io::Error),
}
