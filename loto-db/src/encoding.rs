use encoding_rs::Encoding;

use crate::error::StoreError;

/// Code page des exports historiques (hébreu, Windows).
pub const DEFAULT_ENCODING: &str = "windows-1255";

/// Décode le contenu brut selon le label WHATWG donné (`windows-1255`, `utf-8`, ...).
/// Un octet sans correspondance fait échouer tout le chargement.
pub fn decode_text(bytes: &[u8], label: &str) -> Result<String, StoreError> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| StoreError::UnknownEncoding(label.to_string()))?;

    // BOM éventuel : il prime sur le label, comme pour un lecteur de navigateur
    let (encoding, bytes) = match Encoding::for_bom(bytes) {
        Some((bom_encoding, bom_len)) => (bom_encoding, &bytes[bom_len..]),
        None => (encoding, bytes),
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or(StoreError::Encoding {
            encoding: encoding.name(),
        })
}
