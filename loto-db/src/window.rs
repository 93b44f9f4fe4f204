use crate::models::DrawRecord;
use crate::store::RecordStore;

/// Vue sur les `len` tirages les plus récents de l'historique.
///
/// La vue garde l'accès à l'historique complet : le plus ancien tirage de la fenêtre
/// a besoin de son prédécesseur, qui se trouve hors fenêtre.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisWindow<'a> {
    store: &'a RecordStore,
    len: usize,
}

impl<'a> AnalysisWindow<'a> {
    pub(crate) fn new(store: &'a RecordStore, len: usize) -> Self {
        Self { store, len }
    }

    /// Tirages de la fenêtre, du plus récent au plus ancien.
    pub fn records(&self) -> &'a [DrawRecord] {
        &self.store.records()[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'a, DrawRecord> {
        self.records().iter()
    }

    /// Tirage précédant le `index`-ième tirage de la fenêtre, cherché dans tout l'historique.
    pub fn predecessor(&self, index: usize) -> Option<&'a DrawRecord> {
        self.store.predecessor_of(index)
    }

    /// Vrai si l'historique contient au moins un tirage au-delà de la fenêtre.
    pub fn has_trailing_record(&self) -> bool {
        self.store.len() > self.len
    }
}

#[cfg(test)]
mod tests {
    use crate::models::make_test_records;
    use crate::store::RecordStore;

    #[test]
    fn test_window_sizes() {
        for n in [0usize, 1, 49, 50, 51, 120] {
            let store = RecordStore::new(make_test_records(n));
            let window = store.window(50);
            assert_eq!(window.len(), n.min(50), "store de {} tirages", n);
            assert_eq!(window.records().len(), n.min(50));
        }
    }

    #[test]
    fn test_window_newest_first() {
        let store = RecordStore::new(make_test_records(60));
        let window = store.window(50);
        let ids: Vec<i64> = window.iter().map(|r| r.draw_id).collect();
        assert_eq!(ids[0], 1000);
        assert_eq!(ids[49], 951);
        assert!(ids.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_empty_store_window() {
        let store = RecordStore::default();
        let window = store.window(50);
        assert!(window.is_empty());
        assert!(window.predecessor(0).is_none());
        assert!(!window.has_trailing_record());
    }

    #[test]
    fn test_predecessor_beyond_window() {
        let store = RecordStore::new(make_test_records(51));
        let window = store.window(50);
        assert!(window.has_trailing_record());
        assert_eq!(window.predecessor(49).unwrap().draw_id, 950);

        let store = RecordStore::new(make_test_records(50));
        let window = store.window(50);
        assert!(!window.has_trailing_record());
        assert!(window.predecessor(49).is_none());
    }
}
