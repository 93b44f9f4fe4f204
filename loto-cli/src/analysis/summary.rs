use serde::Serialize;

use loto_db::window::AnalysisWindow;

/// Totaux de gagnants sur la fenêtre.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WinnerSummary {
    pub primary_total: u64,
    pub secondary_total: u64,
    pub grand_total: u64,
    pub draws_with_winners: usize,
}

pub fn winner_summary(window: &AnalysisWindow<'_>) -> WinnerSummary {
    let primary_total: u64 = window.iter().map(|r| r.primary_winners as u64).sum();
    let secondary_total: u64 = window.iter().map(|r| r.secondary_winners as u64).sum();
    WinnerSummary {
        primary_total,
        secondary_total,
        grand_total: primary_total + secondary_total,
        draws_with_winners: window.iter().filter(|r| r.has_winners()).count(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinnerPoint {
    pub draw_id: i64,
    pub primary: u32,
    pub secondary: u32,
}

/// Gagnants par tirage, dans l'ordre de la fenêtre.
pub fn winner_trend(window: &AnalysisWindow<'_>) -> Vec<WinnerPoint> {
    window
        .iter()
        .map(|r| WinnerPoint {
            draw_id: r.draw_id,
            primary: r.primary_winners,
            secondary: r.secondary_winners,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use loto_db::models::make_test_records;
    use loto_db::store::RecordStore;

    #[test]
    fn test_winner_summary() {
        // i % 5 == 0 : 1 gagnant loto ; i % 8 == 0 : 2 gagnants double
        let store = RecordStore::new(make_test_records(20));
        let summary = winner_summary(&store.window(50));
        assert_eq!(summary.primary_total, 4);
        assert_eq!(summary.secondary_total, 6);
        assert_eq!(summary.grand_total, 10);
        // 0, 5, 8, 10, 15, 16
        assert_eq!(summary.draws_with_winners, 6);
    }

    #[test]
    fn test_winner_summary_window_only() {
        let store = RecordStore::new(make_test_records(20));
        let summary = winner_summary(&store.window(5));
        assert_eq!(summary.primary_total, 1);
        assert_eq!(summary.secondary_total, 2);
        assert_eq!(summary.draws_with_winners, 1);
    }

    #[test]
    fn test_winner_summary_empty() {
        let store = RecordStore::default();
        assert_eq!(winner_summary(&store.window(50)), WinnerSummary::default());
        assert!(winner_trend(&store.window(50)).is_empty());
    }

    #[test]
    fn test_winner_trend() {
        let store = RecordStore::new(make_test_records(3));
        let trend = winner_trend(&store.window(50));
        assert_eq!(trend.len(), 3);
        assert_eq!(trend[0], WinnerPoint { draw_id: 1000, primary: 1, secondary: 2 });
        assert_eq!(trend[1].draw_id, 999);
    }
}
