use std::collections::BTreeMap;

use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use textplots::Plot;

use loto_db::models::{Combination, DrawRecord, PRIMARY_COUNT};

use crate::analysis::frequency::FrequencyTable;
use crate::analysis::matcher::MatchResult;
use crate::analysis::metrics::{DrawMetrics, SumSummary, sum_summary};
use crate::analysis::summary::{WinnerPoint, WinnerSummary};
use crate::config::BalanceRules;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn format_numbers(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

fn format_top(entry: Option<(u32, u32)>) -> String {
    entry
        .map(|(n, c)| format!("{} ({} fois)", n, c))
        .unwrap_or_else(|| "-".to_string())
}

fn format_share(count: u32, total: u32) -> String {
    format!("{:.1} %", count as f64 / total as f64 * 100.0)
}

pub fn display_summary(
    total_draws: usize,
    window_size: usize,
    winners: &WinnerSummary,
    hottest: Option<(u32, u32)>,
    top_supplementary: Option<(u32, u32)>,
) {
    println!(
        "\n📊 Résumé des {} derniers tirages ({} en historique)\n",
        window_size, total_draws
    );
    display_winners(winners);

    let mut table = new_table();
    table.set_header(vec!["Indicateur", "Valeur"]);
    table.add_row(vec!["Numéro le plus chaud".to_string(), format_top(hottest)]);
    table.add_row(vec!["Numéro fort le plus fréquent".to_string(), format_top(top_supplementary)]);
    println!("{table}");
}

fn display_winners(winners: &WinnerSummary) {
    let mut table = new_table();
    table.set_header(vec!["Gagnants (total)", "Loto", "Double Loto", "Tirages gagnants"]);
    table.add_row(vec![
        winners.grand_total.to_string(),
        winners.primary_total.to_string(),
        winners.secondary_total.to_string(),
        winners.draws_with_winners.to_string(),
    ]);
    println!("{table}");
}

pub fn display_frequency(primary: &FrequencyTable, supplementary: &FrequencyTable) {
    println!("\n── Numéros (par numéro) ──");
    display_frequency_table(primary);

    println!("\n── Numéro fort ──");
    display_frequency_table(supplementary);
}

fn display_frequency_table(frequency: &FrequencyTable) {
    if frequency.is_empty() {
        println!("  (Pas de données à afficher)");
        return;
    }

    let max = frequency.most_common().map(|(_, c)| c).unwrap_or(1).max(1);
    let total = frequency.total().max(1);
    let mut table = new_table();
    table.set_header(vec!["Numéro", "Apparitions", "Part", ""]);

    for (number, count) in frequency.sorted_by_number() {
        let bar = "█".repeat((count as f64 / max as f64 * 30.0).round() as usize);
        let color = if count == max { Color::Red } else { Color::White };
        table.add_row(vec![
            Cell::new(format!("{:2}", number)),
            Cell::new(count.to_string()),
            Cell::new(format_share(count, total)),
            Cell::new(bar).fg(color),
        ]);
    }
    println!("{table}");
}

pub fn display_structure(
    metrics: &[DrawMetrics],
    even_distribution: &BTreeMap<usize, usize>,
    repeat_distribution: &BTreeMap<usize, usize>,
    rules: &BalanceRules,
) {
    println!("\n🧬 Structure des tirages\n");

    println!("── Équilibre pair / impair ──");
    display_distribution(even_distribution, |k| {
        format!("{} pairs / {} impairs", k, PRIMARY_COUNT.saturating_sub(k))
    });

    println!("\n── Numéros repris du tirage précédent ──");
    display_distribution(repeat_distribution, |k| format!("{} repris", k));

    println!("\n── Sommes (cible {}) ──", rules.sum_range);
    display_sum_summary(
        sum_summary(metrics, rules.sum_range.min, rules.sum_range.max).as_ref(),
    );
    display_sum_chart(metrics, rules);

    println!("\n── Détail par tirage ──");
    display_metrics(metrics);
}

fn display_distribution(dist: &BTreeMap<usize, usize>, label: impl Fn(usize) -> String) {
    if dist.is_empty() {
        println!("  (Pas de données à afficher)");
        return;
    }
    let mut table = new_table();
    table.set_header(vec!["Valeur", "Tirages", ""]);
    for (&value, &count) in dist {
        table.add_row(vec![label(value), count.to_string(), "█".repeat(count)]);
    }
    println!("{table}");
}

fn display_sum_summary(sums: Option<&SumSummary>) {
    let Some(sums) = sums else {
        println!("  (Pas de données à afficher)");
        return;
    };
    println!(
        "  min {} · max {} · moyenne {:.1} · dans la cible : {} ({:.0} %)",
        sums.min,
        sums.max,
        sums.mean,
        sums.in_range,
        sums.in_range_share * 100.0
    );
}

fn display_sum_chart(metrics: &[DrawMetrics], rules: &BalanceRules) {
    if metrics.len() < 2 {
        return;
    }
    // ordre chronologique : le plus ancien à gauche
    let points: Vec<(f32, f32)> = metrics
        .iter()
        .rev()
        .enumerate()
        .map(|(i, m)| (i as f32, m.sum as f32))
        .collect();

    let low = rules.sum_range.min as f32;
    let high = rules.sum_range.max as f32;
    let y_min = points.iter().map(|p| p.1).fold(low, f32::min) - 10.0;
    let y_max = points.iter().map(|p| p.1).fold(high, f32::max) + 10.0;
    let x_max = (points.len() - 1) as f32;

    let sums = textplots::Shape::Lines(&points);
    let lower = textplots::Shape::Continuous(Box::new(move |_: f32| low));
    let upper = textplots::Shape::Continuous(Box::new(move |_: f32| high));
    let mut chart = textplots::Chart::new_with_y_range(120, 40, 0.0, x_max, y_min, y_max);
    println!("{}", chart.lineplot(&sums).lineplot(&lower).lineplot(&upper));
}

fn display_metrics(metrics: &[DrawMetrics]) {
    let mut table = new_table();
    table.set_header(vec!["Tirage", "Somme", "Pairs", "Écart moyen", "Repris"]);
    for m in metrics {
        table.add_row(vec![
            m.draw_id.to_string(),
            m.sum.to_string(),
            m.even_count.to_string(),
            format!("{:.2}", m.average_gap),
            m.repeat_count.to_string(),
        ]);
    }
    println!("{table}");
}

pub fn display_winner_trend(trend: &[WinnerPoint]) {
    println!("\n── Gagnants du premier rang par tirage ──");
    if trend.len() < 2 {
        println!("  (Pas assez de données à afficher)");
        return;
    }

    let primary_points: Vec<(f32, f32)> = trend
        .iter()
        .rev()
        .enumerate()
        .map(|(i, p)| (i as f32, p.primary as f32))
        .collect();
    let secondary_points: Vec<(f32, f32)> = trend
        .iter()
        .rev()
        .enumerate()
        .map(|(i, p)| (i as f32, p.secondary as f32))
        .collect();
    let y_max = trend
        .iter()
        .map(|p| p.primary.max(p.secondary))
        .max()
        .unwrap_or(0) as f32
        + 1.0;

    let primary = textplots::Shape::Lines(&primary_points);
    let secondary = textplots::Shape::Lines(&secondary_points);
    let mut chart =
        textplots::Chart::new_with_y_range(120, 30, 0.0, (trend.len() - 1) as f32, 0.0, y_max);
    println!("{}", chart.lineplot(&primary).lineplot(&secondary));
    println!("  (Loto et Double Loto, du plus ancien au plus récent)");
}

pub fn display_check(combination: &Combination, result: &MatchResult, rules: &BalanceRules) {
    println!("\n🔍 Analyse de la grille {}\n", format_numbers(&combination.numbers));

    let ok = |flag: bool| if flag { Color::Green } else { Color::Red };

    let mut table = new_table();
    table.set_header(vec!["Critère", "Valeur", "Verdict"]);
    table.add_row(vec![
        Cell::new("Somme"),
        Cell::new(result.sum.to_string()),
        Cell::new(if result.sum_in_range {
            format!("✅ dans la cible {}", rules.sum_range)
        } else {
            format!("❌ hors cible {}", rules.sum_range)
        })
        .fg(ok(result.sum_in_range)),
    ]);
    table.add_row(vec![
        Cell::new("Pairs / impairs"),
        Cell::new(format!("{}:{}", result.even_count, result.odd_count())),
        Cell::new(if result.parity_balanced { "✅ équilibré" } else { "⚠️ déséquilibré" })
            .fg(if result.parity_balanced { Color::Green } else { Color::Yellow }),
    ]);
    table.add_row(vec![
        Cell::new("Repris du dernier tirage"),
        Cell::new(result.repeat_with_last.to_string()),
        Cell::new(if result.repeat_with_last > 0 { "✅" } else { "💡 aucun" }),
    ]);
    println!("{table}");

    match result.matched_draw {
        Some(draw_id) => println!("\n😲 Cette combinaison a déjà gagné au premier rang (tirage {draw_id}) !"),
        None => println!("\n✨ Combinaison inédite : jamais gagnante au premier rang dans l'historique."),
    }
}

pub fn display_recommendations(combinations: &[Combination]) {
    println!("\n🎲 Grilles suggérées\n");

    let mut table = new_table();
    table.set_header(vec!["#", "Numéros", "Fort"]);
    for (i, combo) in combinations.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(format_numbers(&combo.numbers)),
            Cell::new(combo.supplementary).fg(Color::Red),
        ]);
    }
    println!("{table}");
}

pub fn display_records(records: &[DrawRecord]) {
    if records.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = new_table();
    table.set_header(vec!["Tirage", "Date", "Numéros", "Fort", "Gagnants Loto", "Gagnants Double"]);
    for record in records {
        table.add_row(vec![
            record.draw_id.to_string(),
            record.date.clone(),
            format_numbers(&record.numbers),
            record.supplementary.to_string(),
            record.primary_winners.to_string(),
            record.secondary_winners.to_string(),
        ]);
    }
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_numbers() {
        assert_eq!(format_numbers(&[1, 12, 37]), " 1 - 12 - 37");
    }

    #[test]
    fn test_format_share() {
        let table = FrequencyTable::from_numbers([3, 3, 3, 8]);
        assert_eq!(format_share(3, table.total()), "75.0 %");
        assert_eq!(format_share(1, table.total()), "25.0 %");
    }

    #[test]
    fn test_format_top() {
        assert_eq!(format_top(Some((7, 12))), "7 (12 fois)");
        assert_eq!(format_top(None), "-");
    }
}
