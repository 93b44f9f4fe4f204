mod analysis;
mod config;
mod display;
mod import;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::analysis::frequency::{primary_frequency, supplementary_frequency};
use crate::analysis::matcher::check;
use crate::analysis::metrics::{compute_metrics, even_distribution, repeat_distribution, sum_summary};
use crate::analysis::run_analysis;
use crate::analysis::sampler::{Recommender, generate_suggestions, make_rng};
use crate::analysis::summary::{winner_summary, winner_trend};
use crate::config::{AnalysisConfig, load_config};
use crate::display::{
    display_check, display_frequency, display_recommendations, display_records,
    display_structure, display_summary, display_winner_trend,
};
use crate::import::import_csv;
use loto_db::models::Combination;
use loto_db::store::RecordStore;

#[derive(Parser)]
#[command(name = "loto", about = "Analyse statistique des tirages du Loto")]
struct Cli {
    /// Export CSV des tirages (du plus récent au plus ancien)
    #[arg(short, long, global = true, default_value = "Lotto.csv")]
    file: PathBuf,

    /// Fichier de configuration JSON
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Fenêtre d'analyse (nombre de tirages), remplace la configuration
    #[arg(short, long, global = true)]
    window: Option<usize>,

    /// Sortie JSON plutôt que des tableaux
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Totaux de gagnants et numéros les plus fréquents
    Summary,

    /// Fréquences des numéros et du numéro fort
    Frequency,

    /// Sommes, équilibre pair/impair, écarts et répétitions
    Structure,

    /// Analyser une grille et chercher si elle a déjà gagné
    Check {
        /// 6 numéros distincts
        #[arg(num_args = 6, required = true)]
        numbers: Vec<u32>,

        /// Numéro fort (sans effet sur la recherche)
        #[arg(short, long)]
        supplementary: Option<u32>,
    },

    /// Suggérer des grilles biaisées vers les numéros chauds
    Recommend {
        /// Nombre de grilles
        #[arg(short, long)]
        count: Option<usize>,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Lister les tirages de la fenêtre
    List {
        /// Nombre de tirages à afficher (défaut : toute la fenêtre)
        #[arg(short, long)]
        last: Option<usize>,
    },

    /// Analyse complète en une passe
    Report {
        /// Grille à vérifier (6 numéros séparés par des virgules)
        #[arg(long, value_delimiter = ',')]
        check: Option<Vec<u32>>,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Afficher la configuration effective
    Config,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Erreur de traitement des données : {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(window) = cli.window {
        config.window_size = window;
    }

    let file = cli.file.as_path();
    let json = cli.json;
    match cli.command {
        Command::Config => print_json(&config),
        Command::Summary => cmd_summary(&import_csv(file, &config)?, &config, json),
        Command::Frequency => cmd_frequency(&import_csv(file, &config)?, &config, json),
        Command::Structure => cmd_structure(&import_csv(file, &config)?, &config, json),
        Command::Check {
            numbers,
            supplementary,
        } => {
            let combination = parse_combination(&config, &numbers, supplementary)?;
            cmd_check(&import_csv(file, &config)?, &config, &combination, json)
        }
        Command::Recommend { count, seed } => {
            cmd_recommend(&import_csv(file, &config)?, &config, count, seed, json)
        }
        Command::List { last } => cmd_list(&import_csv(file, &config)?, &config, last, json),
        Command::Report { check, seed } => {
            let combination = check
                .as_deref()
                .map(|numbers| parse_combination(&config, numbers, None))
                .transpose()?;
            cmd_report(&import_csv(file, &config)?, &config, combination.as_ref(), seed, json)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_combination(config: &AnalysisConfig, numbers: &[u32], supplementary: Option<u32>) -> Result<Combination> {
    let supplementary = supplementary.unwrap_or(config.supplementary_range.min);
    let combination = Combination::new(
        numbers,
        supplementary,
        config.primary_range,
        config.supplementary_range,
    )?;
    Ok(combination)
}

fn cmd_summary(store: &RecordStore, config: &AnalysisConfig, json: bool) -> Result<()> {
    let window = store.window(config.window_size);
    let winners = winner_summary(&window);
    let hottest = primary_frequency(&window).most_common();
    let top_supplementary = supplementary_frequency(&window).most_common();
    if json {
        return print_json(&serde_json::json!({
            "total_draws": store.len(),
            "window_size": window.len(),
            "winners": winners,
            "hottest_number": hottest,
            "top_supplementary": top_supplementary,
        }));
    }
    display_summary(store.len(), window.len(), &winners, hottest, top_supplementary);
    display_winner_trend(&winner_trend(&window));
    Ok(())
}

fn cmd_frequency(store: &RecordStore, config: &AnalysisConfig, json: bool) -> Result<()> {
    let window = store.window(config.window_size);
    let primary = primary_frequency(&window);
    let supplementary = supplementary_frequency(&window);
    if json {
        return print_json(&serde_json::json!({
            "primary": primary.sorted_by_number(),
            "supplementary": supplementary.sorted_by_number(),
        }));
    }
    display_frequency(&primary, &supplementary);
    Ok(())
}

fn cmd_structure(store: &RecordStore, config: &AnalysisConfig, json: bool) -> Result<()> {
    let window = store.window(config.window_size);
    let metrics = compute_metrics(&window);
    let even = even_distribution(&metrics);
    let repeats = repeat_distribution(&metrics);
    if json {
        return print_json(&serde_json::json!({
            "metrics": metrics,
            "even_distribution": even,
            "repeat_distribution": repeats,
            "sums": sum_summary(&metrics, config.rules.sum_range.min, config.rules.sum_range.max),
        }));
    }
    display_structure(&metrics, &even, &repeats, &config.rules);
    Ok(())
}

fn cmd_check(
    store: &RecordStore,
    config: &AnalysisConfig,
    combination: &Combination,
    json: bool,
) -> Result<()> {
    let result = check(store, combination, &config.rules);
    if json {
        return print_json(&result);
    }
    display_check(combination, &result, &config.rules);
    Ok(())
}

fn cmd_recommend(
    store: &RecordStore,
    config: &AnalysisConfig,
    count: Option<usize>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let window = store.window(config.window_size);
    let primary = primary_frequency(&window);
    let supplementary = supplementary_frequency(&window);
    let count = count.unwrap_or(config.recommender.count);

    let suggestions = generate_suggestions(
        &Recommender::from_config(config),
        &primary,
        &supplementary,
        count,
        seed,
    );
    if json {
        return print_json(&suggestions);
    }
    display_recommendations(&suggestions);
    Ok(())
}

fn cmd_list(store: &RecordStore, config: &AnalysisConfig, last: Option<usize>, json: bool) -> Result<()> {
    let window = store.window(config.window_size);
    let records = &window.records()[..last.unwrap_or(window.len()).min(window.len())];
    if json {
        return print_json(&records);
    }
    display_records(records);
    Ok(())
}

fn cmd_report(
    store: &RecordStore,
    config: &AnalysisConfig,
    combination: Option<&Combination>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let report = run_analysis(store, config, combination, &mut make_rng(seed));
    if json {
        return print_json(&report);
    }

    display_summary(
        report.total_draws,
        report.window_size,
        &report.winners,
        report.hottest_number,
        report.top_supplementary,
    );
    display_winner_trend(&report.winner_trend);
    display_frequency(&report.primary_frequency, &report.supplementary_frequency);
    display_structure(
        &report.metrics,
        &report.even_distribution,
        &report.repeat_distribution,
        &config.rules,
    );
    if let Some(checked) = &report.checked {
        display_check(&checked.combination, &checked.result, &config.rules);
    }
    display_recommendations(&report.recommendations);
    println!("\n📋 Tirages de la fenêtre");
    display_records(&report.window_records);
    Ok(())
}
