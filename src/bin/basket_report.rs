use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use serde::Serialize;

use basket_miner::{
    load_orders_from_path, sales_analytics, sales_patterns, MinerConfig, PatternReport,
    SalesAnalytics,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportKind {
    Patterns,
    Analytics,
    All,
}

/// Mine frequently-bought-together pairs and recommendation rules from an
/// order export.
#[derive(Debug, Parser)]
#[command(name = "basket-report", version)]
struct Cli {
    /// JSON array of orders as exported by the order store
    orders: PathBuf,

    #[arg(long, value_enum, default_value = "patterns")]
    report: ReportKind,

    /// Fraction of orders a pair must appear in (overrides BASKET_MIN_SUPPORT)
    #[arg(long)]
    min_support: Option<f64>,

    /// Minimum rule confidence (overrides BASKET_MIN_CONFIDENCE)
    #[arg(long)]
    min_confidence: Option<f64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FullReport {
    patterns: PatternReport,
    analytics: SalesAnalytics,
}

fn main() -> Result<()> {
    // Initialize logger - defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let cli = Cli::parse();

    let mut config = MinerConfig::from_env().context("Failed to read miner configuration")?;
    if let Some(min_support) = cli.min_support {
        config.min_support = min_support;
    }
    if let Some(min_confidence) = cli.min_confidence {
        config.min_confidence = min_confidence;
    }
    config.validate()?;

    let orders = load_orders_from_path(&cli.orders)
        .with_context(|| format!("Failed to load orders from {}", cli.orders.display()))?;
    info!(
        "Loaded {} orders (min support {}, min confidence {})",
        orders.len(),
        config.min_support,
        config.min_confidence
    );

    let output = match cli.report {
        ReportKind::Patterns => to_json(&sales_patterns(&orders, &config)?, cli.pretty)?,
        ReportKind::Analytics => to_json(&sales_analytics(&orders), cli.pretty)?,
        ReportKind::All => to_json(
            &FullReport {
                patterns: sales_patterns(&orders, &config)?,
                analytics: sales_analytics(&orders),
            },
            cli.pretty,
        )?,
    };
    println!("{output}");

    Ok(())
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
