//! Enforcement Engine - CLI harness
//!
//! Thin wrapper: load rules, read samples, evaluate, print/export.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use enforcement_engine::constants;
use enforcement_engine::logic::export::{self, ExportFormat};
use enforcement_engine::logic::risk::{RiskEvaluator, TelemetrySample};
use enforcement_engine::logic::rules::{self, RuleConfig};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON rule configuration (falls back to $ENFORCEMENT_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Built-in preset when no config file is given: default, strict, lenient
    #[arg(long, global = true)]
    preset: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate telemetry samples and print one JSON result per line
    Evaluate {
        /// Sample file (.jsonl, .csv, .json) or "-" for JSONL on stdin
        #[arg(short, long, default_value = "-")]
        input: String,
        /// Write all results to this file after evaluation
        #[arg(long)]
        export: Option<PathBuf>,
        /// Export format: csv, jsonl, json (default: from --export extension)
        #[arg(long)]
        format: Option<String>,
    },
    /// Evaluate the two reference accounts
    Demo,
    /// Print the effective rule configuration and its fingerprint
    ShowConfig,
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(constants::DEFAULT_LOG_FILTER),
    )
    .init();

    if let Err(e) = run(Cli::parse()) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = rules::resolve_config(cli.config.as_deref(), cli.preset.as_deref())
        .context("failed to resolve rule config")?;

    match cli.command {
        Commands::Evaluate { input, export, format } => {
            evaluate(config, &input, export.as_deref(), format.as_deref())
        }
        Commands::Demo => demo(config),
        Commands::ShowConfig => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            println!("fingerprint: {}", config.fingerprint());
            Ok(())
        }
    }
}

fn evaluate(
    config: RuleConfig,
    input: &str,
    export_path: Option<&Path>,
    format: Option<&str>,
) -> Result<()> {
    let samples = if input == "-" {
        export::read_samples(std::io::stdin().lock(), ExportFormat::Jsonl)?
    } else {
        export::load_samples(Path::new(input))
            .with_context(|| format!("failed to read samples from {}", input))?
    };

    let evaluator = RiskEvaluator::new(Arc::new(config));
    let results = evaluator.evaluate_batch(&samples);
    export::write_results(std::io::stdout().lock(), &results, ExportFormat::Jsonl)?;

    if let Some(path) = export_path {
        let format = match format {
            Some(f) => f.parse()?,
            None => ExportFormat::from_path(path).unwrap_or(ExportFormat::Csv),
        };
        export::export_audit_log(evaluator.audit_log(), path, format)?;
    }

    log_summary(&evaluator);
    Ok(())
}

fn demo(config: RuleConfig) -> Result<()> {
    let evaluator = RiskEvaluator::new(Arc::new(config));
    let samples = [
        TelemetrySample::new("acct_bfdc9309", 8.2, 95.0, 97.0, 50),
        TelemetrySample::new("acct_7a1e22c4", 7.3, 87.0, 45.0, 20),
    ];

    let mut out = std::io::stdout().lock();
    for sample in &samples {
        let result = evaluator.evaluate(sample);
        writeln!(
            out,
            "{:<16} score={:<4} confidence={:.2} intent={:<20} action={:<8} [{}]",
            result.account_id,
            result.risk_score,
            result.confidence_score,
            result.intent_classification,
            result.enforcement_action,
            result.rationale_text()
        )?;
    }

    log_summary(&evaluator);
    Ok(())
}

fn log_summary(evaluator: &RiskEvaluator) {
    let summary = evaluator.summary();
    log::info!(
        "{} v{}: {} evaluated, {} monitor, {} throttle, {} block (mean score {:.1}, session {})",
        constants::APP_NAME,
        constants::APP_VERSION,
        summary.total,
        summary.monitor,
        summary.throttle,
        summary.block,
        summary.mean_risk_score,
        evaluator.audit_log().session_id()
    );
}
