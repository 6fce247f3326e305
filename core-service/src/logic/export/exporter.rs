//! Result Exporter
//!
//! Serialize evaluation results to tabular / line formats.
//! Reads from the audit log; never writes back into it.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::logic::risk::{AuditLog, EvaluationResult};
use super::error::{ExportError, ExportResult};

// ============================================================================
// EXPORT FORMATS
// ============================================================================

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// One row per result, rationale joined with "; "
    Csv,
    /// One JSON object per line
    Jsonl,
    /// Pretty JSON array
    JsonArray,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Jsonl => "jsonl",
            ExportFormat::JsonArray => "json",
        }
    }

    /// Guess from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| e.parse().ok())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "jsonl" | "ndjson" => Ok(ExportFormat::Jsonl),
            "json" => Ok(ExportFormat::JsonArray),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CSV RECORD
// ============================================================================

/// Flat CSV row; column order is the header order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvResultRecord {
    pub account_id: String,
    pub risk_score: i64,
    pub confidence_score: f64,
    pub intent_classification: String,
    pub rationale: String,
    pub enforcement_action: String,
}

impl From<&EvaluationResult> for CsvResultRecord {
    fn from(result: &EvaluationResult) -> Self {
        Self {
            account_id: result.account_id.clone(),
            risk_score: result.risk_score,
            confidence_score: result.confidence_score,
            intent_classification: result.intent_classification.as_str().to_string(),
            rationale: result.rationale_text(),
            enforcement_action: result.enforcement_action.as_str().to_string(),
        }
    }
}

// ============================================================================
// EXPORT FUNCTIONS
// ============================================================================

/// Write results to any writer
pub fn write_results<W: Write>(
    writer: W,
    results: &[EvaluationResult],
    format: ExportFormat,
) -> ExportResult<()> {
    match format {
        ExportFormat::Csv => write_csv(writer, results),
        ExportFormat::Jsonl => {
            let mut writer = writer;
            for result in results {
                serde_json::to_writer(&mut writer, result)?;
                writeln!(writer)?;
            }
            writer.flush()?;
            Ok(())
        }
        ExportFormat::JsonArray => {
            let mut writer = writer;
            serde_json::to_writer_pretty(&mut writer, results)?;
            writer.flush()?;
            Ok(())
        }
    }
}

/// Export results to a file, returning rows written
pub fn export_results(
    results: &[EvaluationResult],
    destination: &Path,
    format: ExportFormat,
) -> ExportResult<usize> {
    let file = File::create(destination)?;
    write_results(BufWriter::new(file), results, format)?;

    log::info!(
        "Exported {} results to {} ({})",
        results.len(),
        destination.display(),
        format
    );
    Ok(results.len())
}

/// Snapshot the audit log and export it
pub fn export_audit_log(
    audit: &AuditLog,
    destination: &Path,
    format: ExportFormat,
) -> ExportResult<usize> {
    export_results(&audit.results(), destination, format)
}

fn write_csv<W: Write>(writer: W, results: &[EvaluationResult]) -> ExportResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for result in results {
        wtr.serialize(CsvResultRecord::from(result))?;
    }
    wtr.flush()?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::risk::{RiskEvaluator, TelemetrySample};

    fn sample_results() -> Vec<EvaluationResult> {
        let evaluator = RiskEvaluator::with_defaults();
        evaluator.evaluate_batch(&[
            TelemetrySample::new("acct_bfdc9309", 8.2, 95.0, 97.0, 50),
            TelemetrySample::new("acct_quiet", 4.0, 20.0, 10.0, 2),
        ])
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("ndjson".parse::<ExportFormat>().unwrap(), ExportFormat::Jsonl);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::JsonArray);
        assert!(matches!("xml".parse::<ExportFormat>(), Err(ExportError::UnknownFormat(_))));
        assert_eq!(ExportFormat::from_path(Path::new("out/results.jsonl")), Some(ExportFormat::Jsonl));
        assert_eq!(ExportFormat::from_path(Path::new("results")), None);
    }

    #[test]
    fn test_csv_layout() {
        let mut buf = Vec::new();
        write_results(&mut buf, &sample_results(), ExportFormat::Csv).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(
            lines[0],
            "account_id,risk_score,confidence_score,intent_classification,rationale,enforcement_action"
        );
        assert!(lines[1].starts_with("acct_bfdc9309,145,1.0,MODEL_EXTRACTION,"));
        assert!(lines[1].contains("High Entropy; High JIT Regeneration"));
        assert!(lines[1].ends_with(",BLOCK"));
        assert_eq!(lines[2], "acct_quiet,0,0.0,UNKNOWN_ABUSE,,MONITOR");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_jsonl_round_trip() {
        let results = sample_results();
        let mut buf = Vec::new();
        write_results(&mut buf, &results, ExportFormat::Jsonl).unwrap();

        let parsed: Vec<EvaluationResult> = String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(parsed, results);
    }

    #[test]
    fn test_export_audit_log_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decisions.json");

        let evaluator = RiskEvaluator::with_defaults();
        evaluator.evaluate(&TelemetrySample::new("acct_a", 7.3, 87.0, 45.0, 20));
        evaluator.evaluate(&TelemetrySample::new("acct_b", 1.0, 1.0, 1.0, 40));

        let count = export_audit_log(evaluator.audit_log(), &path, ExportFormat::JsonArray).unwrap();
        assert_eq!(count, 2);

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<EvaluationResult> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, evaluator.audit_log().results());
        assert_eq!(parsed[1].intent_classification.as_str(), "LATERAL_PROPAGATION");
    }
}
