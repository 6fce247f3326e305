//! Sample Loader
//!
//! Read telemetry samples for the harness: JSON Lines, CSV or JSON array.
//! Values are passed through unvalidated; the engine scores whatever it gets.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::logic::risk::TelemetrySample;
use super::error::{ExportError, ExportResult};
use super::exporter::ExportFormat;

/// Read samples from any reader
pub fn read_samples<R: Read>(reader: R, format: ExportFormat) -> ExportResult<Vec<TelemetrySample>> {
    match format {
        ExportFormat::Jsonl => read_jsonl(BufReader::new(reader)),
        ExportFormat::Csv => {
            let mut rdr = csv::Reader::from_reader(reader);
            let mut samples = Vec::new();
            for record in rdr.deserialize::<TelemetrySample>() {
                samples.push(record?);
            }
            Ok(samples)
        }
        ExportFormat::JsonArray => Ok(serde_json::from_reader(reader)?),
    }
}

/// Load samples from a file; format guessed from extension, JSONL otherwise
pub fn load_samples(path: &Path) -> ExportResult<Vec<TelemetrySample>> {
    let format = ExportFormat::from_path(path).unwrap_or(ExportFormat::Jsonl);
    let samples = read_samples(File::open(path)?, format)?;
    log::info!("Loaded {} samples from {} ({})", samples.len(), path.display(), format);
    Ok(samples)
}

fn read_jsonl<R: BufRead>(reader: R) -> ExportResult<Vec<TelemetrySample>> {
    let mut samples = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let sample = serde_json::from_str(trimmed).map_err(|e| ExportError::InvalidSample {
            line: idx + 1,
            message: e.to_string(),
        })?;
        samples.push(sample);
    }

    Ok(samples)
}
