//! Export Module
//!
//! Downstream of the engine: đọc samples vào, ghi results ra.
//! The evaluator never calls into this module.
//!
//! ## Structure
//! - `exporter`: Results -> CSV / JSONL / JSON array
//! - `loader`: CSV / JSONL / JSON array -> samples
//! - `error`: `ExportError`

pub mod error;
pub mod exporter;
pub mod loader;

pub use error::{ExportError, ExportResult};

pub use exporter::{
    ExportFormat,
    CsvResultRecord,
    write_results,
    export_results,
    export_audit_log,
};

pub use loader::{read_samples, load_samples};
