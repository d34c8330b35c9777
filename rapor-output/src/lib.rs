//! # Rapor Output
//!
//! Writes the currently held order list to the export directory, either as a
//! semicolon-delimited CSV file or as a short plain-text summary document.
//! Files are named `rapor-<epoch-ms>.<ext>`.

pub mod csv_export;
pub mod errors;
pub mod summary;
pub mod writer;

pub use csv_export::{CsvExporter, CSV_HEADER};
pub use errors::ExportError;
pub use summary::{SummaryExporter, SUMMARY_ORDER_LINES};
pub use writer::{export_file_name, ExportOutcome, ExportWriter};
