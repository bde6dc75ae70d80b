//! CSV ingestion: source reading, encoding, dataset loading and cleansing.

pub mod error;
pub mod loader;
pub mod source;

pub use error::{IngestError, Result};
pub use loader::{InvalidKind, RemovedRecord, cleanse, ingest_source, load_dataset};
pub use source::{CsvSource, decode_text, read_bytes};
