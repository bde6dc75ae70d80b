//! Loading CSV text into a dataset and cleansing invalid records.

use indexmap::IndexMap;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use odt_model::{Dataset, DatasetMeta, Record, RecordId, sanitize_dataset_id};

use crate::error::Result;
use crate::source::{CsvSource, decode_text, read_bytes};

/// Splits text into physical lines and parses each as one CSV record.
///
/// Line splitting happens before CSV tokenization: a quoted field may
/// contain the delimiter but not a raw newline. Records keep their
/// 1-based physical line numbers, which is what header-position hints
/// address.
pub fn load_dataset(text: &str, meta: DatasetMeta) -> Dataset {
    let mut data = IndexMap::new();
    for (index, line) in text.lines().enumerate() {
        let line_number = (index + 1) as u32;
        data.insert(RecordId::new(&meta.id, line_number), parse_record(line));
    }
    Dataset { meta, data }
}

/// Parses one physical line as a CSV record.
///
/// An empty line yields a zero-column record, which cleansing removes.
fn parse_record(line: &str) -> Record {
    if line.is_empty() {
        return Vec::new();
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    match reader.records().next() {
        Some(Ok(record)) => record.iter().map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

/// Why a record was removed during cleansing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidKind {
    /// Zero parsed columns.
    NoColumns,
    /// First cell starts with `#`.
    Comment,
    /// Every cell is empty or whitespace.
    Empty,
}

impl InvalidKind {
    fn reason(self) -> &'static str {
        match self {
            Self::NoColumns => "no columns",
            Self::Comment => "comment record",
            Self::Empty => "empty record",
        }
    }
}

/// A record dropped by [`cleanse`].
#[derive(Debug, Clone)]
pub struct RemovedRecord {
    pub id: RecordId,
    pub kind: InvalidKind,
}

/// Removes structurally invalid records, warning once per removal.
///
/// Removal is non-fatal and idempotent: cleansing an already-clean
/// dataset removes nothing.
pub fn cleanse(dataset: &mut Dataset) -> Vec<RemovedRecord> {
    let mut removed = Vec::new();
    for (id, record) in &dataset.data {
        let kind = if record.is_empty() {
            InvalidKind::NoColumns
        } else if record[0].starts_with('#') {
            InvalidKind::Comment
        } else if record.iter().all(|cell| cell.trim().is_empty()) {
            InvalidKind::Empty
        } else {
            continue;
        };
        warn!(
            file = %dataset.meta.filename,
            line = id.line(),
            "{}, record removed",
            kind.reason()
        );
        removed.push(RemovedRecord {
            id: id.clone(),
            kind,
        });
    }
    for entry in &removed {
        dataset.data.shift_remove(&entry.id);
    }
    removed
}

/// Reads, decodes, loads and cleanses one CSV source.
///
/// The dataset id is the explicit prefix when given, otherwise the file
/// stem, otherwise (stdin) a content-derived hex id. Any `-` in the id
/// becomes `_`.
pub fn ingest_source(
    source: &CsvSource,
    prefix: Option<&str>,
    encoding: Option<&str>,
) -> Result<Dataset> {
    let bytes = read_bytes(source)?;
    let text = decode_text(&bytes, encoding, source)?;
    let id = dataset_id_for(source, prefix, &bytes);
    let meta = DatasetMeta {
        id,
        name: None,
        path: source.path_string(),
        filename: source.filename(),
        basename: source.basename(),
    };
    let mut dataset = load_dataset(&text, meta);
    let removed = cleanse(&mut dataset);
    debug!(
        file = %dataset.meta.filename,
        records = dataset.len(),
        removed = removed.len(),
        "dataset loaded"
    );
    Ok(dataset)
}

fn dataset_id_for(source: &CsvSource, prefix: Option<&str>, bytes: &[u8]) -> String {
    let raw = match (prefix, source) {
        (Some(prefix), _) => prefix.to_string(),
        (None, CsvSource::File(_)) => source.basename(),
        (None, CsvSource::Stdin) => hex::encode(&Sha256::digest(bytes)[..8]),
    };
    sanitize_dataset_id(&raw)
}
