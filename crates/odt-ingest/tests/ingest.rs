//! End-to-end ingestion tests over real files.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use odt_ingest::{CsvSource, IngestError, ingest_source};
use odt_model::RecordId;

fn create_temp_csv(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".csv").unwrap();
    file.write_all(content).unwrap();
    file
}

#[test]
fn test_ingest_file_with_default_prefix() {
    let file = create_temp_csv(b"Name,Age\nAlice,30\n");
    let source = CsvSource::from_arg(file.path());
    let dataset = ingest_source(&source, None, None).unwrap();

    // Default id is the (sanitized) file stem.
    let stem = file
        .path()
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap()
        .replace('-', "_");
    assert_eq!(dataset.meta.id, stem);
    assert_eq!(dataset.len(), 2);
    assert_eq!(
        dataset.record(&RecordId::new(&dataset.meta.id, 2)).unwrap()[1],
        "30"
    );
}

#[test]
fn test_ingest_cleanses_on_load() {
    let file = create_temp_csv(b"# generated export\nName,Age\n\nAlice,30\n");
    let source = CsvSource::from_arg(file.path());
    let dataset = ingest_source(&source, Some("people"), None).unwrap();

    // Comment line 1 and blank line 3 are gone; lines 2 and 4 remain.
    assert_eq!(dataset.len(), 2);
    assert!(dataset.record(&RecordId::new("people", 2)).is_some());
    assert!(dataset.record(&RecordId::new("people", 4)).is_some());
}

#[test]
fn test_ingest_with_explicit_encoding() {
    // "名前,年齢" in Shift_JIS.
    let file = create_temp_csv(b"\x96\xbc\x91\x4f,\x94\x4e\x97\xee\n");
    let source = CsvSource::from_arg(file.path());
    let dataset = ingest_source(&source, Some("jp"), Some("shift_jis")).unwrap();

    assert_eq!(
        dataset.record(&RecordId::new("jp", 1)).unwrap(),
        &vec!["名前".to_string(), "年齢".to_string()]
    );
}

#[test]
fn test_ingest_missing_file() {
    let source = CsvSource::from_arg(Path::new("/no/such/file.csv"));
    let result = ingest_source(&source, None, None);
    assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
}

#[test]
fn test_ingest_rejects_unknown_encoding() {
    let file = create_temp_csv(b"a,b\n");
    let source = CsvSource::from_arg(file.path());
    let result = ingest_source(&source, None, Some("cp-nonsense"));
    assert!(matches!(result, Err(IngestError::UnknownEncoding { .. })));
}
