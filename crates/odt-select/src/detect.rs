//! Header-row detection over candidate records.

use tracing::warn;

use odt_model::{Dataset, Record, RecordId};

use crate::error::{Result, SelectError};
use crate::hint::{HeaderHint, Matcher};

/// A successfully detected header row.
#[derive(Debug, Clone)]
pub struct HeaderMatch {
    /// The winning record.
    pub record_id: RecordId,
    /// Resolved column indices, aligned to matcher order. Without value
    /// matchers this is every column of the winning record.
    pub columns: Vec<usize>,
}

/// Locates the header row among the hint's candidates.
///
/// Candidates are visited in ascending line order; the first one whose
/// record exists and satisfies every matcher wins and the scan stops.
/// Candidates without a record are warned about and skipped.
pub fn detect_header(dataset: &Dataset, hint: &HeaderHint) -> Result<HeaderMatch> {
    let candidates: Vec<RecordId> = match &hint.lines {
        None => dataset.data.keys().cloned().collect(),
        Some(lines) => lines
            .iter()
            .map(|line| RecordId::new(&dataset.meta.id, *line))
            .collect(),
    };
    // Both sources are already ascending: the record map by insertion
    // order, the parsed line set by BTreeSet iteration.

    for candidate in candidates {
        let Some(record) = dataset.record(&candidate) else {
            warn!(
                file = %dataset.meta.filename,
                line = candidate.line(),
                "no such record"
            );
            continue;
        };
        let columns = match &hint.matchers {
            None => (0..record.len()).collect(),
            Some(matchers) => match resolve_matchers(matchers, record) {
                Some(columns) => columns,
                None => continue,
            },
        };
        return Ok(HeaderMatch {
            record_id: candidate,
            columns,
        });
    }

    if hint.matchers.is_some() {
        Err(SelectError::NoRecordMatches {
            filename: dataset.meta.filename.clone(),
        })
    } else {
        Err(SelectError::NoSuchRecord {
            filename: dataset.meta.filename.clone(),
        })
    }
}

/// Resolves every matcher against one record, positionally and
/// independently; each contributes exactly one column index. A single
/// unresolved matcher fails the whole candidate.
fn resolve_matchers(matchers: &[Matcher], record: &Record) -> Option<Vec<usize>> {
    let mut columns = Vec::with_capacity(matchers.len());
    for matcher in matchers {
        match matcher {
            Matcher::Position(column) => {
                if column.index >= record.len() {
                    return None;
                }
                columns.push(column.index);
            }
            Matcher::Pattern(pattern) => {
                let index = record.iter().position(|cell| pattern.is_match(cell))?;
                columns.push(index);
            }
        }
    }
    Some(columns)
}
