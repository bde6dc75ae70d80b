//! Column projection with per-record type and content constraints.

use indexmap::IndexMap;
use tracing::{info, warn};

use odt_model::{Dataset, Record, TypeTag, index_to_letters};

/// Positional column filters, aligned with the selected indices.
///
/// Missing trailing tags, empty tags and unrecognized tags all mean
/// "no constraint"; extra tags beyond the selected columns are ignored.
#[derive(Debug, Clone, Default)]
pub struct ColumnFilters(Vec<Option<TypeTag>>);

impl ColumnFilters {
    /// Parses a comma-separated tag list (`int,,float`).
    pub fn parse(list: &str) -> Self {
        Self(list.split(',').map(TypeTag::parse).collect())
    }

    fn get(&self, position: usize) -> Option<TypeTag> {
        self.0.get(position).copied().flatten()
    }
}

/// How the projector treats empty cells in selected columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentPolicy {
    /// Keep records with empty selected cells.
    #[default]
    Permissive,
    /// Drop records whose selected cells are empty.
    Strict,
}

/// Outcome counts from a projection pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProjectionStats {
    pub kept: usize,
    pub dropped: usize,
}

/// Projects each record onto the target columns.
///
/// Without explicit columns, every column of each record is selected;
/// the width is recomputed per record, not fixed globally. A record
/// survives only if every selected column passes its checks; one
/// violation drops the whole record with a warning, and the scan
/// continues with the next record. Survivors keep their original ids.
pub fn select_columns(
    dataset: &Dataset,
    columns: Option<&[usize]>,
    filters: &ColumnFilters,
    policy: ContentPolicy,
) -> (Dataset, ProjectionStats) {
    let mut data = IndexMap::new();
    let mut stats = ProjectionStats::default();
    for (id, record) in &dataset.data {
        match project_record(record, columns, filters, policy) {
            Ok(projected) => {
                data.insert(id.clone(), projected);
                stats.kept += 1;
            }
            Err(violation) => {
                warn!(
                    file = %dataset.meta.filename,
                    line = id.line(),
                    column = %index_to_letters(violation.index),
                    "{}",
                    violation.kind.reason()
                );
                stats.dropped += 1;
            }
        }
    }
    info!(
        file = %dataset.meta.filename,
        kept = stats.kept,
        dropped = stats.dropped,
        "projection complete"
    );
    (dataset.derive(data), stats)
}

struct Violation {
    index: usize,
    kind: ViolationKind,
}

enum ViolationKind {
    NoSuchColumn,
    NoContent,
    UnmatchedType,
}

impl ViolationKind {
    fn reason(&self) -> &'static str {
        match self {
            Self::NoSuchColumn => "no such column",
            Self::NoContent => "no content in column",
            Self::UnmatchedType => "unmatched type of column",
        }
    }
}

fn project_record(
    record: &Record,
    columns: Option<&[usize]>,
    filters: &ColumnFilters,
    policy: ContentPolicy,
) -> std::result::Result<Record, Violation> {
    let targets: Vec<usize> = match columns {
        Some(columns) => columns.to_vec(),
        None => (0..record.len()).collect(),
    };
    let mut projected = Vec::with_capacity(targets.len());
    for (position, &index) in targets.iter().enumerate() {
        let violation = |kind| Violation { index, kind };
        let Some(cell) = record.get(index) else {
            return Err(violation(ViolationKind::NoSuchColumn));
        };
        if policy == ContentPolicy::Strict && cell.is_empty() {
            return Err(violation(ViolationKind::NoContent));
        }
        match filters.get(position) {
            Some(TypeTag::Int) if cell.parse::<i64>().is_err() => {
                return Err(violation(ViolationKind::UnmatchedType));
            }
            Some(TypeTag::Float) if cell.parse::<f64>().is_err() => {
                return Err(violation(ViolationKind::UnmatchedType));
            }
            _ => {}
        }
        projected.push(cell.clone());
    }
    Ok(projected)
}
