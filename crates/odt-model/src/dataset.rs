//! In-memory, line-addressable view of one CSV source.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ids::RecordId;

/// The ordered cell sequence of one CSV row.
pub type Record = Vec<String>;

/// Source metadata for a dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetMeta {
    /// Record-id prefix; never contains `-`.
    pub id: String,
    /// Human-readable name, when the source was discovered on a portal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Source path as given on the command line (absent for stdin).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub filename: String,
    pub basename: String,
}

/// One CSV source held fully in memory, addressable by record id.
///
/// Insertion order is ascending line number, and every key carries this
/// dataset's id as its prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub meta: DatasetMeta,
    pub data: IndexMap<RecordId, Record>,
}

impl Dataset {
    pub fn new(meta: DatasetMeta) -> Self {
        Self {
            meta,
            data: IndexMap::new(),
        }
    }

    pub fn record(&self, id: &RecordId) -> Option<&Record> {
        self.data.get(id)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Builds a derived dataset with the same metadata.
    pub fn derive(&self, data: IndexMap<RecordId, Record>) -> Self {
        Self {
            meta: self.meta.clone(),
            data,
        }
    }
}
