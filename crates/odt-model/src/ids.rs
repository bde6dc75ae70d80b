//! Stable, sortable record identifiers.

use std::fmt;

use crate::error::{ModelError, Result};

/// Width of the zero-padded line-number suffix. Lexical order of encoded
/// ids equals numeric order of line numbers up to 8 digits.
const LINE_WIDTH: usize = 8;

/// Identifier of one CSV row: the dataset id plus a 1-based line number,
/// encoded as `{dataset_id}-{line:08}`.
///
/// Dataset ids must not contain `-` so that [`RecordId::parse`] can
/// split on the last one; [`sanitize_dataset_id`] enforces this at the
/// point where ids are derived.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId {
    dataset_id: String,
    line: u32,
}

impl RecordId {
    pub fn new(dataset_id: impl Into<String>, line: u32) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            line,
        }
    }

    pub fn dataset_id(&self) -> &str {
        &self.dataset_id
    }

    /// 1-based line number in the source file.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Parses an encoded id by splitting on the last `-`.
    pub fn parse(encoded: &str) -> Result<Self> {
        let invalid = || ModelError::InvalidRecordId(encoded.to_string());
        let (dataset_id, line) = encoded.rsplit_once('-').ok_or_else(invalid)?;
        if dataset_id.is_empty() {
            return Err(invalid());
        }
        let line = line.parse().map_err(|_| invalid())?;
        Ok(Self::new(dataset_id, line))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:0width$}",
            self.dataset_id,
            self.line,
            width = LINE_WIDTH
        )
    }
}

impl serde::Serialize for RecordId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for RecordId {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Self::parse(&encoded).map_err(serde::de::Error::custom)
    }
}

/// Replaces `-` with `_` in a derived dataset id, preserving the
/// [`RecordId::parse`] split invariant.
pub fn sanitize_dataset_id(raw: &str) -> String {
    raw.replace('-', "_")
}
