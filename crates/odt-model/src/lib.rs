pub mod columns;
pub mod dataset;
pub mod error;
pub mod ids;

pub use columns::{ColumnRef, TypeTag, index_to_letters, letters_to_index, parse_column_spec};
pub use dataset::{Dataset, DatasetMeta, Record};
pub use error::{ModelError, Result};
pub use ids::{RecordId, sanitize_dataset_id};
