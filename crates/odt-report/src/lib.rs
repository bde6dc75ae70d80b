//! Output renderers for projected datasets and detected headers.
//!
//! The renderer set is closed and chosen once at startup; third-party
//! output shapes implement [`Renderer`] and get selected the same way.
//! Diagnostics never pass through here, so rendered output stays
//! machine-parseable.

use std::io::Write;

use thiserror::Error;

use odt_model::{Dataset, index_to_letters};
use odt_select::HeaderMatch;

/// Errors that can occur while writing rendered output.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize dataset: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// The available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Structured dump: metadata plus the ordered record map.
    #[default]
    Json,
    /// One delimited line per record: `id<d>record_id<d>cells...`.
    Delimited,
}

/// Renders a dataset to a writer.
pub trait Renderer {
    fn render_dataset(&self, dataset: &Dataset, out: &mut dyn Write) -> Result<()>;
}

/// Builds the renderer for a format choice.
pub fn renderer_for(format: OutputFormat, delimiter: &str) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Json => Box::new(JsonRenderer),
        OutputFormat::Delimited => Box::new(DelimitedRenderer {
            delimiter: delimiter.to_string(),
        }),
    }
}

/// Pretty-printed JSON dump of the whole dataset.
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render_dataset(&self, dataset: &Dataset, out: &mut dyn Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, dataset)?;
        writeln!(out)?;
        Ok(())
    }
}

/// One delimited line per record, prefixed with the dataset id and the
/// record id for downstream disambiguation.
pub struct DelimitedRenderer {
    pub delimiter: String,
}

impl Renderer for DelimitedRenderer {
    fn render_dataset(&self, dataset: &Dataset, out: &mut dyn Write) -> Result<()> {
        for (id, record) in &dataset.data {
            let mut fields = Vec::with_capacity(record.len() + 2);
            fields.push(dataset.meta.id.clone());
            fields.push(id.to_string());
            fields.extend(record.iter().cloned());
            writeln!(out, "{}", fields.join(&self.delimiter))?;
        }
        Ok(())
    }
}

/// Builds the rendered items for a detected header: filename, 1-based
/// line number, then `LETTER:value` for each resolved column, in
/// matcher order.
pub fn header_items(dataset: &Dataset, header: &HeaderMatch) -> Vec<String> {
    let mut items = vec![
        dataset.meta.filename.clone(),
        header.record_id.line().to_string(),
    ];
    if let Some(record) = dataset.record(&header.record_id) {
        for &index in &header.columns {
            let value = record.get(index).map(String::as_str).unwrap_or_default();
            items.push(format!("{}:{value}", index_to_letters(index)));
        }
    }
    items
}

/// Renders a detected header as one delimited line.
pub fn render_header_line(dataset: &Dataset, header: &HeaderMatch, delimiter: &str) -> String {
    header_items(dataset, header).join(delimiter)
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use odt_model::{DatasetMeta, RecordId};

    use super::*;

    fn dataset() -> Dataset {
        let mut data = IndexMap::new();
        data.insert(
            RecordId::new("pop", 2),
            vec!["Alice".to_string(), "30".to_string()],
        );
        data.insert(
            RecordId::new("pop", 3),
            vec!["Bob".to_string(), "27".to_string()],
        );
        Dataset {
            meta: DatasetMeta {
                id: "pop".to_string(),
                name: None,
                path: Some("data/pop.csv".to_string()),
                filename: "pop.csv".to_string(),
                basename: "pop".to_string(),
            },
            data,
        }
    }

    #[test]
    fn test_delimited_lines() {
        let renderer = DelimitedRenderer {
            delimiter: ",".to_string(),
        };
        let mut out = Vec::new();
        renderer.render_dataset(&dataset(), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "pop,pop-00000002,Alice,30\npop,pop-00000003,Bob,27\n"
        );
    }

    #[test]
    fn test_delimited_custom_delimiter() {
        let renderer = DelimitedRenderer {
            delimiter: "\t".to_string(),
        };
        let mut out = Vec::new();
        renderer.render_dataset(&dataset(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("pop\tpop-00000002\tAlice\t30\n"));
    }

    #[test]
    fn test_json_dump_keeps_record_order() {
        let mut out = Vec::new();
        JsonRenderer.render_dataset(&dataset(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["meta"]["id"], "pop");
        assert_eq!(value["data"]["pop-00000002"][0], "Alice");
        // Line 2 renders before line 3 in the dump.
        let first = text.find("pop-00000002").unwrap();
        let second = text.find("pop-00000003").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_header_items() {
        let ds = dataset();
        let header = HeaderMatch {
            record_id: RecordId::new("pop", 2),
            columns: vec![1, 0],
        };
        assert_eq!(
            header_items(&ds, &header),
            vec!["pop.csv", "2", "B:30", "A:Alice"]
        );
    }

    #[test]
    fn test_render_header_line() {
        let ds = dataset();
        let header = HeaderMatch {
            record_id: RecordId::new("pop", 2),
            columns: vec![1, 0],
        };
        assert_eq!(
            render_header_line(&ds, &header, ","),
            "pop.csv,2,B:30,A:Alice"
        );
    }

    #[test]
    fn test_renderer_for_selects_format() {
        let ds = dataset();
        let mut out = Vec::new();
        renderer_for(OutputFormat::Delimited, ";")
            .render_dataset(&ds, &mut out)
            .unwrap();
        assert!(String::from_utf8(out).unwrap().contains("pop;pop-00000002;Alice;30"));
    }
}
