//! Reading CSV text from a file path or standard input.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Where a dataset's text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvSource {
    Stdin,
    File(PathBuf),
}

impl CsvSource {
    /// `-` selects stdin, anything else is a file path.
    pub fn from_arg(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdin
        } else {
            Self::File(path.to_path_buf())
        }
    }

    /// Filename used in diagnostics and rendered output.
    pub fn filename(&self) -> String {
        match self {
            Self::Stdin => "-".to_string(),
            Self::File(path) => path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or_default()
                .to_string(),
        }
    }

    /// Filename without its extension.
    pub fn basename(&self) -> String {
        match self {
            Self::Stdin => "stdin".to_string(),
            Self::File(path) => path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or_default()
                .to_string(),
        }
    }

    /// Source path as given, when there is one.
    pub fn path_string(&self) -> Option<String> {
        match self {
            Self::Stdin => None,
            Self::File(path) => Some(path.display().to_string()),
        }
    }
}

/// Reads the raw bytes of a source. Stdin is read to end.
pub fn read_bytes(source: &CsvSource) -> Result<Vec<u8>> {
    match source {
        CsvSource::Stdin => {
            let mut buffer = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buffer)
                .map_err(IngestError::StdinRead)?;
            Ok(buffer)
        }
        CsvSource::File(path) => std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IngestError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                IngestError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        }),
    }
}

/// Decodes source bytes, optionally through a named code page.
///
/// Without an explicit encoding the bytes must be valid UTF-8 (a BOM is
/// tolerated). With one, the label is resolved through the WHATWG
/// encoding registry, so `shift_jis`, `cp932`, `euc-jp` and friends all
/// work. Malformed content in the chosen encoding fails the source.
pub fn decode_text(bytes: &[u8], encoding: Option<&str>, source: &CsvSource) -> Result<String> {
    let codec = match encoding {
        None => encoding_rs::UTF_8,
        Some(label) => encoding_rs::Encoding::for_label(label.as_bytes()).ok_or_else(|| {
            IngestError::UnknownEncoding {
                label: label.to_string(),
            }
        })?,
    };
    // BOM sniffing may swap the actual encoding (e.g. a UTF-16 BOM).
    let (text, used, had_errors) = codec.decode(bytes);
    if had_errors {
        return Err(IngestError::Decode {
            filename: source.filename(),
            encoding: used.name().to_string(),
        });
    }
    Ok(text.into_owned())
}
