//! Subcommand runners and errno-style exit classes.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info};

use odt_ingest::{CsvSource, IngestError, ingest_source};
use odt_report::{OutputFormat, render_header_line, renderer_for};
use odt_select::{
    ColumnFilters, ContentPolicy, HeaderHint, SelectError, detect_header, select_columns,
};

use crate::cli::{DetectArgs, ListArgs, SelectArgs};

/// Exit classes mirroring errno-style codes.
pub mod exit {
    pub const OK: i32 = 0;
    pub const FAILURE: i32 = 1;
    /// ENOENT: a requested entry does not exist.
    pub const NO_SUCH_ENTRY: i32 = 2;
    /// EINVAL: a hint or range expression failed to parse, or no
    /// record satisfied the hints.
    pub const INVALID_ARGUMENT: i32 = 22;
}

pub fn run_list(args: &ListArgs) -> Result<i32> {
    let links = odt_crawl::discover_csv_links(&args.url).context("list portal datasets")?;
    for link in &links {
        println!("{}{}{}", link.url, args.delimiter, link.name);
    }
    info!(url = %args.url, count = links.len(), "portal listed");
    Ok(exit::OK)
}

pub fn run_detect(args: &DetectArgs) -> Result<i32> {
    let hint = match parse_hint(args.hint.as_deref()) {
        Ok(hint) => hint,
        Err(code) => return Ok(code),
    };
    let mut status = exit::OK;
    for path in &args.paths {
        let code = detect_file(path, &hint, args);
        if status == exit::OK {
            status = code;
        }
    }
    Ok(status)
}

fn detect_file(path: &Path, hint: &HeaderHint, args: &DetectArgs) -> i32 {
    let source = CsvSource::from_arg(path);
    let dataset = match ingest_source(&source, None, args.encoding.as_deref()) {
        Ok(dataset) => dataset,
        Err(err) => {
            error!("{err}");
            return ingest_code(&err);
        }
    };
    match detect_header(&dataset, hint) {
        Ok(header) => {
            println!("{}", render_header_line(&dataset, &header, &args.delimiter));
            exit::OK
        }
        Err(err) => {
            error!("{err}");
            select_code(&err)
        }
    }
}

pub fn run_select(args: &SelectArgs) -> Result<i32> {
    let hint = match parse_hint(args.hint.as_deref()) {
        Ok(hint) => hint,
        Err(code) => return Ok(code),
    };
    let filters = args
        .types
        .as_deref()
        .map(ColumnFilters::parse)
        .unwrap_or_default();
    let mut status = exit::OK;
    for path in &args.paths {
        let code = select_file(path, &hint, &filters, args)?;
        if status == exit::OK {
            status = code;
        }
    }
    Ok(status)
}

fn select_file(
    path: &Path,
    hint: &HeaderHint,
    filters: &ColumnFilters,
    args: &SelectArgs,
) -> Result<i32> {
    let source = CsvSource::from_arg(path);
    let dataset = match ingest_source(&source, args.prefix.as_deref(), args.encoding.as_deref()) {
        Ok(dataset) => dataset,
        Err(err) => {
            error!("{err}");
            return Ok(ingest_code(&err));
        }
    };

    // Value matchers are what trigger detection; a position-only hint
    // leaves every column selected.
    let columns = if hint.matchers.is_some() {
        match detect_header(&dataset, hint) {
            Ok(header) => Some(header.columns),
            Err(err) => {
                error!("{err}");
                return Ok(select_code(&err));
            }
        }
    } else {
        None
    };

    let policy = if args.strict {
        ContentPolicy::Strict
    } else {
        ContentPolicy::Permissive
    };
    let (selected, _) = select_columns(&dataset, columns.as_deref(), filters, policy);

    let format = if args.csv {
        OutputFormat::Delimited
    } else {
        OutputFormat::Json
    };
    let renderer = renderer_for(format, &args.delimiter);
    let mut stdout = std::io::stdout().lock();
    renderer
        .render_dataset(&selected, &mut stdout)
        .context("write selected records")?;
    Ok(exit::OK)
}

/// Parses the shared `--hint` flag; a bad expression fails the whole
/// run with the invalid-argument class before any file is touched.
fn parse_hint(expr: Option<&str>) -> Result<HeaderHint, i32> {
    match expr {
        None => Ok(HeaderHint::default()),
        Some(expr) => HeaderHint::parse(expr).map_err(|err| {
            error!("{err}");
            exit::INVALID_ARGUMENT
        }),
    }
}

fn ingest_code(err: &IngestError) -> i32 {
    match err {
        IngestError::FileNotFound { .. } => exit::NO_SUCH_ENTRY,
        _ => exit::FAILURE,
    }
}

fn select_code(err: &SelectError) -> i32 {
    match err {
        SelectError::NoSuchRecord { .. } => exit::NO_SUCH_ENTRY,
        _ => exit::INVALID_ARGUMENT,
    }
}
