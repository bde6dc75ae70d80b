//! Comma-separated line-number lists and inclusive ranges.

use std::collections::BTreeSet;

use crate::error::{Result, SelectError};

/// Parses `"1-5,8,10-12"` into a deduplicated set of line numbers.
///
/// Each token is a single integer or an inclusive `min-max` range. Any
/// malformed token fails the whole expression. An inverted range
/// (`3-1`) is degenerate and contributes nothing.
pub fn parse_line_ranges(expr: &str) -> Result<BTreeSet<u32>> {
    let invalid = || SelectError::InvalidRange(expr.to_string());
    let mut lines = BTreeSet::new();
    for token in expr.split(',') {
        let parts: Vec<&str> = token.trim().split('-').collect();
        match parts[..] {
            [single] => {
                lines.insert(single.trim().parse().map_err(|_| invalid())?);
            }
            [min, max] => {
                let min: u32 = min.trim().parse().map_err(|_| invalid())?;
                let max: u32 = max.trim().parse().map_err(|_| invalid())?;
                lines.extend(min..=max);
            }
            _ => return Err(invalid()),
        }
    }
    Ok(lines)
}
