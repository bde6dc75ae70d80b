//! The `[<lines>][:<matchers>]` header-hint grammar.

use std::collections::BTreeSet;

use regex::Regex;

use odt_model::{ColumnRef, parse_column_spec};

use crate::error::{Result, SelectError};
use crate::ranges::parse_line_ranges;

/// One per-column matcher from the value-hint list.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// `*<letters>`: a fixed column position, content ignored.
    Position(ColumnRef),
    /// Free text: a regex searched over the candidate's cells.
    Pattern(Regex),
}

/// A parsed `--hint` expression.
#[derive(Debug, Clone, Default)]
pub struct HeaderHint {
    /// Explicit candidate line numbers; `None` means every record.
    pub lines: Option<BTreeSet<u32>>,
    /// Per-column matchers; `None` takes the first existing record.
    pub matchers: Option<Vec<Matcher>>,
}

impl HeaderHint {
    /// Parses a hint, splitting on the first `:`. A string without a
    /// `:` is all value hints; an empty side is absent, not an empty
    /// constraint. Range and pattern errors surface here so a bad hint
    /// fails the whole operation before any record is touched.
    pub fn parse(expr: &str) -> Result<Self> {
        let (lines_part, values_part) = match expr.split_once(':') {
            None => (None, non_empty(expr)),
            Some((lines, values)) => (non_empty(lines), non_empty(values)),
        };
        let lines = lines_part.map(parse_line_ranges).transpose()?;
        let matchers = values_part.map(parse_matchers).transpose()?;
        Ok(Self { lines, matchers })
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

fn parse_matchers(list: &str) -> Result<Vec<Matcher>> {
    list.split(',')
        .map(|token| {
            if let Some(spec) = token.strip_prefix('*') {
                Ok(Matcher::Position(parse_column_spec(spec)?))
            } else {
                let pattern = Regex::new(token).map_err(|source| SelectError::InvalidPattern {
                    pattern: token.to_string(),
                    source,
                })?;
                Ok(Matcher::Pattern(pattern))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(hint: &HeaderHint) -> Vec<u32> {
        hint.lines.as_ref().unwrap().iter().copied().collect()
    }

    #[test]
    fn test_value_hint_only() {
        let hint = HeaderHint::parse("Name,Age").unwrap();
        assert!(hint.lines.is_none());
        assert_eq!(hint.matchers.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_lines_and_values() {
        let hint = HeaderHint::parse("1-3:Name,*B").unwrap();
        assert_eq!(lines(&hint), vec![1, 2, 3]);
        let matchers = hint.matchers.unwrap();
        assert!(matches!(matchers[0], Matcher::Pattern(_)));
        assert!(matches!(
            matchers[1],
            Matcher::Position(ColumnRef { index: 1, .. })
        ));
    }

    #[test]
    fn test_empty_sides_are_absent() {
        let hint = HeaderHint::parse("2:").unwrap();
        assert_eq!(lines(&hint), vec![2]);
        assert!(hint.matchers.is_none());

        let hint = HeaderHint::parse(":Name").unwrap();
        assert!(hint.lines.is_none());
        assert!(hint.matchers.is_some());

        let hint = HeaderHint::parse("").unwrap();
        assert!(hint.lines.is_none());
        assert!(hint.matchers.is_none());
    }

    #[test]
    fn test_only_first_colon_splits() {
        // The value side may itself contain `:` inside a pattern.
        let hint = HeaderHint::parse("1:a:b").unwrap();
        assert_eq!(lines(&hint), vec![1]);
        assert_eq!(hint.matchers.unwrap().len(), 1);
    }

    #[test]
    fn test_position_matcher_carries_type() {
        let hint = HeaderHint::parse("*C(int)").unwrap();
        let matchers = hint.matchers.unwrap();
        let Matcher::Position(column) = &matchers[0] else {
            panic!("expected a position matcher");
        };
        assert_eq!(column.index, 2);
        assert!(column.type_tag.is_some());
    }

    #[test]
    fn test_bad_ranges_fail() {
        assert!(matches!(
            HeaderHint::parse("a-b:Name"),
            Err(SelectError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_bad_pattern_fails() {
        assert!(matches!(
            HeaderHint::parse("(unclosed"),
            Err(SelectError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_bad_column_letters_fail() {
        assert!(matches!(
            HeaderHint::parse("*A1B"),
            Err(SelectError::Column(_))
        ));
    }
}
