//! Spreadsheet-style column letters and their zero-based indices.

use crate::error::{ModelError, Result};

/// Type constraint attached to a selected column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Int,
    Float,
}

impl TypeTag {
    /// Parses one filter tag, case-insensitively.
    ///
    /// Empty and unrecognized tags carry no constraint.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            _ => None,
        }
    }
}

/// A column position resolved from letter notation, with its optional
/// type annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef {
    pub index: usize,
    pub type_tag: Option<TypeTag>,
}

/// Resolves `A`..`Z`, `AA`..`ZZ` to a zero-based index, case-insensitively.
///
/// The two-letter form is `(first + 1) * 26 + second`, so `AA` is 26 and
/// `ZZ` is 701. Anything other than one or two ASCII letters fails.
pub fn letters_to_index(letters: &str) -> Result<usize> {
    let invalid = || ModelError::InvalidColumnLetters(letters.to_string());
    let mut chars = letters.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(c), None, _) => alpha_index(c).ok_or_else(invalid),
        (Some(first), Some(second), None) => {
            let n0 = alpha_index(first).ok_or_else(invalid)?;
            let n1 = alpha_index(second).ok_or_else(invalid)?;
            Ok((n0 + 1) * 26 + n1)
        }
        _ => Err(invalid()),
    }
}

fn alpha_index(c: char) -> Option<usize> {
    c.is_ascii_alphabetic()
        .then(|| c.to_ascii_uppercase() as usize - 'A' as usize)
}

/// Renders a zero-based index back to letter notation.
///
/// The first character of a two-letter rendering is `'@'`-relative
/// (`index / 26 + 0x40`), which inverts [`letters_to_index`] only for
/// indices up to 701 (`ZZ`), the whole range the parser can produce.
/// Kept exactly as-is for output compatibility.
pub fn index_to_letters(index: usize) -> String {
    if index >= 26 {
        let first = char::from_u32((index / 26 + 0x40) as u32).unwrap_or('?');
        let second = char::from_u32((index % 26 + 0x41) as u32).unwrap_or('?');
        format!("{first}{second}")
    } else {
        char::from(b'A' + index as u8).to_string()
    }
}

/// Parses a `LETTERS` or `LETTERS(type)` column spec token.
pub fn parse_column_spec(token: &str) -> Result<ColumnRef> {
    if let Some((letters, tag)) = split_type_suffix(token) {
        Ok(ColumnRef {
            index: letters_to_index(letters)?,
            type_tag: TypeTag::parse(tag),
        })
    } else {
        Ok(ColumnRef {
            index: letters_to_index(token)?,
            type_tag: None,
        })
    }
}

/// Splits `LETTERS(type)` into letters and tag; the tag must be
/// non-empty and alphabetic, otherwise the whole token is letters.
fn split_type_suffix(token: &str) -> Option<(&str, &str)> {
    let rest = token.strip_suffix(')')?;
    let (letters, tag) = rest.rsplit_once('(')?;
    if letters.is_empty() || tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some((letters, tag))
}
