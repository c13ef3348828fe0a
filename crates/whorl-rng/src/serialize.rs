//! Backtick/tilde state-string codec.
//!
//! Every serializable object in whorl emits one canonical string form: a
//! backtick at each end with fields joined by `~` in a fixed declared order,
//! e.g. `` `42~7~19` ``. When routed through a registry the payload is
//! prefixed with the algorithm tag, e.g. ``SplitMix64`42` ``. This module is
//! the single implementation of that format; serde and registry paths are
//! thin translations over it.

use crate::error::RngError;

/// Delimiter at both ends of a state payload.
pub const DELIMITER: char = '`';

/// Field separator inside a state payload.
pub const SEPARATOR: char = '~';

/// Join fields into a delimited payload.
pub fn join_fields(fields: &[String]) -> String {
    let mut out = String::with_capacity(2 + fields.iter().map(|f| f.len() + 1).sum::<usize>());
    out.push(DELIMITER);
    out.push_str(&fields.join("~"));
    out.push(DELIMITER);
    out
}

/// Prefix a delimited payload with an algorithm tag for registry routing.
pub fn tag_payload(tag: &str, payload: &str) -> String {
    format!("{tag}{payload}")
}

/// Split a delimited payload into raw field strings.
///
/// A payload missing either backtick delimiter is a hard error.
pub fn split_fields(text: &str) -> Result<Vec<&str>, RngError> {
    let inner = text
        .strip_prefix(DELIMITER)
        .and_then(|rest| rest.strip_suffix(DELIMITER))
        .ok_or_else(|| RngError::MalformedState(format!("missing delimiter in {text:?}")))?;
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    Ok(inner.split(SEPARATOR).collect())
}

/// Split a tag-prefixed payload into the tag and the delimited payload.
pub fn split_tagged(text: &str) -> Result<(&str, &str), RngError> {
    let start = text
        .find(DELIMITER)
        .ok_or_else(|| RngError::MalformedState(format!("missing delimiter in {text:?}")))?;
    let (tag, payload) = text.split_at(start);
    if !payload.ends_with(DELIMITER) || payload.len() < 2 {
        return Err(RngError::MalformedState(format!(
            "unterminated payload in {text:?}"
        )));
    }
    Ok((tag, payload))
}

/// Parse a u64 field, degrading to 0 on failure (best-effort reconstruction).
pub fn parse_u64(field: &str) -> u64 {
    field.parse().unwrap_or(0)
}

/// Parse an i64 field, degrading to 0 on failure.
pub fn parse_i64(field: &str) -> i64 {
    field.parse().unwrap_or(0)
}

/// Parse an f64 field, degrading to 0.0 on failure.
pub fn parse_f64(field: &str) -> f64 {
    field.parse().unwrap_or(0.0)
}

/// Check that a payload carried the expected field count.
pub fn expect_fields(fields: &[&str], expected: usize) -> Result<(), RngError> {
    if fields.len() == expected {
        Ok(())
    } else {
        Err(RngError::MalformedState(format!(
            "expected {expected} fields, found {}",
            fields.len()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_and_split_roundtrip() {
        let payload = join_fields(&["42".into(), "7".into(), "19".into()]);
        assert_eq!(payload, "`42~7~19`");
        let fields = split_fields(&payload).unwrap();
        assert_eq!(fields, vec!["42", "7", "19"]);
    }

    #[test]
    fn test_empty_payload() {
        assert_eq!(split_fields("``").unwrap(), Vec::<&str>::new());
    }

    #[test]
    fn test_missing_delimiter_is_hard_error() {
        assert!(matches!(
            split_fields("42~7"),
            Err(RngError::MalformedState(_))
        ));
        assert!(matches!(
            split_fields("`42~7"),
            Err(RngError::MalformedState(_))
        ));
        assert!(matches!(
            split_tagged("SplitMix64"),
            Err(RngError::MalformedState(_))
        ));
    }

    #[test]
    fn test_tagged_split() {
        let text = tag_payload("SplitMix64", "`42`");
        let (tag, payload) = split_tagged(&text).unwrap();
        assert_eq!(tag, "SplitMix64");
        assert_eq!(payload, "`42`");
    }

    #[test]
    fn test_numeric_fields_degrade_to_zero() {
        assert_eq!(parse_u64("potato"), 0);
        assert_eq!(parse_i64(""), 0);
        assert_eq!(parse_f64("NaNaNaN"), 0.0);
        assert_eq!(parse_u64("18446744073709551615"), u64::MAX);
    }
}
