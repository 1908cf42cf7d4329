//! Error types for the range compiler.
//!
//! Parsing is fail-fast: the first malformed line aborts the whole
//! `from_text` call and is retained as a [`ParseError`] in the document's
//! [`ParseOutcome`]. The error carries a short human-readable phrase, a
//! detail string embedding the offending tokens, and the 1-based line
//! number so callers can highlight the exact source line.

use thiserror::Error;

/// Reason a single input line failed to parse.
///
/// All of these are data-validation errors, never process-fatal. `BadMask`
/// and `BadMaskFormat` share the same user-facing phrase but are distinct
/// conditions: the former is an out-of-range prefix or an unresolvable
/// symbolic name, the latter a separator/second-token presence mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LineErrorKind {
    /// Line does not match the expected token grammar.
    #[error("Bad format")]
    BadFormat,

    /// First address or number token is unparsable.
    #[error("Bad address")]
    BadAddress,

    /// Second address or number token is unparsable.
    #[error("Bad second address")]
    BadAddress2,

    /// Separator and mask/second-token presence disagree.
    #[error("Bad mask")]
    BadMaskFormat,

    /// Mask/prefix outside the domain's bit width, or an unknown name.
    #[error("Bad mask")]
    BadMask,

    /// Resolved `from > to`.
    #[error("Bad range")]
    BadRange,
}

/// Failure of a single input line, before the line number is known.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {details}")]
pub struct LineError {
    pub kind: LineErrorKind,
    /// Raw offending tokens, e.g. `IPv4 mask='33' nbits='33'`.
    pub details: String,
}

impl LineError {
    pub fn new(kind: LineErrorKind, details: impl Into<String>) -> Self {
        Self {
            kind,
            details: details.into(),
        }
    }

    /// Appends a detail fragment, space-separated.
    pub(crate) fn append_details(&mut self, fragment: &str) {
        if self.details.is_empty() {
            self.details.push_str(fragment);
        } else {
            self.details.push(' ');
            self.details.push_str(fragment);
        }
    }
}

/// First failure encountered while parsing a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line_no}: {source}")]
pub struct ParseError {
    /// 1-based line number of the offending line.
    pub line_no: usize,
    #[source]
    pub source: LineError,
}

/// Result of the last `from_text` call on a document.
///
/// Only the first error is retained; a successful parse clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    error: Option<ParseError>,
}

impl ParseOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// 1-based line number of the first error, 0 when there is none.
    pub fn line_no(&self) -> usize {
        self.error.as_ref().map_or(0, |e| e.line_no)
    }

    /// Short human-readable phrase, empty when there is no error.
    pub fn message(&self) -> String {
        self.error
            .as_ref()
            .map_or_else(String::new, |e| e.source.kind.to_string())
    }

    /// Raw offending tokens, empty when there is no error.
    pub fn details(&self) -> String {
        self.error
            .as_ref()
            .map_or_else(String::new, |e| e.source.details.clone())
    }

    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    pub(crate) fn clear(&mut self) {
        self.error = None;
    }

    pub(crate) fn set(&mut self, error: ParseError) {
        self.error = Some(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_messages() {
        assert_eq!(LineErrorKind::BadFormat.to_string(), "Bad format");
        assert_eq!(LineErrorKind::BadAddress.to_string(), "Bad address");
        assert_eq!(
            LineErrorKind::BadAddress2.to_string(),
            "Bad second address"
        );
        assert_eq!(LineErrorKind::BadMask.to_string(), "Bad mask");
        assert_eq!(LineErrorKind::BadMaskFormat.to_string(), "Bad mask");
        assert_eq!(LineErrorKind::BadRange.to_string(), "Bad range");
    }

    #[test]
    fn test_outcome_empty() {
        let outcome = ParseOutcome::default();
        assert!(outcome.is_ok());
        assert_eq!(outcome.line_no(), 0);
        assert_eq!(outcome.message(), "");
        assert_eq!(outcome.details(), "");
    }

    #[test]
    fn test_outcome_first_error() {
        let mut outcome = ParseOutcome::default();
        outcome.set(ParseError {
            line_no: 3,
            source: LineError::new(LineErrorKind::BadMask, "IPv4 mask='33' nbits='33'"),
        });
        assert!(!outcome.is_ok());
        assert_eq!(outcome.line_no(), 3);
        assert_eq!(outcome.message(), "Bad mask");
        assert!(outcome.details().contains("nbits='33'"));
    }

    #[test]
    fn test_append_details() {
        let mut err = LineError::new(LineErrorKind::BadAddress, "IPv4 ip='1.2.3'");
        err.append_details("line='1.2.3'");
        assert_eq!(err.details, "IPv4 ip='1.2.3' line='1.2.3'");

        let mut empty = LineError::new(LineErrorKind::BadFormat, "");
        empty.append_details("line='???'");
        assert_eq!(empty.details, "line='???'");
    }
}
