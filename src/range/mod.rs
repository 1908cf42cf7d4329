//! Per-domain range documents and the shared parse/serialize driver.
//!
//! Each document owns the parsed, merged state for one numeric domain:
//!
//! - [`IpRange`]: IPv4/IPv6 addresses, CIDR and explicit ranges
//! - [`PortRange`]: ports and well-known service names
//! - [`ProtoRange`]: IP protocol numbers and IANA names
//! - [`DirRange`]: traffic directions (flag set)
//! - [`AreaRange`]: traffic-origin areas (flag set)
//!
//! Parsing is atomic per call: `from_text` clears prior state first, stops
//! at the first malformed line and records it in the document's
//! [`ParseOutcome`]. There is no partial or streaming state across calls.

pub mod area;
pub mod dir;
pub mod ip;
pub mod port;
pub mod proto;

pub use area::AreaRange;
pub use dir::DirRange;
pub use ip::IpRange;
pub use port::PortRange;
pub use proto::ProtoRange;

use crate::error::{LineError, ParseError, ParseOutcome};

/// Line-oriented parse/serialize contract shared by all range documents.
///
/// Implementors provide per-line parsing and serialization; the provided
/// methods drive the whole-document flow: line splitting, blank/comment
/// skipping, fail-fast error recording and canonical text assembly.
pub trait RangeText {
    /// Drops all parsed state and any recorded error.
    fn clear(&mut self);

    /// True iff every per-kind collection is empty.
    fn is_empty(&self) -> bool;

    /// Result of the last `from_text`/`from_lines` call.
    fn outcome(&self) -> &ParseOutcome;

    #[doc(hidden)]
    fn outcome_mut(&mut self) -> &mut ParseOutcome;

    /// Parses one trimmed, non-blank, non-comment line.
    fn parse_line(&mut self, line: &str) -> Result<(), LineError>;

    /// Runs after the last line parsed successfully (merge/sort step).
    fn finalize(&mut self, sort: bool) {
        let _ = sort;
    }

    /// Appends the canonical text lines, one entry per line, in the fixed
    /// documented order.
    fn append_lines(&self, lines: &mut Vec<String>);

    /// Replaces the document with the parsed form of `text`.
    ///
    /// Returns `false` on the first malformed line; the error is available
    /// through [`error_line_no`](Self::error_line_no) and friends.
    fn from_text(&mut self, text: &str) -> bool {
        self.from_lines(text, true)
    }

    /// As [`from_text`](Self::from_text), with an explicit sort request.
    ///
    /// Only domains without an inherent order are affected (the IPv6
    /// insertion-order path); merged domains always come out sorted.
    fn from_lines(&mut self, text: &str, sort: bool) -> bool {
        self.clear();

        let mut line_no = 0;
        for line in text.lines() {
            line_no += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                // commented line
                continue;
            }

            if let Err(mut error) = self.parse_line(trimmed) {
                error.append_details(&format!("line='{trimmed}'"));
                tracing::debug!(line_no, %error, "range line rejected");
                self.outcome_mut().set(ParseError {
                    line_no,
                    source: error,
                });
                return false;
            }
        }

        self.finalize(sort);
        true
    }

    /// Serializes the canonical merged state, one entry per line, with a
    /// trailing newline after the last entry.
    fn to_text(&self) -> String {
        let mut lines = Vec::new();
        self.append_lines(&mut lines);

        let mut text = String::new();
        for line in &lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    /// 1-based line number of the first error, 0 when there is none.
    fn error_line_no(&self) -> usize {
        self.outcome().line_no()
    }

    /// Short human-readable phrase for the first error.
    fn error_message(&self) -> String {
        self.outcome().message()
    }

    /// Offending tokens of the first error, including the raw line.
    fn error_details(&self) -> String {
        self.outcome().details()
    }
}
