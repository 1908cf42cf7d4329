//! Address-list extraction from downloaded zone texts.
//!
//! Zone sources are rarely clean address lists: looking-glass dumps and
//! registry pages wrap each address in router noise. The extractor applies
//! an optional capture pattern per line (first capture group, or the whole
//! match when the pattern has no group), drops everything else, and
//! computes a SHA-256 checksum of the extracted list so callers can skip
//! recompilation when a re-downloaded zone has not actually changed.

use regex::Regex;
use sha2::{Digest, Sha256};

use crate::addr::IP4_BITS;
use crate::error::ParseError;
use crate::range::{IpRange, RangeText};

/// Extracts and compiles address lists from raw zone text.
#[derive(Debug, Clone)]
pub struct ZoneExtractor {
    pattern: Option<Regex>,
    empty_net_mask: u32,
    sort: bool,
}

impl Default for ZoneExtractor {
    fn default() -> Self {
        Self {
            pattern: None,
            empty_net_mask: IP4_BITS,
            sort: true,
        }
    }
}

impl ZoneExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-line capture pattern.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error for an invalid pattern.
    pub fn set_pattern(&mut self, pattern: &str) -> Result<(), regex::Error> {
        self.pattern = Some(Regex::new(pattern)?);
        Ok(())
    }

    /// Default prefix length for bare addresses in the zone (zones often
    /// list network bases like `10.11.12.0` meaning a /24).
    pub fn set_empty_net_mask(&mut self, nbits: u32) {
        debug_assert!(nbits <= IP4_BITS);
        self.empty_net_mask = nbits;
    }

    /// Whether the compiled IPv6 arrays are sorted.
    pub fn set_sort(&mut self, sort: bool) {
        self.sort = sort;
    }

    /// Extracts the address tokens and the checksum of the extracted list.
    ///
    /// Without a pattern every non-blank line is taken as-is (trimmed).
    /// With a pattern, non-matching lines are skipped silently — noise is
    /// expected, errors are reported by compilation, not extraction.
    pub fn parse_addresses(&self, text: &str) -> (Vec<String>, String) {
        let mut list = Vec::new();

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match &self.pattern {
                Some(re) => {
                    if let Some(caps) = re.captures(trimmed) {
                        let m = caps.get(1).or_else(|| caps.get(0));
                        if let Some(m) = m {
                            list.push(m.as_str().to_string());
                        }
                    }
                }
                None => list.push(trimmed.to_string()),
            }
        }

        let checksum = list_checksum(&list);
        tracing::debug!(addresses = list.len(), %checksum, "zone addresses extracted");
        (list, checksum)
    }

    /// Extracts and compiles the zone into an address range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] of the extracted list.
    pub fn compile(&self, text: &str) -> Result<(IpRange, String), ParseError> {
        let (list, checksum) = self.parse_addresses(text);

        let mut range = IpRange::new();
        range.set_empty_net_mask(self.empty_net_mask);

        if range.from_lines(&list.join("\n"), self.sort) {
            Ok((range, checksum))
        } else {
            // from_lines stores the error before returning false
            let error = range
                .outcome()
                .error()
                .cloned()
                .unwrap_or_else(|| ParseError {
                    line_no: 0,
                    source: crate::error::LineError::new(
                        crate::error::LineErrorKind::BadFormat,
                        String::new(),
                    ),
                });
            Err(error)
        }
    }
}

fn list_checksum(list: &[String]) -> String {
    let mut hasher = Sha256::new();
    for line in list {
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
    }
    format!("{:x}", hasher.finalize())
}
