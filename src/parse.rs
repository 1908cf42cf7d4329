//! Single-line splitting and token resolution.
//!
//! Every domain shares the same line shape: a value, an optional separator
//! (`-`, and `/` for the IP domain) and an optional second value. The split
//! deliberately does not judge consistency — whether a separator without a
//! second token (or the reverse) is an error belongs to the document,
//! which owns the error taxonomy.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{LineError, LineErrorKind};
use crate::tables::{self, ProtocolType};

/// A line split into value, separator and second value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SplitLine<'a> {
    pub value: &'a str,
    pub sep: Option<char>,
    pub second: &'a str,
}

impl SplitLine<'_> {
    /// True when separator presence disagrees with second-value presence.
    pub fn is_inconsistent(&self) -> bool {
        self.sep.is_none() != self.second.is_empty()
    }
}

static IP_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[?([A-Fa-f0-9:.]+)\]?\s*([/-]?)\s*(\S*)").expect("static pattern")
});

static VALUE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^\s-]+)\s*(-?)\s*(\S*)").expect("static pattern"));

fn capture_split<'a>(re: &Regex, line: &'a str) -> Option<SplitLine<'a>> {
    let caps = re.captures(line)?;
    let sep = caps.get(2).map_or("", |m| m.as_str()).chars().next();
    Some(SplitLine {
        value: caps.get(1).map_or("", |m| m.as_str()),
        sep,
        second: caps.get(3).map_or("", |m| m.as_str()),
    })
}

/// Splits an IP-domain line: `addr`, `[addr]/N`, `addr-addr`, `addr/N`.
///
/// Bracketed IPv6 literals are unwrapped; separators are `/` and `-`.
pub(crate) fn split_ip_line(line: &str) -> Option<SplitLine<'_>> {
    capture_split(&IP_LINE_RE, line)
}

/// Splits a value-domain (port/protocol) line: `x` or `x-y`.
///
/// The value may carry punctuation (`TP++`, `A/N`, `AX.25`); only `-`
/// separates, so symbolic names never contain it.
pub(crate) fn split_value_line(line: &str) -> Option<SplitLine<'_>> {
    capture_split(&VALUE_LINE_RE, line)
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn unresolved(token: &str, second: bool, what: &str) -> LineError {
    // Numeric tokens that fail to parse are bad values; unknown symbolic
    // names fall under the mask taxonomy.
    let kind = if is_numeric(token) {
        if second {
            LineErrorKind::BadAddress2
        } else {
            LineErrorKind::BadAddress
        }
    } else {
        LineErrorKind::BadMask
    };
    LineError::new(kind, format!("{what}='{token}'"))
}

/// Resolves a port token: a plain integer or a well-known service name.
pub(crate) fn resolve_port_token(
    token: &str,
    filter: ProtocolType,
    second: bool,
) -> Result<u16, LineError> {
    token
        .parse::<u16>()
        .ok()
        .or_else(|| tables::service_to_port(token, filter))
        .ok_or_else(|| unresolved(token, second, "port"))
}

/// Resolves a protocol token: a plain integer or an IANA protocol name.
pub(crate) fn resolve_proto_token(token: &str, second: bool) -> Result<u8, LineError> {
    token
        .parse::<u8>()
        .ok()
        .or_else(|| tables::protocol_number(token))
        .ok_or_else(|| unresolved(token, second, "proto"))
}
