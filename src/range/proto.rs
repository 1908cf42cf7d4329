//! IP protocol range document.
//!
//! Input lines: a plain integer, an IANA protocol name, or a `-` range of
//! either (`1-128`, `tcp`, `HOPOPT-IPV6_FRAG`). Singletons serialize by
//! name when the number has one (`TCP`); pairs always serialize
//! numerically.

use crate::error::{LineError, LineErrorKind, ParseOutcome};
use crate::merge::{Pair, RangeAccumulator};
use crate::parse::{resolve_proto_token, split_value_line};
use crate::range::RangeText;
use crate::tables;

/// An inclusive protocol-number interval.
pub type ProtoPair = Pair<u8>;

/// Protocol range document.
#[derive(Debug, Clone, Default)]
pub struct ProtoRange {
    outcome: ParseOutcome,

    acc: RangeAccumulator<u8>,
    protocols: Vec<u8>,
    pairs: Vec<ProtoPair>,
}

impl ProtoRange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merged protocol singletons, ascending.
    pub fn protocols(&self) -> &[u8] {
        &self.protocols
    }

    /// Merged protocol pairs, disjoint, non-adjacent, ascending by `from`.
    pub fn pairs(&self) -> &[ProtoPair] {
        &self.pairs
    }
}

impl RangeText for ProtoRange {
    fn clear(&mut self) {
        self.outcome.clear();
        self.acc.clear();
        self.protocols.clear();
        self.pairs.clear();
    }

    fn is_empty(&self) -> bool {
        self.protocols.is_empty() && self.pairs.is_empty()
    }

    fn outcome(&self) -> &ParseOutcome {
        &self.outcome
    }

    fn outcome_mut(&mut self) -> &mut ParseOutcome {
        &mut self.outcome
    }

    fn parse_line(&mut self, line: &str) -> Result<(), LineError> {
        let Some(split) = split_value_line(line) else {
            return Err(LineError::new(LineErrorKind::BadFormat, String::new()));
        };

        if split.is_inconsistent() {
            return Err(LineError::new(
                LineErrorKind::BadMaskFormat,
                format!("proto='{}' second='{}'", split.value, split.second),
            ));
        }

        let from = resolve_proto_token(split.value, false)?;

        let to = if split.sep.is_some() {
            let to = resolve_proto_token(split.second, true)?;
            if from > to {
                return Err(LineError::new(
                    LineErrorKind::BadRange,
                    format!("proto from='{}' to='{}'", split.value, split.second),
                ));
            }
            to
        } else {
            from
        };

        self.acc.insert(from, to);
        Ok(())
    }

    fn finalize(&mut self, _sort: bool) {
        (self.protocols, self.pairs) = self.acc.merge();
        tracing::debug!(
            protocols = self.protocols.len(),
            pairs = self.pairs.len(),
            "protocol range compiled"
        );
    }

    fn append_lines(&self, lines: &mut Vec<String>) {
        for &proto in &self.protocols {
            match tables::protocol_name(proto) {
                Some(name) => lines.push(name.to_string()),
                None => lines.push(proto.to_string()),
            }
        }
        for pair in &self.pairs {
            lines.push(format!("{}-{}", pair.from, pair.to));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_range() {
        let mut range = ProtoRange::new();
        assert!(range.from_text("1-128"));
        assert_eq!(range.to_text(), "1-128\n");
    }

    #[test]
    fn test_leading_separator_fails() {
        let mut range = ProtoRange::new();
        assert!(!range.from_text("-16"));
        assert_eq!(range.error_line_no(), 1);
    }

    #[test]
    fn test_names_serialize_as_names() {
        let mut range = ProtoRange::new();
        assert!(range.from_text("tcp\nudp\n"));
        assert_eq!(range.to_text(), "TCP\nUDP\n");
        assert_eq!(range.protocols(), &[6, 17]);
    }

    #[test]
    fn test_name_ranges_resolve_through_table_order() {
        let mut range = ProtoRange::new();

        assert!(range.from_text("HOPOPT-IPV6_FRAG"));
        assert_eq!(range.to_text(), "0-44\n");

        assert!(range.from_text("TP++-A/N"));
        assert_eq!(range.to_text(), "39-107\n");

        assert!(range.from_text("AX.25-RAWSOCKET"));
        assert_eq!(range.to_text(), "93-255\n");
    }

    #[test]
    fn test_all_common_names_resolve() {
        let mut range = ProtoRange::new();
        assert!(range.from_text(
            "ICMP\n\
             IGMP\n\
             TCP\n\
             UDP\n\
             ICMPv6\n\
             RAWSOCKET\n"
        ));
        // ICMP (1) and IGMP (2) are adjacent and coalesce into a pair.
        assert_eq!(range.protocols(), &[6, 17, 58, 255]);
        assert_eq!(range.pairs(), &[Pair::new(1, 2)]);
        assert_eq!(range.to_text(), "TCP\nUDP\nICMPV6\nRAWSOCKET\n1-2\n");
    }

    #[test]
    fn test_unknown_name_fails() {
        let mut range = ProtoRange::new();
        assert!(!range.from_text("HOPOPT-NOSUCH"));
        assert_eq!(range.error_message(), "Bad mask");
        assert!(range.error_details().contains("proto='NOSUCH'"));
    }

    #[test]
    fn test_unlisted_number_serializes_numerically() {
        let mut range = ProtoRange::new();
        assert!(range.from_text("200"));
        assert_eq!(range.to_text(), "200\n");
    }

    #[test]
    fn test_reversed_name_range_fails() {
        let mut range = ProtoRange::new();
        assert!(!range.from_text("UDP-TCP"));
        assert_eq!(range.error_message(), "Bad range");
    }
}
