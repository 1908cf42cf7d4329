//! IPv4/IPv6 address range document.
//!
//! Input lines: `a.b.c.d`, `a.b.c.d/N`, `a.b.c.d-a.b.c.d`, `addr`,
//! `[addr]/N`, `addr-addr`. CIDR notation is an input convenience only;
//! canonical output always renders explicit `from-to` pairs.
//!
//! IPv4 entries accumulate into an ordered interval map and are swept into
//! a minimal merged set. IPv6 entries go straight into per-kind arrays (the
//! consumer's IPv6 sets are small), optionally sorted by the caller.

use crate::addr::{
    IP4_BITS, IP6_BITS, Ip6, apply_ip4_mask, apply_ip6_mask, ip4_to_text, ip6_to_text,
    text_to_ip4, text_to_ip6,
};
use crate::capacity;
use crate::error::{LineError, LineErrorKind, ParseOutcome};
use crate::merge::{Pair, RangeAccumulator};
use crate::parse::{SplitLine, split_ip_line};
use crate::range::RangeText;

/// An inclusive IPv4 interval.
pub type Ip4Pair = Pair<u32>;
/// An inclusive IPv6 interval.
pub type Ip6Pair = Pair<Ip6>;

/// Address range document for both families.
#[derive(Debug, Clone)]
pub struct IpRange {
    outcome: ParseOutcome,
    /// Prefix length applied when the mask token is absent.
    empty_net_mask: u32,

    acc4: RangeAccumulator<u32>,
    ip4: Vec<u32>,
    pair4: Vec<Ip4Pair>,

    ip6: Vec<Ip6>,
    pair6: Vec<Ip6Pair>,
}

impl Default for IpRange {
    fn default() -> Self {
        Self {
            outcome: ParseOutcome::default(),
            empty_net_mask: IP4_BITS,
            acc4: RangeAccumulator::default(),
            ip4: Vec::new(),
            pair4: Vec::new(),
            ip6: Vec::new(),
            pair6: Vec::new(),
        }
    }
}

impl IpRange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prefix length used for the "empty net mask" form
    /// (`a.b.c.d` with no separator). Defaults to 32, a single address.
    pub fn set_empty_net_mask(&mut self, nbits: u32) {
        debug_assert!(nbits <= IP4_BITS);
        self.empty_net_mask = nbits;
    }

    pub fn empty_net_mask(&self) -> u32 {
        self.empty_net_mask
    }

    /// Merged IPv4 singletons, ascending.
    pub fn ip4(&self) -> &[u32] {
        &self.ip4
    }

    /// Merged IPv4 pairs, disjoint, non-adjacent, ascending by `from`.
    pub fn pair4(&self) -> &[Ip4Pair] {
        &self.pair4
    }

    /// IPv6 singletons.
    pub fn ip6(&self) -> &[Ip6] {
        &self.ip6
    }

    /// IPv6 pairs.
    pub fn pair6(&self) -> &[Ip6Pair] {
        &self.pair6
    }

    /// Whether the entry counts fit the downstream consumer buffer.
    pub fn check_size(&self) -> bool {
        capacity::check_addr_counts(
            self.ip4.len(),
            self.pair4.len(),
            self.ip6.len(),
            self.pair6.len(),
        )
    }

    /// Exact byte count [`write_to`](Self::write_to) would produce.
    pub fn size_to_write(&self) -> usize {
        capacity::addr_list_size(
            self.ip4.len(),
            self.pair4.len(),
            self.ip6.len(),
            self.pair6.len(),
        )
    }

    /// Serializes the address list into the consumer layout.
    ///
    /// Little-endian u32 count header (ip4, pair4, ip6, pair6), then packed
    /// IPv4 singles, IPv4 pairs, IPv6 singles and IPv6 pairs; addresses in
    /// network byte order, IPv6 as four big-endian words.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        // Counts are bounded by the capacity ceiling, far below u32::MAX.
        debug_assert!(self.check_size());

        out.reserve(self.size_to_write());

        for count in [
            self.ip4.len(),
            self.pair4.len(),
            self.ip6.len(),
            self.pair6.len(),
        ] {
            let count = u32::try_from(count).unwrap_or(u32::MAX);
            out.extend_from_slice(&count.to_le_bytes());
        }

        for &ip in &self.ip4 {
            out.extend_from_slice(&ip.to_be_bytes());
        }
        for pair in &self.pair4 {
            out.extend_from_slice(&pair.from.to_be_bytes());
            out.extend_from_slice(&pair.to.to_be_bytes());
        }
        for &ip in &self.ip6 {
            out.extend_from_slice(&ip.octets());
        }
        for pair in &self.pair6 {
            out.extend_from_slice(&pair.from.octets());
            out.extend_from_slice(&pair.to.octets());
        }
    }

    fn parse_ip4(&mut self, split: &SplitLine<'_>) -> Result<(), LineError> {
        let Some(from) = text_to_ip4(split.value) else {
            return Err(LineError::new(
                LineErrorKind::BadAddress,
                format!("IPv4 ip='{}'", split.value),
            ));
        };

        let to = match split.sep {
            // e.g. "127.0.0.0-127.255.255.255"
            Some('-') => {
                let Some(to) = text_to_ip4(split.second) else {
                    return Err(LineError::new(
                        LineErrorKind::BadAddress2,
                        format!("IPv4 ip='{}'", split.second),
                    ));
                };
                if from > to {
                    return Err(LineError::new(
                        LineErrorKind::BadRange,
                        format!("IPv4 from='{}' to='{}'", split.value, split.second),
                    ));
                }
                to
            }
            // e.g. "127.0.0.0/24", "127.0.0.0"
            _ => {
                let nbits = self.parse_prefix(split.second, self.empty_net_mask, IP4_BITS)?;
                apply_ip4_mask(from, nbits)
            }
        };

        self.acc4.insert(from, to);
        Ok(())
    }

    fn parse_ip6(&mut self, split: &SplitLine<'_>) -> Result<(), LineError> {
        let Some(from) = text_to_ip6(split.value) else {
            return Err(LineError::new(
                LineErrorKind::BadAddress,
                format!("IPv6 ip='{}'", split.value),
            ));
        };

        match split.sep {
            // e.g. "::1 - ::2"
            Some('-') => {
                let Some(to) = text_to_ip6(split.second) else {
                    return Err(LineError::new(
                        LineErrorKind::BadAddress2,
                        format!("IPv6 ip='{}'", split.second),
                    ));
                };
                if from > to {
                    return Err(LineError::new(
                        LineErrorKind::BadRange,
                        format!("IPv6 from='{}' to='{}'", split.value, split.second),
                    ));
                }
                self.pair6.push(Pair::new(from, to));
            }
            // e.g. "::1/24"
            Some(_) => {
                let nbits = self.parse_prefix(split.second, IP6_BITS, IP6_BITS)?;
                if nbits == IP6_BITS {
                    // A /128 block is the address itself, not a pair.
                    self.ip6.push(from);
                } else {
                    self.pair6.push(Pair::new(from, apply_ip6_mask(from, nbits)));
                }
            }
            None => self.ip6.push(from),
        }
        Ok(())
    }

    fn parse_prefix(&self, mask: &str, empty: u32, max_bits: u32) -> Result<u32, LineError> {
        if mask.is_empty() {
            return Ok(empty);
        }
        match mask.parse::<i64>() {
            Ok(nbits) if (0..=i64::from(max_bits)).contains(&nbits) => {
                #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
                let nbits = nbits as u32;
                Ok(nbits)
            }
            Ok(nbits) => Err(LineError::new(
                LineErrorKind::BadMask,
                format!("mask='{mask}' nbits='{nbits}'"),
            )),
            Err(_) => Err(LineError::new(
                LineErrorKind::BadMask,
                format!("mask='{mask}'"),
            )),
        }
    }
}

impl RangeText for IpRange {
    fn clear(&mut self) {
        self.outcome.clear();
        self.acc4.clear();
        self.ip4.clear();
        self.pair4.clear();
        self.ip6.clear();
        self.pair6.clear();
    }

    fn is_empty(&self) -> bool {
        self.ip4.is_empty() && self.pair4.is_empty() && self.ip6.is_empty() && self.pair6.is_empty()
    }

    fn outcome(&self) -> &ParseOutcome {
        &self.outcome
    }

    fn outcome_mut(&mut self) -> &mut ParseOutcome {
        &mut self.outcome
    }

    fn parse_line(&mut self, line: &str) -> Result<(), LineError> {
        let Some(split) = split_ip_line(line) else {
            return Err(LineError::new(LineErrorKind::BadFormat, String::new()));
        };

        if split.is_inconsistent() {
            return Err(LineError::new(
                LineErrorKind::BadMaskFormat,
                format!(
                    "ip='{}' sep='{}' mask='{}'",
                    split.value,
                    split.sep.map_or(String::new(), String::from),
                    split.second
                ),
            ));
        }

        if split.value.contains(':') {
            self.parse_ip6(&split)
        } else {
            self.parse_ip4(&split)
        }
    }

    fn finalize(&mut self, sort: bool) {
        (self.ip4, self.pair4) = self.acc4.merge();

        if sort {
            self.ip6.sort_unstable();
            self.pair6.sort_unstable_by_key(|pair| pair.from);
        }

        tracing::debug!(
            ip4 = self.ip4.len(),
            pair4 = self.pair4.len(),
            ip6 = self.ip6.len(),
            pair6 = self.pair6.len(),
            "ip range compiled"
        );
    }

    fn append_lines(&self, lines: &mut Vec<String>) {
        for &ip in &self.ip4 {
            lines.push(ip4_to_text(ip));
        }
        for pair in &self.pair4 {
            lines.push(format!("{}-{}", ip4_to_text(pair.from), ip4_to_text(pair.to)));
        }
        for &ip in &self.ip6 {
            lines.push(ip6_to_text(ip));
        }
        for pair in &self.pair6 {
            lines.push(format!("{}-{}", ip6_to_text(pair.from), ip6_to_text(pair.to)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addr;

    #[test]
    fn test_single_address() {
        let mut range = IpRange::new();
        assert!(range.from_text("172.16.0.1/32"));
        assert_eq!(range.to_text(), "172.16.0.1\n");
        assert_eq!(range.ip4(), &[addr::text_to_ip4("172.16.0.1").unwrap()]);
        assert!(range.pair4().is_empty());
    }

    #[test]
    fn test_zero_prefix_spans_whole_space() {
        let mut range = IpRange::new();
        assert!(range.from_text("172.16.0.1/0"));
        assert_eq!(range.to_text(), "172.16.0.1-255.255.255.255\n");
    }

    #[test]
    fn test_simple_ranges() {
        let mut range = IpRange::new();
        assert!(range.from_text(
            "127.0.0.1\n\
             172.16.0.0/20\n\
             192.168.0.0 - 192.168.255.255\n"
        ));
        assert_eq!(range.error_line_no(), 0);
        assert_eq!(range.ip4().len(), 1);
        assert_eq!(range.pair4().len(), 2);

        assert_eq!(range.ip4()[0], text_to_ip4("127.0.0.1").unwrap());
        assert_eq!(
            range.pair4()[0],
            Pair::new(
                text_to_ip4("172.16.0.0").unwrap(),
                text_to_ip4("172.16.15.255").unwrap()
            )
        );
        assert_eq!(
            range.pair4()[1],
            Pair::new(
                text_to_ip4("192.168.0.0").unwrap(),
                text_to_ip4("192.168.255.255").unwrap()
            )
        );
    }

    #[test]
    fn test_merge_touching_ranges() {
        let mut range = IpRange::new();
        assert!(range.from_text(
            "10.0.0.0 - 10.0.0.255\n\
             10.0.0.64 - 10.0.0.128\n\
             10.0.0.128 - 10.0.2.0\n"
        ));
        assert!(range.ip4().is_empty());
        assert_eq!(
            range.pair4(),
            &[Pair::new(
                text_to_ip4("10.0.0.0").unwrap(),
                text_to_ip4("10.0.2.0").unwrap()
            )]
        );
    }

    #[test]
    fn test_bad_lines_report_line_one() {
        let mut range = IpRange::new();

        assert!(!range.from_text("172.16.0.0/33"));
        assert_eq!(range.error_line_no(), 1);
        assert_eq!(range.error_message(), "Bad mask");

        assert!(!range.from_text("172.16.0.255/-16"));
        assert_eq!(range.error_line_no(), 1);
        assert_eq!(range.error_message(), "Bad mask");

        assert!(!range.from_text("10.0.0.32 - 10.0.0.24"));
        assert_eq!(range.error_line_no(), 1);
        assert_eq!(range.error_message(), "Bad range");
        assert!(range.error_details().contains("line='10.0.0.32 - 10.0.0.24'"));
    }

    #[test]
    fn test_error_line_number_counts_blank_and_comment_lines() {
        let mut range = IpRange::new();
        assert!(!range.from_text("# header\n\n10.0.0.1\nbad line\n"));
        assert_eq!(range.error_line_no(), 4);
    }

    #[test]
    fn test_separator_mask_mismatch() {
        let mut range = IpRange::new();
        assert!(!range.from_text("1.2.3.4/"));
        assert_eq!(range.error_message(), "Bad mask");

        assert!(!range.from_text("1.2.3.4 24"));
        assert_eq!(range.error_message(), "Bad mask");
    }

    #[test]
    fn test_ip6_prefix_forms() {
        let mut range = IpRange::new();

        assert!(!range.from_text("::1/129"));
        assert!(!range.from_text("::1/-16"));
        assert_eq!(range.error_line_no(), 1);

        assert!(range.from_text("::1/128"));
        assert_eq!(range.to_text(), "::1\n");

        assert!(range.from_text("2002::/16"));
        assert_eq!(
            range.to_text(),
            "2002::-2002:ffff:ffff:ffff:ffff:ffff:ffff:ffff\n"
        );
    }

    #[test]
    fn test_ip6_bracketed_pairs_sorted_by_from() {
        let mut range = IpRange::new();
        assert!(range.from_text("[::2]/126\n[::1]/126\n"));
        assert_eq!(range.to_text(), "::1-::3\n::2-::3\n");
    }

    #[test]
    fn test_ip6_insertion_order_kept_without_sort() {
        let mut range = IpRange::new();
        assert!(range.from_lines("[::2]/126\n[::1]/126\n", false));
        assert_eq!(range.to_text(), "::2-::3\n::1-::3\n");
    }

    #[test]
    fn test_ip6_explicit_range_checks_order() {
        let mut range = IpRange::new();
        assert!(range.from_text("::1 - ::2"));
        assert_eq!(range.to_text(), "::1-::2\n");

        assert!(!range.from_text("::2 - ::1"));
        assert_eq!(range.error_message(), "Bad range");
    }

    #[test]
    fn test_empty_net_mask_default() {
        let mut range = IpRange::new();
        range.set_empty_net_mask(24);
        assert!(range.from_text("10.0.0.0"));
        assert_eq!(range.to_text(), "10.0.0.0-10.0.0.255\n");
    }

    #[test]
    fn test_clear_between_parses() {
        let mut range = IpRange::new();
        assert!(range.from_text("10.0.0.1\n::1\n"));
        assert!(!range.is_empty());
        assert!(range.from_text("192.168.0.1"));
        assert_eq!(range.to_text(), "192.168.0.1\n");
        assert!(range.ip6().is_empty());
    }

    #[test]
    fn test_write_matches_size_contract() {
        let mut range = IpRange::new();
        assert!(range.from_text(
            "127.0.0.1\n\
             172.16.0.0/20\n\
             ::1\n\
             [::2]/126\n"
        ));

        let mut buf = Vec::new();
        range.write_to(&mut buf);
        assert_eq!(buf.len(), range.size_to_write());

        // Header: 1 ip4, 1 pair4, 1 ip6, 1 pair6
        assert_eq!(&buf[0..4], &1u32.to_le_bytes());
        assert_eq!(&buf[4..8], &1u32.to_le_bytes());
        assert_eq!(&buf[8..12], &1u32.to_le_bytes());
        assert_eq!(&buf[12..16], &1u32.to_le_bytes());
        // First payload entry: 127.0.0.1 in network order
        assert_eq!(&buf[16..20], &[127, 0, 0, 1]);
    }

    #[test]
    fn test_write_header_counts_are_exact() {
        let mut range = IpRange::new();
        assert!(range.from_text(
            "127.0.0.1\n\
             8.8.8.8\n\
             172.16.0.0/20\n\
             ::1\n\
             ::2\n\
             ::5\n\
             [2002::]/16\n"
        ));
        assert!(range.check_size());

        let mut buf = Vec::new();
        range.write_to(&mut buf);

        let counts = [
            range.ip4().len(),
            range.pair4().len(),
            range.ip6().len(),
            range.pair6().len(),
        ];
        for (i, count) in counts.into_iter().enumerate() {
            let field = &buf[i * 4..i * 4 + 4];
            assert_eq!(field, &u32::try_from(count).unwrap().to_le_bytes());
        }
    }

    #[test]
    fn test_check_size_on_small_document() {
        let mut range = IpRange::new();
        assert!(range.from_text("10.0.0.0/8"));
        assert!(range.check_size());
        assert_eq!(
            range.size_to_write(),
            capacity::ADDR_LIST_HEADER_SIZE + 8
        );
    }
}
