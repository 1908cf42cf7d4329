//! Address codec: IPv4/IPv6 text ↔ fixed-width numeric form, CIDR masks.
//!
//! IPv4 addresses are plain `u32` values in host numeric order (the dotted
//! quad `a.b.c.d` is the integer `a<<24 | b<<16 | c<<8 | d`). IPv6 addresses
//! are [`Ip6`]: four 32-bit words in network-significant order, each word
//! the big-endian interpretation of its four network-order bytes, so the
//! derived `Ord` is the 128-bit unsigned compare.
//!
//! Text conversion is built on `std::net`: parsing rejects leading-zero
//! octets and multiple `::`, and `Ipv6Addr`'s `Display` yields the RFC 5952
//! shortest compressed form the canonical output grammar requires.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Bit width of an IPv4 address.
pub const IP4_BITS: u32 = 32;
/// Bit width of an IPv6 address.
pub const IP6_BITS: u32 = 128;

/// An IPv6 address as four 32-bit words, most significant word first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ip6(pub [u32; 4]);

impl Ip6 {
    /// The words in network-significant order.
    pub const fn words(self) -> [u32; 4] {
        self.0
    }

    pub fn from_octets(octets: [u8; 16]) -> Self {
        let mut words = [0_u32; 4];
        for (i, word) in words.iter_mut().enumerate() {
            let o = &octets[i * 4..i * 4 + 4];
            *word = u32::from_be_bytes([o[0], o[1], o[2], o[3]]);
        }
        Self(words)
    }

    /// The address bytes in network order.
    pub fn octets(self) -> [u8; 16] {
        let mut octets = [0_u8; 16];
        for (i, word) in self.0.iter().enumerate() {
            octets[i * 4..i * 4 + 4].copy_from_slice(&word.to_be_bytes());
        }
        octets
    }
}

impl From<Ipv6Addr> for Ip6 {
    fn from(addr: Ipv6Addr) -> Self {
        Self::from_octets(addr.octets())
    }
}

impl From<Ip6> for Ipv6Addr {
    fn from(ip: Ip6) -> Self {
        Ipv6Addr::from(ip.octets())
    }
}

impl fmt::Display for Ip6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ipv6Addr::from(*self).fmt(f)
    }
}

/// Parses dotted-decimal IPv4 text.
///
/// Fails unless the text is exactly four dot-separated decimal octets in
/// `[0, 255]` with no leading zeros.
pub fn text_to_ip4(text: &str) -> Option<u32> {
    text.parse::<Ipv4Addr>().ok().map(u32::from)
}

/// Canonical dotted-decimal form, no leading zeros.
pub fn ip4_to_text(ip: u32) -> String {
    Ipv4Addr::from(ip).to_string()
}

/// Parses IPv6 text in standard (optionally `::`-compressed) form.
///
/// Bracket unwrapping is the line parser's concern; this expects a bare
/// address and fails on malformed groups or multiple `::`.
pub fn text_to_ip6(text: &str) -> Option<Ip6> {
    text.parse::<Ipv6Addr>().ok().map(Ip6::from)
}

/// Shortest standard compressed representation (RFC 5952).
pub fn ip6_to_text(ip: Ip6) -> String {
    Ipv6Addr::from(ip).to_string()
}

/// Sets all host bits below the prefix, producing the CIDR block's upper
/// bound.
///
/// `nbits` must be in `[0, 32]`; callers validate before invoking.
pub fn apply_ip4_mask(ip: u32, nbits: u32) -> u32 {
    debug_assert!(nbits <= IP4_BITS);
    ip | u32::MAX.checked_shr(nbits).unwrap_or(0)
}

/// Sets all host bits below the prefix over the full 128-bit space.
///
/// `nbits` must be in `[0, 128]`; a prefix of exactly 128 is a no-op and
/// callers special-case it to keep the address a singleton.
pub fn apply_ip6_mask(ip: Ip6, nbits: u32) -> Ip6 {
    debug_assert!(nbits <= IP6_BITS);
    let mut words = ip.0;
    for (i, word) in words.iter_mut().enumerate() {
        let word_start = (i as u32) * 32;
        if nbits <= word_start {
            *word = u32::MAX;
        } else {
            let fixed = nbits - word_start;
            *word |= u32::MAX.checked_shr(fixed).unwrap_or(0);
        }
    }
    Ip6(words)
}

/// Recovers the prefix length of a contiguous IPv4 netmask.
///
/// Returns `None` when the mask has holes (ones below a zero bit).
pub fn ip4_mask_bits(mask: u32) -> Option<u32> {
    let nbits = mask.leading_ones();
    let contiguous = mask.checked_shl(nbits).unwrap_or(0) == 0;
    contiguous.then_some(nbits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip4_round_trip() {
        let ip = text_to_ip4("172.16.0.1").unwrap();
        assert_eq!(ip4_to_text(ip), "172.16.0.1");
        assert_eq!(ip, 0xAC10_0001);
    }

    #[test]
    fn test_ip4_rejects_malformed() {
        assert!(text_to_ip4("172.16.0").is_none());
        assert!(text_to_ip4("172.16.0.256").is_none());
        assert!(text_to_ip4("172.16.0.01").is_none());
        assert!(text_to_ip4("172.16.0.1.5").is_none());
        assert!(text_to_ip4("").is_none());
        assert!(text_to_ip4("::1").is_none());
    }

    #[test]
    fn test_ip6_round_trip() {
        let ip = text_to_ip6("::1").unwrap();
        assert_eq!(ip6_to_text(ip), "::1");
    }

    #[test]
    fn test_ip6_words() {
        let ip = text_to_ip6("ff02::1:3").unwrap();
        assert_eq!(ip.words(), [0xff02_0000, 0, 0, 0x0001_0003]);

        let ip = text_to_ip6("fe80::e58c:84f8:a156:2a23").unwrap();
        assert_eq!(ip.words(), [0xfe80_0000, 0, 0xe58c_84f8, 0xa156_2a23]);
    }

    #[test]
    fn test_ip6_rejects_malformed() {
        assert!(text_to_ip6("::1::2").is_none());
        assert!(text_to_ip6("1:2:3:4:5:6:7:8:9").is_none());
        assert!(text_to_ip6("fffff::").is_none());
        assert!(text_to_ip6("").is_none());
    }

    #[test]
    fn test_ip6_ordering_is_unsigned_128bit() {
        let one = text_to_ip6("::1").unwrap();
        let two = text_to_ip6("::2").unwrap();
        let high = text_to_ip6("2002::").unwrap();
        assert!(one < two);
        assert!(two < high);
    }

    #[test]
    fn test_apply_ip4_mask() {
        let ip = text_to_ip4("172.16.0.0").unwrap();
        assert_eq!(ip4_to_text(apply_ip4_mask(ip, 20)), "172.16.15.255");
        assert_eq!(ip4_to_text(apply_ip4_mask(ip, 32)), "172.16.0.0");
        assert_eq!(ip4_to_text(apply_ip4_mask(ip, 0)), "255.255.255.255");
    }

    #[test]
    fn test_apply_ip6_mask() {
        let ip = text_to_ip6("::2").unwrap();
        let upper = apply_ip6_mask(ip, 126);
        assert_eq!(upper.words(), [0, 0, 0, 0x0000_0003]);

        let ip = text_to_ip6("2002::").unwrap();
        assert_eq!(
            ip6_to_text(apply_ip6_mask(ip, 16)),
            "2002:ffff:ffff:ffff:ffff:ffff:ffff:ffff"
        );
    }

    #[test]
    fn test_ip4_mask_bits() {
        assert_eq!(ip4_mask_bits(0xFFFF_FF00), Some(24));
        assert_eq!(ip4_mask_bits(0xFFFF_FFFF), Some(32));
        assert_eq!(ip4_mask_bits(0), Some(0));
        assert_eq!(ip4_mask_bits(0xFFFF_00FF), None);
    }
}
