//! Binary layout arithmetic for the fixed-capacity address-list buffer.
//!
//! The downstream filtering engine receives the compiled address list in a
//! fixed layout: a four-field u32 count header, then packed IPv4 singles,
//! IPv4 pairs, IPv6 singles and IPv6 pairs. The byte count computed here is
//! a contract — the consumer sizes its receive buffer from it, so any
//! mismatch with the actual writer is a correctness bug.

/// Maximum single+pair entry count per address family.
///
/// A strict ceiling enforced before the result is handed to the consumer;
/// oversized documents are rejected, never silently truncated.
pub const MAX_ADDR_ENTRIES: usize = 1 << 20;

/// Count header: ip4, pair4, ip6 and pair6 entry counts as u32 each.
pub const ADDR_LIST_HEADER_SIZE: usize = 4 * 4;

const IP4_SIZE: usize = 4;
const IP6_SIZE: usize = 16;

/// Exact byte size of an address list with the given entry counts.
///
/// Pairs cost two addresses each.
pub fn addr_list_size(ip4: usize, pair4: usize, ip6: usize, pair6: usize) -> usize {
    ADDR_LIST_HEADER_SIZE + (ip4 + 2 * pair4) * IP4_SIZE + (ip6 + 2 * pair6) * IP6_SIZE
}

/// Whether the entry counts fit the consumer buffer.
///
/// Fails when the combined single+pair count for either family meets or
/// exceeds [`MAX_ADDR_ENTRIES`].
pub fn check_addr_counts(ip4: usize, pair4: usize, ip6: usize, pair6: usize) -> bool {
    ip4 + pair4 < MAX_ADDR_ENTRIES && ip6 + pair6 < MAX_ADDR_ENTRIES
}
