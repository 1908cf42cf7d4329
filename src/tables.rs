//! Symbolic name tables: protocols, well-known services, directions, areas.
//!
//! The tables are process-wide immutable data. Each ordered table carries a
//! lazily-built uppercase name→index map so a symbolic range such as
//! `HOPOPT-IPV6_FRAG` resolves "from name to name" through "from index to
//! index" to the numeric bounds at those indices. Lookup is
//! case-insensitive; punctuation inside names (`TP++`, `A/N`, `AX.25`) is
//! matched literally.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Protocol filter for service-name lookup.
///
/// Numeric values follow the IP protocol numbers so the filter can be fed
/// straight from a parsed protocol field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum ProtocolType {
    #[default]
    Any = 0,
    Tcp = 6,
    Udp = 17,
}

/// Traffic direction.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Direction {
    In,
    Out,
}

/// Traffic-origin area (zone).
///
/// Declaration order is the canonical serialization order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Area {
    Localhost,
    Lan,
    Inet,
}

/// Sentinel protocol number for "any protocol not listed".
pub const PROTO_RAWSOCKET: u8 = 255;

/// IANA protocol names, index == protocol number.
///
/// Unassigned "any …" slots keep their IANA meaning under table-friendly
/// names so the list stays contiguous and index addressing holds.
static PROTOCOL_NAMES: [&str; 143] = [
    "HOPOPT",
    "ICMP",
    "IGMP",
    "GGP",
    "IPV4",
    "ST",
    "TCP",
    "CBT",
    "EGP",
    "IGP",
    "BBN_RCC_MON",
    "NVP_II",
    "PUP",
    "ARGUS",
    "EMCON",
    "XNET",
    "CHAOS",
    "UDP",
    "MUX",
    "DCN_MEAS",
    "HMP",
    "PRM",
    "XNS_IDP",
    "TRUNK_1",
    "TRUNK_2",
    "LEAF_1",
    "LEAF_2",
    "RDP",
    "IRTP",
    "ISO_TP4",
    "NETBLT",
    "MFE_NSP",
    "MERIT_INP",
    "DCCP",
    "3PC",
    "IDPR",
    "XTP",
    "DDP",
    "IDPR_CMTP",
    "TP++",
    "IL",
    "IPV6",
    "SDRP",
    "IPV6_ROUTE",
    "IPV6_FRAG",
    "IDRP",
    "RSVP",
    "GRE",
    "DSR",
    "BNA",
    "ESP",
    "AH",
    "I_NLSP",
    "SWIPE",
    "NARP",
    "MOBILE",
    "TLSP",
    "SKIP",
    "ICMPV6",
    "IPV6_NONXT",
    "IPV6_OPTS",
    "ANY_HOST_INTERNAL",
    "CFTP",
    "ANY_LOCAL_NETWORK",
    "SAT_EXPAK",
    "KRYPTOLAN",
    "RVD",
    "IPPC",
    "ANY_DISTRIBUTED_FS",
    "SAT_MON",
    "VISA",
    "IPCV",
    "CPNX",
    "CPHB",
    "WSN",
    "PVP",
    "BR_SAT_MON",
    "SUN_ND",
    "WB_MON",
    "WB_EXPAK",
    "ISO_IP",
    "VMTP",
    "SECURE_VMTP",
    "VINES",
    "IPTM",
    "NSFNET_IGP",
    "DGP",
    "TCF",
    "EIGRP",
    "OSPFIGP",
    "SPRITE_RPC",
    "LARP",
    "MTP",
    "AX.25",
    "IPIP",
    "MICP",
    "SCC_SP",
    "ETHERIP",
    "ENCAP",
    "ANY_PRIVATE_ENCRYPTION",
    "GMTP",
    "IFMP",
    "PNNI",
    "PIM",
    "ARIS",
    "SCPS",
    "QNX",
    "A/N",
    "IPCOMP",
    "SNP",
    "COMPAQ_PEER",
    "IPX_IN_IP",
    "VRRP",
    "PGM",
    "ANY_0_HOP",
    "L2TP",
    "DDX",
    "IATP",
    "STP",
    "SRP",
    "UTI",
    "SMP",
    "SM",
    "PTP",
    "ISIS",
    "FIRE",
    "CRTP",
    "CRUDP",
    "SSCOPMCE",
    "IPLT",
    "SPS",
    "PIPE",
    "SCTP",
    "FC",
    "RSVP_E2E_IGNORE",
    "MOBILITY_HEADER",
    "UDPLITE",
    "MPLS_IN_IP",
    "MANET",
    "HIP",
    "SHIM6",
    "WESP",
    "ROHC",
];

static PROTOCOL_INDEX: LazyLock<HashMap<&'static str, u8>> = LazyLock::new(|| {
    let mut map: HashMap<&'static str, u8> = PROTOCOL_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| (*name, u8::try_from(i).unwrap_or(u8::MAX)))
        .collect();
    map.insert("RAWSOCKET", PROTO_RAWSOCKET);
    map
});

/// Resolves a protocol name to its number, case-insensitively.
pub fn protocol_number(name: &str) -> Option<u8> {
    let upper = name.to_ascii_uppercase();
    PROTOCOL_INDEX.get(upper.as_str()).copied()
}

/// Canonical name for a protocol number.
///
/// Returns `None` for numbers with no table entry; 255 is the
/// `RAWSOCKET` sentinel.
pub fn protocol_name(number: u8) -> Option<&'static str> {
    if number == PROTO_RAWSOCKET {
        return Some("RAWSOCKET");
    }
    PROTOCOL_NAMES.get(usize::from(number)).copied()
}

struct ServiceEntry {
    name: &'static str,
    port: u16,
    proto: ProtocolType,
}

const fn svc(name: &'static str, port: u16, proto: ProtocolType) -> ServiceEntry {
    ServiceEntry { name, port, proto }
}

/// Well-known services, ordered by port number.
static SERVICES: [ServiceEntry; 52] = [
    svc("TCPMUX", 1, ProtocolType::Tcp),
    svc("ECHO", 7, ProtocolType::Any),
    svc("DISCARD", 9, ProtocolType::Any),
    svc("SYSTAT", 11, ProtocolType::Tcp),
    svc("DAYTIME", 13, ProtocolType::Any),
    svc("QOTD", 17, ProtocolType::Any),
    svc("CHARGEN", 19, ProtocolType::Any),
    svc("FTP_DATA", 20, ProtocolType::Tcp),
    svc("FTP", 21, ProtocolType::Tcp),
    svc("SSH", 22, ProtocolType::Tcp),
    svc("TELNET", 23, ProtocolType::Tcp),
    svc("SMTP", 25, ProtocolType::Tcp),
    svc("TIME", 37, ProtocolType::Any),
    svc("WHOIS", 43, ProtocolType::Tcp),
    svc("TACACS", 49, ProtocolType::Any),
    svc("DNS", 53, ProtocolType::Any),
    svc("DHCP", 67, ProtocolType::Udp),
    svc("DHCP_CLIENT", 68, ProtocolType::Udp),
    svc("TFTP", 69, ProtocolType::Udp),
    svc("GOPHER", 70, ProtocolType::Tcp),
    svc("FINGER", 79, ProtocolType::Tcp),
    svc("HTTP", 80, ProtocolType::Tcp),
    svc("KERBEROS", 88, ProtocolType::Any),
    svc("ISO_TSAP", 102, ProtocolType::Tcp),
    svc("POP3", 110, ProtocolType::Tcp),
    svc("SUNRPC", 111, ProtocolType::Any),
    svc("IDENT", 113, ProtocolType::Tcp),
    svc("NNTP", 119, ProtocolType::Tcp),
    svc("NTP", 123, ProtocolType::Udp),
    svc("NETBIOS_NS", 137, ProtocolType::Udp),
    svc("NETBIOS_DGM", 138, ProtocolType::Udp),
    svc("NETBIOS_SSN", 139, ProtocolType::Tcp),
    svc("IMAP", 143, ProtocolType::Tcp),
    svc("SNMP", 161, ProtocolType::Udp),
    svc("SNMP_TRAP", 162, ProtocolType::Udp),
    svc("BGP", 179, ProtocolType::Tcp),
    svc("IRC", 194, ProtocolType::Tcp),
    svc("LDAP", 389, ProtocolType::Any),
    svc("HTTPS", 443, ProtocolType::Tcp),
    svc("SMB", 445, ProtocolType::Tcp),
    svc("KPASSWD", 464, ProtocolType::Any),
    svc("SSL", 465, ProtocolType::Tcp),
    svc("SYSLOG", 514, ProtocolType::Udp),
    svc("LPD", 515, ProtocolType::Tcp),
    svc("RIP", 520, ProtocolType::Udp),
    svc("RTSP", 554, ProtocolType::Any),
    svc("IPP", 631, ProtocolType::Tcp),
    svc("LDAPS", 636, ProtocolType::Any),
    svc("IMAPS", 993, ProtocolType::Tcp),
    svc("POP3S", 995, ProtocolType::Tcp),
    svc("SOCKS", 1080, ProtocolType::Tcp),
    svc("OPENVPN", 1194, ProtocolType::Any),
];

static SERVICE_INDEX: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
    SERVICES
        .iter()
        .enumerate()
        .map(|(i, entry)| (entry.name, i))
        .collect()
});

fn proto_matches(entry: ProtocolType, filter: ProtocolType) -> bool {
    entry == ProtocolType::Any || filter == ProtocolType::Any || entry == filter
}

/// Resolves a well-known service name to its port, case-insensitively.
///
/// The entry must be applicable to `filter` (`Any` matches everything).
pub fn service_to_port(name: &str, filter: ProtocolType) -> Option<u16> {
    let upper = name.to_ascii_uppercase();
    let index = *SERVICE_INDEX.get(upper.as_str())?;
    let entry = &SERVICES[index];
    proto_matches(entry.proto, filter).then_some(entry.port)
}

/// Canonical service name for a port, if the port is well known.
pub fn service_name(port: u16) -> Option<&'static str> {
    SERVICES
        .iter()
        .find(|entry| entry.port == port)
        .map(|entry| entry.name)
}
