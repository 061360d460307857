use crate::Domain;

/// IANA-assigned keywords for common IP protocol numbers.
///
/// <https://www.iana.org/assignments/protocol-numbers/protocol-numbers.xhtml>
const PROTOCOLS: &[(&str, u64)] = &[
    ("hopopt", 0),
    ("icmp", 1),
    ("igmp", 2),
    ("ggp", 3),
    ("ipinip", 4),
    ("tcp", 6),
    ("egp", 8),
    ("igp", 9),
    ("udp", 17),
    ("ipv6", 41),
    ("rsvp", 46),
    ("gre", 47),
    ("esp", 50),
    ("ah", 51),
    ("icmpv6", 58),
    ("eigrp", 88),
    ("ospf", 89),
    ("pim", 103),
    ("ipcomp", 108),
    ("vrrp", 112),
    ("l2tp", 115),
    ("sctp", 132),
];

/// IP protocol numbers, `0-255`, which may also be written by keyword.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IpProtocols;

impl Domain for IpProtocols {
    const NAME: &'static str = "IP protocol";
    const MIN: u64 = 0;
    const MAX: u64 = 255;
    const NAMED: bool = true;

    fn value_of(name: &str) -> Option<u64> {
        protocol_number(name)
    }

    fn name_of(value: u64) -> Option<&'static str> {
        protocol_name(value)
    }
}

/// The protocol number for a keyword such as `tcp`, ignoring case.
pub fn protocol_number(name: &str) -> Option<u64> {
    PROTOCOLS
        .iter()
        .find(|(keyword, _)| keyword.eq_ignore_ascii_case(name))
        .map(|(_, number)| *number)
}

/// The keyword for a protocol number, if IANA assigned one we know of.
pub fn protocol_name(number: u64) -> Option<&'static str> {
    PROTOCOLS
        .iter()
        .find(|(_, value)| *value == number)
        .map(|(keyword, _)| *keyword)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup() {
        assert_eq!(protocol_number("tcp"), Some(6));
        assert_eq!(protocol_number("UDP"), Some(17));
        assert_eq!(protocol_number("Ospf"), Some(89));
        assert_eq!(protocol_number("tcp6"), None);
        assert_eq!(protocol_name(47), Some("gre"));
        assert_eq!(protocol_name(7), None);
    }

    #[test]
    fn table_is_consistent() {
        for (keyword, number) in PROTOCOLS {
            assert_eq!(protocol_number(keyword), Some(*number));
            assert_eq!(protocol_name(*number), Some(*keyword));
            assert!(*number <= IpProtocols::MAX);
        }
    }
}
