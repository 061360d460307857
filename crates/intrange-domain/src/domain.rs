/// A fixed domain of integers, such as the valid VLAN IDs.
pub trait Domain {
    /// A human-readable name, used in error messages.
    const NAME: &'static str;
    /// The smallest valid value.
    const MIN: u64;
    /// The largest valid value.
    const MAX: u64;
    /// Whether values may be written by name (see [`Domain::value_of`]).
    const NAMED: bool = false;

    /// Translate a symbolic name (e.g., `tcp`) into its value.
    fn value_of(_name: &str) -> Option<u64> {
        None
    }

    /// The symbolic name of a value, if it has one.
    fn name_of(_value: u64) -> Option<&'static str> {
        None
    }
}

/// TCP and UDP port numbers, `1-65535`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Ports;

impl Domain for Ports {
    const NAME: &'static str = "port";
    const MIN: u64 = 1;
    const MAX: u64 = 65535;
}

/// IEEE 802.1Q VLAN IDs, `1-4094`.
///
/// `0` and `4095` are reserved by the standard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Vlans;

impl Domain for Vlans {
    const NAME: &'static str = "VLAN ID";
    const MIN: u64 = 1;
    const MAX: u64 = 4094;
}
