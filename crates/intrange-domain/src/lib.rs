//! Integer ranges bound to a fixed domain: TCP/UDP ports, VLAN IDs and IP protocols.
//!
//! Each domain parses range text with [`intrange`], then checks that every covered integer lies
//! within the domain's bounds:
//!
//! ```text
//! VlanSet::from_str("1,10-20")  ->  Ok
//! VlanSet::from_str("4095")     ->  Err(OutOfBounds)
//! ```
//!
//! IP protocols additionally accept IANA keywords such as `tcp` or `ospf` in place of numbers.

use thiserror::Error;

pub use bounded::{Bounded, PortSet, ProtocolSet, VlanSet};
pub use domain::{Domain, Ports, Vlans};
pub use protocol::{IpProtocols, protocol_name, protocol_number};

mod bounded;
mod domain;
mod protocol;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid {domain} `{value}`, expected a value in {min}-{max}")]
    OutOfBounds {
        domain: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
    #[error("Unknown {domain} name `{name}`")]
    UnknownName { domain: &'static str, name: Box<str> },
    #[error(transparent)]
    Range(#[from] intrange::Error),
}
