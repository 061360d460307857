use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::ops::Deref;
use std::str::FromStr;

use tracing::trace;

use intrange::{Interval, IntervalSet, RangeConfig};

use crate::{Domain, DomainError, IpProtocols, Ports, Vlans};

/// A set of TCP or UDP ports.
pub type PortSet = Bounded<Ports>;
/// A set of VLAN IDs.
pub type VlanSet = Bounded<Vlans>;
/// A set of IP protocol numbers.
pub type ProtocolSet = Bounded<IpProtocols>;

/// An [`IntervalSet`] whose integers all lie within the bounds of the domain `D`.
///
/// Dereferences to the underlying [`IntervalSet`] for read access. Mutations go through
/// [`Bounded::into_inner`] and [`Bounded::new`], so the bounds are re-checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bounded<D> {
    set: IntervalSet,
    domain: PhantomData<D>,
}

impl<D: Domain> Bounded<D> {
    /// Check that every integer of `set` lies within the domain.
    pub fn new(set: IntervalSet) -> Result<Self, DomainError> {
        let out_of_bounds = match (set.first(), set.last()) {
            (Some(first), _) if first < D::MIN => Some(first),
            (_, Some(last)) if last > D::MAX => Some(last),
            _ => None,
        };
        if let Some(value) = out_of_bounds {
            return Err(DomainError::OutOfBounds {
                domain: D::NAME,
                value,
                min: D::MIN,
                max: D::MAX,
            });
        }
        Ok(Self {
            set,
            domain: PhantomData,
        })
    }

    /// Parse range text and check it against the domain.
    ///
    /// For named domains, items that consist of a known name are replaced by their value before
    /// parsing.
    pub fn parse(line: &str, config: &RangeConfig) -> Result<Self, DomainError> {
        let line = resolve_names::<D>(line, config)?;
        let set = IntervalSet::parse(&line, config)?;
        Self::new(set)
    }

    /// Every value of the domain.
    pub fn full() -> Self {
        Self {
            set: IntervalSet::from_intervals(Interval::new(D::MIN, D::MAX)),
            domain: PhantomData,
        }
    }

    /// Each value, written by name where the domain has one.
    pub fn names(&self) -> Vec<String> {
        self.set
            .iter()
            .map(|value| D::name_of(value).map_or_else(|| value.to_string(), str::to_string))
            .collect()
    }

    pub fn into_inner(self) -> IntervalSet {
        self.set
    }
}

/// Replace items that are names of `D` by their value.
fn resolve_names<'a, D: Domain>(
    line: &'a str,
    config: &RangeConfig,
) -> Result<Cow<'a, str>, DomainError> {
    if !D::NAMED {
        return Ok(Cow::Borrowed(line));
    }

    let mut resolved = false;
    let mut items = Vec::new();
    for item in line.split(config.splitter()) {
        if !item.starts_with(|c: char| c.is_ascii_alphabetic()) {
            items.push(Cow::Borrowed(item));
        } else if let Some(value) = D::value_of(item) {
            trace!("Resolved {} `{item}` to {value}", D::NAME);
            resolved = true;
            items.push(Cow::Owned(value.to_string()));
        } else if config.is_strict()
            && item.chars().all(|c| c.is_ascii_alphanumeric())
            // Fragments of a wordy range splitter, like `to` in `1 to 5`, are not names.
            && !config.range_splitter().contains(item)
        {
            return Err(DomainError::UnknownName {
                domain: D::NAME,
                name: item.into(),
            });
        } else {
            items.push(Cow::Borrowed(item));
        }
    }

    if resolved {
        Ok(Cow::Owned(items.join(config.splitter())))
    } else {
        Ok(Cow::Borrowed(line))
    }
}

impl<D: Domain> TryFrom<IntervalSet> for Bounded<D> {
    type Error = DomainError;

    fn try_from(set: IntervalSet) -> Result<Self, Self::Error> {
        Self::new(set)
    }
}

impl<D: Domain> FromStr for Bounded<D> {
    type Err = DomainError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        Self::parse(line, &RangeConfig::default())
    }
}

impl<D> Deref for Bounded<D> {
    type Target = IntervalSet;

    fn deref(&self) -> &Self::Target {
        &self.set
    }
}

impl<D> AsRef<IntervalSet> for Bounded<D> {
    fn as_ref(&self) -> &IntervalSet {
        &self.set
    }
}

impl<D> Display for Bounded<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.set, f)
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn vlans() {
        let vlans = VlanSet::from_str("10-20,1,15").unwrap();
        assert_eq!(vlans.to_string(), "1,10-20");
        assert_eq!(vlans.len(), 12);

        assert_snapshot!(
            VlanSet::from_str("0,10").unwrap_err(),
            @"Invalid VLAN ID `0`, expected a value in 1-4094"
        );
        assert_snapshot!(
            VlanSet::from_str("1-4095").unwrap_err(),
            @"Invalid VLAN ID `4095`, expected a value in 1-4094"
        );
        assert_eq!(VlanSet::full().to_string(), "1-4094");
    }

    #[test]
    fn ports() {
        let ports = PortSet::from_str("443,80,8080-8090").unwrap();
        assert_eq!(ports.to_string(), "80,443,8080-8090");
        assert!(ports.contains(8085));
        assert_snapshot!(
            PortSet::from_str("65536").unwrap_err(),
            @"Invalid port `65536`, expected a value in 1-65535"
        );
        assert_snapshot!(
            PortSet::from_str("http").unwrap_err(),
            @"Invalid character `h` in item `http` of line `http`"
        );
    }

    #[test]
    fn protocols() {
        let protocols = ProtocolSet::from_str("udp,tcp,1-2,TCP").unwrap();
        assert_eq!(protocols.to_string(), "1-2,6,17");
        assert_eq!(protocols.names(), ["icmp", "igmp", "tcp", "udp"]);

        assert_snapshot!(
            ProtocolSet::from_str("tcp,bogus").unwrap_err(),
            @"Unknown IP protocol name `bogus`"
        );
        assert_snapshot!(
            ProtocolSet::from_str("256").unwrap_err(),
            @"Invalid IP protocol `256`, expected a value in 0-255"
        );
        assert_eq!(ProtocolSet::full().len(), 256);
    }

    #[test]
    fn protocols_lenient() {
        let protocols = ProtocolSet::parse("tcp,bogus,17", &RangeConfig::lenient()).unwrap();
        assert_eq!(protocols.to_string(), "6,17");
    }

    #[test]
    fn protocols_with_wordy_delimiters() {
        let config = RangeConfig::new(" ", " to ").unwrap();
        let protocols = ProtocolSet::parse("1 to 4 udp", &config).unwrap();
        assert_eq!(protocols.to_string(), "1 to 4 17");
    }

    #[test]
    fn from_interval_set() {
        let set = IntervalSet::from_str("1-100").unwrap();
        let vlans = VlanSet::try_from(set.clone()).unwrap();
        assert_eq!(vlans.into_inner(), set);
        assert!(VlanSet::try_from(IntervalSet::from(5000)).is_err());
    }
}
