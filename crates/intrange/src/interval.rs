use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::Error;

/// A closed interval of integers, `[min, max]`, such as `3-5` or `7`.
///
/// Intervals are immutable; the invariant `min <= max` holds for every value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    // Field order matters for the derived `(min, max)` ordering.
    pub(crate) min: u64,
    pub(crate) max: u64,
}

impl Interval {
    /// Create an interval, or `None` if `min > max`.
    pub fn new(min: u64, max: u64) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    /// An interval covering a single integer.
    pub fn singleton(value: u64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// The smallest integer in the interval.
    pub fn start(&self) -> u64 {
        self.min
    }

    /// The largest integer in the interval.
    pub fn end(&self) -> u64 {
        self.max
    }

    /// The number of integers in the interval, saturating at `u64::MAX`.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        (self.max - self.min).saturating_add(1)
    }

    /// Returns `true` if `value` lies within the interval.
    pub fn contains(&self, value: u64) -> bool {
        self.min <= value && value <= self.max
    }

    /// The covered integers, in ascending order.
    pub fn range(&self) -> RangeInclusive<u64> {
        self.min..=self.max
    }

    /// Render the interval, joining the bounds of a range with `range_splitter`.
    pub fn render(&self, range_splitter: &str) -> String {
        Rendered {
            interval: self,
            range_splitter,
        }
        .to_string()
    }

    pub(crate) fn fmt_with(&self, f: &mut Formatter<'_>, range_splitter: &str) -> std::fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}{range_splitter}{}", self.min, self.max)
        }
    }

    /// Parse an item in canonical form, `N` or `N-M`.
    pub(crate) fn parse_canonical(item: &str) -> Option<Self> {
        let (min, max) = match item.split_once('-') {
            Some((min, max)) => (parse_digits(min)?, parse_digits(max)?),
            None => {
                let value = parse_digits(item)?;
                (value, value)
            }
        };
        Self::new(min, max)
    }
}

/// Parse a non-empty run of ASCII digits.
///
/// `u64::from_str` also accepts a leading `+`, which is not part of the grammar.
fn parse_digits(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Displays an [`Interval`] with a custom range splitter.
struct Rendered<'a> {
    interval: &'a Interval,
    range_splitter: &'a str,
}

impl Display for Rendered<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.interval.fmt_with(f, self.range_splitter)
    }
}

impl FromStr for Interval {
    type Err = Error;

    /// Parse a single item such as `7` or `3-5`.
    fn from_str(item: &str) -> Result<Self, Self::Err> {
        Self::parse_canonical(item).ok_or_else(|| Error::InvalidRangeSyntax {
            item: item.into(),
            line: item.into(),
        })
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.fmt_with(f, crate::config::DEFAULT_RANGE_SPLITTER)
    }
}

impl From<Interval> for RangeInclusive<u64> {
    fn from(interval: Interval) -> Self {
        interval.range()
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn parse_single() {
        let interval = Interval::from_str("7").unwrap();
        assert_eq!(interval.start(), 7);
        assert_eq!(interval.end(), 7);
        assert_eq!(interval.len(), 1);
        assert_eq!(interval.to_string(), "7");
    }

    #[test]
    fn parse_range() {
        let interval = Interval::from_str("3-5").unwrap();
        assert_eq!(interval, Interval::new(3, 5).unwrap());
        assert_eq!(interval.len(), 3);
        assert_eq!(interval.to_string(), "3-5");
        assert_eq!(interval.start(), 3);
        assert_eq!(interval.end(), 5);
        assert_eq!(interval.render(" to "), "3 to 5");
        assert_eq!(Interval::singleton(9).render(" to "), "9");
        assert!(interval.contains(3));
        assert!(interval.contains(5));
        assert!(!interval.contains(6));
        assert_eq!(interval.range().collect::<Vec<_>>(), [3, 4, 5]);
    }

    #[test]
    fn degenerate_range() {
        let interval = Interval::from_str("4-4").unwrap();
        assert_eq!(interval, Interval::singleton(4));
        assert_eq!(interval.to_string(), "4");
    }

    #[test]
    fn invalid() {
        for item in ["", "-", "5-3", "1-", "-1", "1-2-3", "+1", "a", "1 ", "18446744073709551616"] {
            assert!(Interval::from_str(item).is_err(), "{item}");
        }
        assert_snapshot!(
            Interval::from_str("5-3").unwrap_err(),
            @"Invalid range item `5-3` in line `5-3`"
        );
    }

    #[test]
    fn bounds() {
        let interval = Interval::from_str("0-18446744073709551615").unwrap();
        assert_eq!(interval.len(), u64::MAX);
        assert!(Interval::new(2, 1).is_none());
    }

    #[test]
    fn ordering() {
        let mut intervals = vec![
            Interval::new(3, 5).unwrap(),
            Interval::singleton(1),
            Interval::new(3, 4).unwrap(),
        ];
        intervals.sort();
        assert_eq!(
            intervals,
            [
                Interval::singleton(1),
                Interval::new(3, 4).unwrap(),
                Interval::new(3, 5).unwrap()
            ]
        );
    }
}
