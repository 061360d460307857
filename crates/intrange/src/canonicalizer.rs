use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::interval_set::Iter;
use crate::{Error, Interval, IntervalSet, RangeConfig};

/// A read-only, strictly parsed view of range text.
///
/// Use this when all you need is "normalize this text": parsing and merging are delegated to
/// [`IntervalSet`], so both always agree on the canonical form. Unlike [`IntervalSet`], a
/// [`Canonicalizer`] never drops malformed items and cannot be mutated.
///
/// ```text
/// Canonicalizer::new("3-5,1,3-5")?.text() == "1,3-5"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Canonicalizer {
    set: IntervalSet,
}

impl Canonicalizer {
    /// Canonicalize `line`, using the default `,` and `-` delimiters.
    pub fn new(line: &str) -> Result<Self, Error> {
        Self::with_config(line, RangeConfig::default())
    }

    /// Canonicalize `line`, using the given delimiters.
    pub fn with_delimiters(
        line: &str,
        splitter: impl Into<Box<str>>,
        range_splitter: impl Into<Box<str>>,
    ) -> Result<Self, Error> {
        Self::with_config(line, RangeConfig::new(splitter, range_splitter)?)
    }

    /// Canonicalize `line`, using the delimiters of `config`. Strictness is always enforced.
    pub fn with_config(line: &str, config: RangeConfig) -> Result<Self, Error> {
        let set = IntervalSet::parse(line, &config.with_strict(true))?;
        Ok(Self { set })
    }

    /// The canonical text.
    pub fn text(&self) -> String {
        self.set.canonical_text()
    }

    /// All integers, sorted and deduplicated.
    pub fn numbers(&self) -> Vec<u64> {
        self.set.to_sorted_integers()
    }

    pub fn intervals(&self) -> &[Interval] {
        self.set.intervals()
    }

    pub fn config(&self) -> &RangeConfig {
        self.set.config()
    }

    pub fn contains(&self, value: u64) -> bool {
        self.set.contains(value)
    }

    pub fn len(&self) -> u64 {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        self.set.iter()
    }

    /// Convert into a mutable [`IntervalSet`] with the same configuration.
    pub fn into_interval_set(self) -> IntervalSet {
        self.set
    }
}

impl FromStr for Canonicalizer {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        Self::new(line)
    }
}

impl Display for Canonicalizer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.set, f)
    }
}

impl AsRef<IntervalSet> for Canonicalizer {
    fn as_ref(&self) -> &IntervalSet {
        &self.set
    }
}

impl From<Canonicalizer> for IntervalSet {
    fn from(canonicalizer: Canonicalizer) -> Self {
        canonicalizer.set
    }
}

impl<'a> IntoIterator for &'a Canonicalizer {
    type Item = u64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Canonicalizer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.set.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn canonical_text() {
        let canonical = Canonicalizer::new("3-5,1,3-5,1,3-4,4-5").unwrap();
        assert_eq!(canonical.text(), "1,3-5");
        assert_eq!(canonical.to_string(), "1,3-5");
        assert_eq!(canonical.numbers(), [1, 3, 4, 5]);
        assert_eq!(canonical.len(), 4);
        assert!(canonical.contains(4));
        assert!(!canonical.contains(2));
    }

    #[test]
    fn empty() {
        let canonical = Canonicalizer::new("").unwrap();
        assert!(canonical.is_empty());
        assert_eq!(canonical.text(), "");
        assert!(canonical.numbers().is_empty());
    }

    #[test]
    fn custom_delimiters() {
        let canonical = Canonicalizer::with_delimiters("5 to 7 1", " ", " to ").unwrap();
        assert_eq!(canonical.text(), "1 5 to 7");
        assert_eq!(canonical.iter().collect::<Vec<_>>(), [1, 5, 6, 7]);
    }

    #[test]
    fn always_strict() {
        let err = Canonicalizer::with_config("1,x", RangeConfig::lenient()).unwrap_err();
        assert_snapshot!(err, @"Invalid character `x` in item `x` of line `1,x`");

        let err = Canonicalizer::with_delimiters("1", ",", ",").unwrap_err();
        assert_snapshot!(err, @"The splitter and the range splitter must differ, but both are `,`");
    }

    #[test]
    fn agrees_with_interval_set() {
        for line in ["", "1", "9,8,7", "1-3,2-4,10", "0-0,1-1,3", "100-200,150-250,251"] {
            let canonical = Canonicalizer::new(line).unwrap();
            let set = IntervalSet::from_str(line).unwrap();
            assert_eq!(canonical.text(), set.canonical_text());
            assert_eq!(canonical.into_interval_set(), set);
        }
    }

    #[test]
    fn serialize() {
        let canonical = Canonicalizer::new("7,1-3,2").unwrap();
        assert_eq!(serde_json::to_string(&canonical).unwrap(), r#""1-3,7""#);
    }
}
