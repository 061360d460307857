use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::iter::{FlatMap, FusedIterator};
use std::ops::{Bound, RangeBounds, RangeInclusive};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use tracing::trace;

use crate::parse::parse_intervals;
use crate::{Error, Interval, RangeConfig};

/// A set of integers, stored as sorted, disjoint, non-adjacent [`Interval`]s.
///
/// Parse with [`IntervalSet::parse`] or [`IntervalSet::from_str`]; render with
/// [`Display`], which joins the intervals with the configured delimiters:
///
/// ```text
/// "3-5,1,3-5,1,3-4,4-5" -> "1,3-5"
/// ```
///
/// The set doubles as an ascending, duplicate-free sequence of integers (see [`IntervalSet::get`],
/// [`IntervalSet::index_of`] and [`IntervalSet::pop`]). Every operation leaves the intervals in
/// canonical form.
///
/// Equality, hashing and ordering only consider the covered integers, never the delimiters.
#[derive(Debug, Clone, Default)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
    config: RangeConfig,
}

/// Merge intervals into canonical form: sorted by `min`, with overlapping and adjacent
/// intervals joined.
pub(crate) fn merge(mut intervals: Vec<Interval>) -> Vec<Interval> {
    intervals.sort_unstable();
    // `dedup_by` hands us the candidate and the last retained interval, which lets us extend the
    // retained interval in place instead of removing exact duplicates only.
    intervals.dedup_by(|next, current| {
        if next.min <= current.max.saturating_add(1) {
            current.max = current.max.max(next.max);
            true
        } else {
            false
        }
    });
    intervals
}

impl IntervalSet {
    /// An empty set with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty set rendered with the given configuration.
    pub fn with_config(config: RangeConfig) -> Self {
        Self {
            intervals: Vec::new(),
            config,
        }
    }

    /// Parse range text such as `1,3-5` using the delimiters and strictness of `config`.
    pub fn parse(line: &str, config: &RangeConfig) -> Result<Self, Error> {
        let intervals = merge(parse_intervals(line, config)?);
        trace!("Parsed `{line}` into {} interval(s)", intervals.len());
        Ok(Self {
            intervals,
            config: config.clone(),
        })
    }

    /// Build a set from arbitrary integers, in any order and with duplicates.
    pub fn from_integers(values: impl IntoIterator<Item = u64>) -> Self {
        values.into_iter().collect()
    }

    /// Build a set from arbitrary, possibly overlapping intervals.
    pub fn from_intervals(intervals: impl IntoIterator<Item = Interval>) -> Self {
        intervals.into_iter().collect()
    }

    pub fn config(&self) -> &RangeConfig {
        &self.config
    }

    /// Replace the configuration used to render this set.
    pub fn set_config(&mut self, config: RangeConfig) {
        self.config = config;
    }

    /// Return the same set, rendered with another configuration.
    #[must_use]
    pub fn rendered_with(mut self, config: RangeConfig) -> Self {
        self.config = config;
        self
    }

    /// The canonical intervals, in ascending order.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// The canonical text, e.g. `1,3-5`.
    pub fn canonical_text(&self) -> String {
        self.to_string()
    }

    /// All covered integers, in ascending order.
    pub fn to_sorted_integers(&self) -> Vec<u64> {
        self.iter().collect()
    }

    /// An iterator over the covered integers, in ascending order.
    ///
    /// Each call returns a fresh iterator; iterators are independent of each other.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.intervals.iter().flat_map(Interval::range as BorrowedRange),
        }
    }

    /// The number of covered integers, saturating at `u64::MAX`.
    pub fn len(&self) -> u64 {
        self.intervals
            .iter()
            .fold(0u64, |len, interval| len.saturating_add(interval.len()))
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// The smallest covered integer.
    pub fn first(&self) -> Option<u64> {
        self.intervals.first().map(Interval::start)
    }

    /// The largest covered integer.
    pub fn last(&self) -> Option<u64> {
        self.intervals.last().map(Interval::end)
    }

    /// Returns `true` if `value` is covered by the set.
    pub fn contains(&self, value: u64) -> bool {
        self.position(value).is_ok()
    }

    /// Binary search for the interval containing `value`. On failure, returns the index at which
    /// an interval containing `value` would be inserted.
    fn position(&self, value: u64) -> Result<usize, usize> {
        self.intervals.binary_search_by(|interval| {
            if interval.min > value {
                Ordering::Greater
            } else if interval.max < value {
                Ordering::Less
            } else {
                Ordering::Equal
            }
        })
    }

    /// The integer at position `index` in ascending order.
    pub fn get(&self, mut index: u64) -> Option<u64> {
        for interval in &self.intervals {
            let len = interval.len();
            if index < len {
                return Some(interval.min + index);
            }
            index -= len;
        }
        None
    }

    /// The position of `value` in ascending order, if it is covered.
    pub fn index_of(&self, value: u64) -> Option<u64> {
        let idx = self.position(value).ok()?;
        let before = self.intervals[..idx]
            .iter()
            .fold(0u64, |len, interval| len.saturating_add(interval.len()));
        Some(before.saturating_add(value - self.intervals[idx].min))
    }

    /// The integers at the given positions, in ascending order. Positions past the end are
    /// ignored.
    pub fn slice(&self, positions: impl RangeBounds<u64>) -> Vec<u64> {
        let start = match positions.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match positions.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => u64::MAX,
        };

        let mut values = Vec::new();
        let mut offset = 0u64;
        for interval in &self.intervals {
            if offset >= end {
                break;
            }
            let len = interval.len();
            let next = offset.saturating_add(len);
            if next > start {
                let from = interval.min + start.saturating_sub(offset);
                let to = interval.min + (end.min(next) - offset - 1);
                values.extend(from..=to);
            }
            offset = next;
        }
        values
    }

    /// Add a single integer to the set.
    pub fn append(&mut self, value: u64) {
        let idx = match self.position(value) {
            Ok(_) => return,
            Err(idx) => idx,
        };

        // The preceding interval ends below `value` and the following one starts above it.
        let joins_previous = idx > 0 && self.intervals[idx - 1].max + 1 == value;
        let joins_next = self
            .intervals
            .get(idx)
            .is_some_and(|next| next.min - 1 == value);

        match (joins_previous, joins_next) {
            (true, true) => {
                let next = self.intervals.remove(idx);
                self.intervals[idx - 1].max = next.max;
            }
            (true, false) => self.intervals[idx - 1].max = value,
            (false, true) => self.intervals[idx].min = value,
            (false, false) => self.intervals.insert(idx, Interval::singleton(value)),
        }
    }

    /// Add a single integer to the set. Alias of [`IntervalSet::append`].
    pub fn insert(&mut self, value: u64) {
        self.append(value);
    }

    /// Remove `value` from the set, returning `true` if it was present.
    pub fn discard(&mut self, value: u64) -> bool {
        let Ok(idx) = self.position(value) else {
            return false;
        };

        let Interval { min, max } = self.intervals[idx];
        if min == max {
            self.intervals.remove(idx);
        } else if value == min {
            self.intervals[idx].min = value + 1;
        } else if value == max {
            self.intervals[idx].max = value - 1;
        } else {
            self.intervals[idx].max = value - 1;
            self.intervals.insert(
                idx + 1,
                Interval {
                    min: value + 1,
                    max,
                },
            );
        }
        true
    }

    /// Remove `value` from the set, failing if it is not present.
    pub fn remove(&mut self, value: u64) -> Result<(), Error> {
        if self.discard(value) {
            Ok(())
        } else {
            Err(Error::MissingValue(value))
        }
    }

    /// Remove and return the largest integer.
    pub fn pop(&mut self) -> Option<u64> {
        let last = self.intervals.last_mut()?;
        let value = last.max;
        if last.min == last.max {
            self.intervals.pop();
        } else {
            last.max -= 1;
        }
        Some(value)
    }

    /// Remove all integers.
    pub fn clear(&mut self) {
        self.intervals.clear();
    }

    /// The integers in either set.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut intervals = Vec::with_capacity(self.intervals.len() + other.intervals.len());
        intervals.extend_from_slice(&self.intervals);
        intervals.extend_from_slice(&other.intervals);
        self.derive(merge(intervals))
    }

    /// The integers in both sets.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let (left, right) = (&self.intervals, &other.intervals);
        let mut intervals = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            let min = left[i].min.max(right[j].min);
            let max = left[i].max.min(right[j].max);
            if min <= max {
                intervals.push(Interval { min, max });
            }
            if left[i].max < right[j].max {
                i += 1;
            } else {
                j += 1;
            }
        }
        self.derive(intervals)
    }

    /// The integers in `self` but not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        let right = &other.intervals;
        let mut intervals = Vec::with_capacity(self.intervals.len());
        let mut j = 0;
        for interval in &self.intervals {
            // Skip everything strictly below the current interval.
            while j < right.len() && right[j].max < interval.min {
                j += 1;
            }

            let mut min = interval.min;
            let mut covered = false;
            for hole in right[j..].iter().take_while(|hole| hole.min <= interval.max) {
                if hole.min > min {
                    intervals.push(Interval {
                        min,
                        max: hole.min - 1,
                    });
                }
                if hole.max >= interval.max {
                    covered = true;
                    break;
                }
                min = hole.max + 1;
            }
            if !covered {
                intervals.push(Interval {
                    min,
                    max: interval.max,
                });
            }
        }
        self.derive(intervals)
    }

    /// The integers in exactly one of the sets.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        self.union(other).difference(&self.intersection(other))
    }

    /// Add all integers of `other` to `self`.
    pub fn update(&mut self, other: &Self) {
        self.intervals = self.union(other).intervals;
    }

    /// Keep only the integers also in `other`.
    pub fn intersection_update(&mut self, other: &Self) {
        self.intervals = self.intersection(other).intervals;
    }

    /// Remove all integers of `other` from `self`.
    pub fn difference_update(&mut self, other: &Self) {
        self.intervals = self.difference(other).intervals;
    }

    /// Keep only the integers in exactly one of the sets.
    pub fn symmetric_difference_update(&mut self, other: &Self) {
        self.intervals = self.symmetric_difference(other).intervals;
    }

    /// Returns `true` if the sets have no integer in common.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.intersection(other).is_empty()
    }

    /// Returns `true` if every integer of `self` is in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.difference(other).is_empty()
    }

    /// Returns `true` if every integer of `other` is in `self`.
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// A set with the given canonical intervals and this set's configuration.
    fn derive(&self, intervals: Vec<Interval>) -> Self {
        debug_assert!(
            intervals
                .windows(2)
                .all(|pair| pair[1].min > pair[0].max.saturating_add(1)),
            "intervals are not canonical: {intervals:?}"
        );
        Self {
            intervals,
            config: self.config.clone(),
        }
    }
}

impl FromStr for IntervalSet {
    type Err = Error;

    /// Parse strictly, with the default `,` and `-` delimiters.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        Self::parse(line, &RangeConfig::default())
    }
}

impl From<u64> for IntervalSet {
    fn from(value: u64) -> Self {
        Self::from(Interval::singleton(value))
    }
}

impl From<Interval> for IntervalSet {
    fn from(interval: Interval) -> Self {
        Self {
            intervals: vec![interval],
            config: RangeConfig::default(),
        }
    }
}

impl FromIterator<u64> for IntervalSet {
    fn from_iter<T: IntoIterator<Item = u64>>(iter: T) -> Self {
        iter.into_iter().map(Interval::singleton).collect()
    }
}

impl FromIterator<Interval> for IntervalSet {
    fn from_iter<T: IntoIterator<Item = Interval>>(iter: T) -> Self {
        Self {
            intervals: merge(iter.into_iter().collect()),
            config: RangeConfig::default(),
        }
    }
}

impl Extend<u64> for IntervalSet {
    fn extend<T: IntoIterator<Item = u64>>(&mut self, iter: T) {
        let mut intervals = std::mem::take(&mut self.intervals);
        intervals.extend(iter.into_iter().map(Interval::singleton));
        self.intervals = merge(intervals);
    }
}

impl Extend<Interval> for IntervalSet {
    fn extend<T: IntoIterator<Item = Interval>>(&mut self, iter: T) {
        let mut intervals = std::mem::take(&mut self.intervals);
        intervals.extend(iter);
        self.intervals = merge(intervals);
    }
}

impl Display for IntervalSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (idx, interval) in self.intervals.iter().enumerate() {
            if idx > 0 {
                f.write_str(self.config.splitter())?;
            }
            interval.fmt_with(f, self.config.range_splitter())?;
        }
        Ok(())
    }
}

impl PartialEq for IntervalSet {
    fn eq(&self, other: &Self) -> bool {
        self.intervals == other.intervals
    }
}

impl Eq for IntervalSet {}

impl Hash for IntervalSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.intervals.hash(state);
    }
}

impl PartialOrd for IntervalSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IntervalSet {
    /// Compare the intervals pairwise by `(min, max)`; if one sequence is a prefix of the other,
    /// the shorter one orders first.
    fn cmp(&self, other: &Self) -> Ordering {
        self.intervals.cmp(&other.intervals)
    }
}

type BorrowedRange = fn(&Interval) -> RangeInclusive<u64>;
type OwnedRange = fn(Interval) -> RangeInclusive<u64>;

/// An iterator over the integers of an [`IntervalSet`], created by [`IntervalSet::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: FlatMap<std::slice::Iter<'a, Interval>, RangeInclusive<u64>, BorrowedRange>,
}

impl Iterator for Iter<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl FusedIterator for Iter<'_> {}

/// An owning iterator over the integers of an [`IntervalSet`].
#[derive(Debug, Clone)]
pub struct IntoIter {
    inner: FlatMap<std::vec::IntoIter<Interval>, RangeInclusive<u64>, OwnedRange>,
}

impl Iterator for IntoIter {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for IntoIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl FusedIterator for IntoIter {}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = u64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for IntervalSet {
    type Item = u64;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self
                .intervals
                .into_iter()
                .flat_map(<RangeInclusive<u64> as From<Interval>>::from as OwnedRange),
        }
    }
}

macro_rules! impl_set_operator {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:ident) => {
        impl std::ops::$trait<&IntervalSet> for &IntervalSet {
            type Output = IntervalSet;

            fn $method(self, rhs: &IntervalSet) -> IntervalSet {
                self.$op(rhs)
            }
        }

        impl std::ops::$trait for IntervalSet {
            type Output = IntervalSet;

            fn $method(self, rhs: IntervalSet) -> IntervalSet {
                self.$op(&rhs)
            }
        }

        impl std::ops::$assign_trait<&IntervalSet> for IntervalSet {
            fn $assign_method(&mut self, rhs: &IntervalSet) {
                self.intervals = self.$op(rhs).intervals;
            }
        }
    };
}

impl_set_operator!(Add, add, AddAssign, add_assign, union);
impl_set_operator!(BitOr, bitor, BitOrAssign, bitor_assign, union);
impl_set_operator!(Sub, sub, SubAssign, sub_assign, difference);
impl_set_operator!(BitAnd, bitand, BitAndAssign, bitand_assign, intersection);
impl_set_operator!(BitXor, bitxor, BitXorAssign, bitxor_assign, symmetric_difference);

/// <https://github.com/serde-rs/serde/issues/1316#issue-332908452>
impl Serialize for IntervalSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IntervalSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;

        impl Visitor {
            fn invalid<E: de::Error>(found: &str) -> E {
                E::custom(Error::InvalidArgumentType {
                    found: found.into(),
                })
            }
        }

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = IntervalSet;

            fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str("range text, a non-negative integer, or a sequence of integers")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                IntervalSet::from_str(v).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(IntervalSet::from(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                u64::try_from(v)
                    .map(IntervalSet::from)
                    .map_err(|_| Self::invalid("negative integer"))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(value) = seq.next_element::<u64>()? {
                    values.push(value);
                }
                Ok(IntervalSet::from_integers(values))
            }

            fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
                Err(Self::invalid("boolean"))
            }

            fn visit_f64<E: de::Error>(self, _v: f64) -> Result<Self::Value, E> {
                Err(Self::invalid("float"))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Err(Self::invalid("null"))
            }

            fn visit_map<A>(self, _map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                Err(Self::invalid("map"))
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}
