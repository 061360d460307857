//! Canonical sets of non-negative integers, written as human-readable range text.
//!
//! Port lists, protocol numbers and VLAN IDs are routinely written by hand or scraped from device
//! configuration, unsorted, duplicated and overlapping. This crate parses such text into an
//! [`IntervalSet`], merges it into a canonical form, and renders it back:
//!
//! ```text
//! "3-5,1,3-5"  ->  "1,3-5"
//! ```
//!
//! * [`Interval`]: a closed interval `[min, max]`, parsed from `N` or `N-M`.
//! * [`IntervalSet`]: sorted, disjoint, non-adjacent intervals with set algebra (union,
//!   intersection, difference, symmetric difference) and sequence-style access.
//! * [`Canonicalizer`]: a strict, read-only view for callers that only need normalized text.
//! * [`RangeConfig`]: the delimiters (`,` and `-` by default) and whether malformed items are an
//!   error or silently dropped.
//!
//! Merging is an interval sweep, so the cost of parsing and combining sets depends on the number
//! of intervals, not on how many integers they cover.

pub use canonicalizer::Canonicalizer;
pub use config::{DEFAULT_RANGE_SPLITTER, DEFAULT_SPLITTER, RangeConfig, RangeOptions};
pub use error::{ConfigError, Error};
pub use interval::Interval;
pub use interval_set::{IntervalSet, IntoIter, Iter};

mod canonicalizer;
mod config;
mod error;
mod interval;
mod interval_set;
mod parse;
