use tracing::debug;
use unscanny::Scanner;

use crate::{Error, Interval, RangeConfig};

/// An item of range text, as delimited by the configured splitter.
#[derive(Debug)]
struct Item<'a> {
    /// The item as written in the line.
    raw: &'a str,
    /// The item with each range splitter replaced by `-`.
    canonical: String,
    /// The first character that is neither a digit nor part of a delimiter.
    invalid: Option<char>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Splitter,
    RangeSplitter,
}

/// Split a line into items, normalizing range splitters to `-` as we go.
///
/// The line is scanned once. At every position the longer delimiter is tried first, so that a
/// range splitter such as `" to "` is not consumed as two `" "` splitters.
fn split_items<'a>(line: &'a str, config: &RangeConfig) -> Vec<Item<'a>> {
    if line.is_empty() {
        return Vec::new();
    }

    let delimiters = if config.splitter().len() >= config.range_splitter().len() {
        [
            (config.splitter(), Delimiter::Splitter),
            (config.range_splitter(), Delimiter::RangeSplitter),
        ]
    } else {
        [
            (config.range_splitter(), Delimiter::RangeSplitter),
            (config.splitter(), Delimiter::Splitter),
        ]
    };

    let mut scanner = Scanner::new(line);
    let mut items = Vec::new();
    let mut start = 0;
    let mut canonical = String::new();
    let mut invalid = None;

    loop {
        let end = scanner.cursor();
        if scanner.done() {
            items.push(Item {
                raw: &line[start..end],
                canonical,
                invalid,
            });
            return items;
        }

        let delimiter = delimiters
            .iter()
            .find(|(text, _)| scanner.eat_if(*text))
            .map(|(_, delimiter)| *delimiter);
        match delimiter {
            Some(Delimiter::Splitter) => {
                items.push(Item {
                    raw: &line[start..end],
                    canonical: std::mem::take(&mut canonical),
                    invalid: invalid.take(),
                });
                start = scanner.cursor();
            }
            Some(Delimiter::RangeSplitter) => canonical.push('-'),
            None => {
                if let Some(c) = scanner.eat() {
                    if !c.is_ascii_digit() {
                        invalid.get_or_insert(c);
                    }
                    canonical.push(c);
                }
            }
        }
    }
}

/// Parse a line of range text into (unmerged) intervals.
///
/// In strict mode, the first malformed item aborts parsing. Otherwise, malformed items are
/// dropped and the remaining items are returned.
pub(crate) fn parse_intervals(line: &str, config: &RangeConfig) -> Result<Vec<Interval>, Error> {
    let items = split_items(line, config);
    let mut intervals = Vec::with_capacity(items.len());
    for item in items {
        let parsed = match item.invalid {
            Some(character) => Err(Error::InvalidCharacter {
                character,
                item: item.raw.into(),
                line: line.into(),
            }),
            None => Interval::parse_canonical(&item.canonical).ok_or_else(|| {
                Error::InvalidRangeSyntax {
                    item: item.raw.into(),
                    line: line.into(),
                }
            }),
        };
        match parsed {
            Ok(interval) => intervals.push(interval),
            Err(err) if config.is_strict() => return Err(err),
            Err(err) => debug!("Dropping range item: {err}"),
        }
    }
    Ok(intervals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_items<'a>(line: &'a str, config: &RangeConfig) -> Vec<(&'a str, String)> {
        split_items(line, config)
            .into_iter()
            .map(|item| (item.raw, item.canonical))
            .collect()
    }

    #[test]
    fn split_default() {
        let config = RangeConfig::default();
        assert_eq!(
            raw_items("1,3-5,", &config),
            [
                ("1", "1".to_string()),
                ("3-5", "3-5".to_string()),
                ("", String::new())
            ]
        );
        assert!(raw_items("", &config).is_empty());
    }

    #[test]
    fn split_prefers_longer_delimiter() {
        let config = RangeConfig::new(" ", " to ").unwrap();
        assert_eq!(
            raw_items("1 3 to 5", &config),
            [("1", "1".to_string()), ("3 to 5", "3-5".to_string())]
        );

        let config = RangeConfig::new(" | ", "|").unwrap();
        assert_eq!(
            raw_items("1|2 | 4", &config),
            [("1|2", "1-2".to_string()), ("4", "4".to_string())]
        );
    }

    #[test]
    fn foreign_characters_do_not_corrupt_digits() {
        let config = RangeConfig::new(";", "..").unwrap();
        let items = split_items("1..3;4-5", &config);
        assert_eq!(items[0].canonical, "1-3");
        assert_eq!(items[0].invalid, None);
        assert_eq!(items[1].raw, "4-5");
        assert_eq!(items[1].invalid, Some('-'));
    }

    #[test]
    fn lenient_drops_items() {
        let intervals = parse_intervals("1,x,3-2,4-5", &RangeConfig::lenient()).unwrap();
        assert_eq!(
            intervals,
            [Interval::singleton(1), Interval::new(4, 5).unwrap()]
        );
    }

    #[test]
    fn strict_reports_first_error() {
        let err = parse_intervals("1,3-2,x", &RangeConfig::default()).unwrap_err();
        assert_eq!(err.item(), Some("3-2"));
        assert_eq!(err.line(), Some("1,3-2,x"));
    }
}
