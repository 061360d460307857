use thiserror::Error;

/// An error raised while parsing, building or mutating an [`IntervalSet`](crate::IntervalSet).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input was neither range text, an integer, nor a sequence of integers.
    #[error(
        "Invalid argument type: expected range text, an integer, or a sequence of integers, found {found}"
    )]
    InvalidArgumentType { found: Box<str> },
    /// An item is not `N` or `N-M`, or its lower bound exceeds its upper bound.
    #[error("Invalid range item `{item}` in line `{line}`")]
    InvalidRangeSyntax { item: Box<str>, line: Box<str> },
    /// An item contains a character that is neither a digit nor part of a delimiter.
    #[error("Invalid character `{character}` in item `{item}` of line `{line}`")]
    InvalidCharacter {
        character: char,
        item: Box<str>,
        line: Box<str>,
    },
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
    /// [`IntervalSet::remove`](crate::IntervalSet::remove) was called with an absent value.
    #[error("Value {0} is not a member of the range")]
    MissingValue(u64),
}

impl Error {
    /// The offending item, for errors raised while parsing text.
    pub fn item(&self) -> Option<&str> {
        match self {
            Self::InvalidRangeSyntax { item, .. } | Self::InvalidCharacter { item, .. } => {
                Some(item)
            }
            _ => None,
        }
    }

    /// The full line that failed to parse.
    pub fn line(&self) -> Option<&str> {
        match self {
            Self::InvalidRangeSyntax { line, .. } | Self::InvalidCharacter { line, .. } => {
                Some(line)
            }
            _ => None,
        }
    }
}

/// An invalid delimiter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("The splitter must not be empty")]
    EmptySplitter,
    #[error("The range splitter must not be empty")]
    EmptyRangeSplitter,
    #[error("The delimiter `{0}` must not contain digits")]
    DigitInDelimiter(Box<str>),
    #[error("The splitter and the range splitter must differ, but both are `{0}`")]
    AmbiguousDelimiters(Box<str>),
}
