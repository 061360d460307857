use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// The canonical splitter between items.
pub const DEFAULT_SPLITTER: &str = ",";
/// The canonical splitter between the bounds of a range item.
pub const DEFAULT_RANGE_SPLITTER: &str = "-";

/// How range text is tokenized and rendered.
///
/// A configuration is validated when it is built: both delimiters must be non-empty, free of
/// digits and distinct from each other. When one delimiter contains the other (e.g., a splitter
/// of `" "` and a range splitter of `" to "`), the longer delimiter wins during tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RangeOptions", into = "RangeOptions")]
pub struct RangeConfig {
    splitter: Box<str>,
    range_splitter: Box<str>,
    strict: bool,
}

impl RangeConfig {
    /// Create a strict configuration with the given delimiters.
    pub fn new(
        splitter: impl Into<Box<str>>,
        range_splitter: impl Into<Box<str>>,
    ) -> Result<Self, ConfigError> {
        let splitter = splitter.into();
        let range_splitter = range_splitter.into();

        if splitter.is_empty() {
            return Err(ConfigError::EmptySplitter);
        }
        if range_splitter.is_empty() {
            return Err(ConfigError::EmptyRangeSplitter);
        }
        for delimiter in [&splitter, &range_splitter] {
            if delimiter.chars().any(|c| c.is_ascii_digit()) {
                return Err(ConfigError::DigitInDelimiter(delimiter.clone()));
            }
        }
        if splitter == range_splitter {
            return Err(ConfigError::AmbiguousDelimiters(splitter));
        }

        Ok(Self {
            splitter,
            range_splitter,
            strict: true,
        })
    }

    /// The default delimiters, in lenient mode.
    pub fn lenient() -> Self {
        Self::default().with_strict(false)
    }

    /// Set whether malformed items are an error (`true`) or silently dropped (`false`).
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// The delimiter between items, e.g. `,` in `1,3-5`.
    pub fn splitter(&self) -> &str {
        &self.splitter
    }

    /// The delimiter between the bounds of a range, e.g. `-` in `3-5`.
    pub fn range_splitter(&self) -> &str {
        &self.range_splitter
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Returns `true` if the delimiters are the canonical `,` and `-`.
    pub fn has_default_delimiters(&self) -> bool {
        &*self.splitter == DEFAULT_SPLITTER && &*self.range_splitter == DEFAULT_RANGE_SPLITTER
    }
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            splitter: DEFAULT_SPLITTER.into(),
            range_splitter: DEFAULT_RANGE_SPLITTER.into(),
            strict: true,
        }
    }
}

/// Unvalidated, partially specified [`RangeConfig`] settings, as read from a configuration file
/// or the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RangeOptions {
    /// The delimiter between items. Defaults to `,`.
    pub splitter: Option<String>,
    /// The delimiter between the bounds of a range. Defaults to `-`.
    pub range_splitter: Option<String>,
    /// Whether malformed items are an error. Defaults to `true`.
    pub strict: Option<bool>,
}

impl RangeOptions {
    /// Combine two sets of options, preferring the values in `self`.
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        Self {
            splitter: self.splitter.or(other.splitter),
            range_splitter: self.range_splitter.or(other.range_splitter),
            strict: self.strict.or(other.strict),
        }
    }
}

impl TryFrom<RangeOptions> for RangeConfig {
    type Error = ConfigError;

    fn try_from(options: RangeOptions) -> Result<Self, Self::Error> {
        let RangeOptions {
            splitter,
            range_splitter,
            strict,
        } = options;
        let config = Self::new(
            splitter.unwrap_or_else(|| DEFAULT_SPLITTER.to_string()),
            range_splitter.unwrap_or_else(|| DEFAULT_RANGE_SPLITTER.to_string()),
        )?;
        Ok(config.with_strict(strict.unwrap_or(true)))
    }
}

impl From<RangeConfig> for RangeOptions {
    fn from(config: RangeConfig) -> Self {
        Self {
            splitter: Some(config.splitter.into_string()),
            range_splitter: Some(config.range_splitter.into_string()),
            strict: Some(config.strict),
        }
    }
}
