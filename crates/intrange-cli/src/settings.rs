use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use intrange::{ConfigError, RangeConfig, RangeOptions};

use crate::cli::GlobalArgs;

/// The name of the configuration file discovered in the working directory.
pub(crate) const CONFIG_FILE: &str = "intrange.toml";

/// Environment variables read by `intrange`.
pub(crate) struct EnvVars;

impl EnvVars {
    /// Path to a configuration file, equivalent to `--config`.
    pub(crate) const INTRANGE_CONFIG: &'static str = "INTRANGE_CONFIG";
}

#[derive(Debug, Error)]
pub(crate) enum SettingsError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to parse: `{}`", _0.display())]
    Toml(PathBuf, #[source] Box<toml::de::Error>),

    #[error("Invalid range settings")]
    Config(#[source] ConfigError),
}

/// Resolve the [`RangeConfig`] for this invocation.
///
/// Command-line flags take precedence over the configuration file, which takes precedence over
/// the defaults. An explicit `--config` (or `INTRANGE_CONFIG`) must exist; `intrange.toml` in the
/// working directory is used only if present.
pub(crate) fn resolve(args: &GlobalArgs) -> Result<RangeConfig, SettingsError> {
    let file = match &args.config {
        Some(path) => Some(read_file(path)?),
        None => {
            let path = Path::new(CONFIG_FILE);
            if path.is_file() {
                Some(read_file(path)?)
            } else {
                None
            }
        }
    };

    let options = RangeOptions {
        splitter: args.splitter.clone(),
        range_splitter: args.range_splitter.clone(),
        strict: args.lenient.then_some(false),
    }
    .combine(file.unwrap_or_default());

    let config = RangeConfig::try_from(options).map_err(SettingsError::Config)?;
    let mode = if config.is_strict() { "strict" } else { "lenient" };
    if config.has_default_delimiters() {
        debug!("Using the default delimiters ({mode})");
    } else {
        debug!(
            "Using splitter `{}` and range splitter `{}` ({mode})",
            config.splitter(),
            config.range_splitter(),
        );
    }
    Ok(config)
}

/// Read the range options from a TOML file.
fn read_file(path: &Path) -> Result<RangeOptions, SettingsError> {
    debug!("Reading settings from: `{}`", path.display());
    let content = fs_err::read_to_string(path)?;
    toml::from_str::<RangeOptions>(&content)
        .map_err(|err| SettingsError::Toml(path.to_path_buf(), Box::new(err)))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn global(config: Option<PathBuf>) -> GlobalArgs {
        GlobalArgs {
            splitter: None,
            range_splitter: None,
            lenient: false,
            config,
            quiet: false,
            verbose: 0,
            color: crate::cli::ColorChoice::Auto,
        }
    }

    #[test]
    fn flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "splitter = \" \"\nrange-splitter = \":\"\nstrict = false").unwrap();

        let mut args = global(Some(file.path().to_path_buf()));
        let config = resolve(&args).unwrap();
        assert_eq!(config.splitter(), " ");
        assert_eq!(config.range_splitter(), ":");
        assert!(!config.is_strict());
        assert!(!config.has_default_delimiters());

        args.range_splitter = Some("..".to_string());
        let config = resolve(&args).unwrap();
        assert_eq!(config.splitter(), " ");
        assert_eq!(config.range_splitter(), "..");
    }

    #[test]
    fn defaults_without_file() {
        let config = resolve(&global(None)).unwrap();
        assert!(config.has_default_delimiters());
        assert!(config.is_strict());

        let mut args = global(None);
        args.lenient = true;
        let config = resolve(&args).unwrap();
        assert!(config.has_default_delimiters());
        assert!(!config.is_strict());
    }

    #[test]
    fn unknown_field() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seperator = \";\"").unwrap();

        let err = resolve(&global(Some(file.path().to_path_buf()))).unwrap_err();
        assert!(matches!(err, SettingsError::Toml(..)));
    }

    #[test]
    fn invalid_delimiters() {
        let mut args = global(None);
        args.splitter = Some("-".to_string());
        let err = resolve(&args).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Config(ConfigError::AmbiguousDelimiters(_))
        ));
    }
}
