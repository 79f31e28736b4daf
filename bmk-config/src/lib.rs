//! Shared configuration loader for the pdf-bookmark toolchain.
//!
//! `defaults/bmk.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`BmkConfig`].

use bmk_babel::directive::StyleContext;
use bmk_babel::formats::bmk::formatting_rules::BmkFormattingRules;
use bmk_babel::formats::bmk::parser::{ErrorPolicy, ParseOptions};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/bmk.default.toml");

/// Top-level configuration consumed by pdf-bookmark applications.
#[derive(Debug, Clone, Deserialize)]
pub struct BmkConfig {
    pub parse: ParseSettings,
    pub convert: ConvertConfig,
}

/// How bmk input is read.
#[derive(Debug, Clone, Deserialize)]
pub struct ParseSettings {
    pub entry_errors: ErrorPolicy,
    pub directive_errors: ErrorPolicy,
    pub level_indent: usize,
}

impl From<&ParseSettings> for ParseOptions {
    fn from(settings: &ParseSettings) -> Self {
        ParseOptions {
            entry_errors: settings.entry_errors,
            directive_errors: settings.directive_errors,
            collapse_level: None,
            initial_context: StyleContext {
                level_indent: settings.level_indent,
                ..StyleContext::default()
            },
        }
    }
}

impl From<ParseSettings> for ParseOptions {
    fn from(settings: ParseSettings) -> Self {
        ParseOptions::from(&settings)
    }
}

/// Conversion defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    /// Negative values keep the collapse flags of the input
    pub collapse_level: i64,
    pub default_format: String,
    pub bmk: BmkEmitConfig,
}

impl ConvertConfig {
    /// The configured collapse level, if one should be applied.
    pub fn collapse_level(&self) -> Option<usize> {
        usize::try_from(self.collapse_level).ok()
    }
}

/// Mirrors the knobs exposed by the bmk serializer.
#[derive(Debug, Clone, Deserialize)]
pub struct BmkEmitConfig {
    pub level_indent: usize,
    pub separator_dots: usize,
    pub directives: bool,
}

impl From<&BmkEmitConfig> for BmkFormattingRules {
    fn from(config: &BmkEmitConfig) -> Self {
        BmkFormattingRules {
            level_indent: config.level_indent,
            separator_dots: config.separator_dots,
            directives: config.directives,
        }
    }
}

impl From<BmkEmitConfig> for BmkFormattingRules {
    fn from(config: BmkEmitConfig) -> Self {
        BmkFormattingRules::from(&config)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<BmkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<BmkConfig, ConfigError> {
    Loader::new().build()
}
