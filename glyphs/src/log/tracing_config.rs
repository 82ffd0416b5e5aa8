// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing::dispatcher;
use tracing_core::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{log::try_create_layers, ok};

pub const DEFAULT_LOG_FILE_NAME: &str = "glyphs_log.txt";

/// Where tracing output goes, and at which level.
///
/// Anything that converts [`Into<TracingConfig>`] can be handed to
/// [`crate::try_initialize_logging_global()`] and
/// [`crate::try_initialize_logging_thread_local()`]:
///
/// ```no_run
/// use styled_glyphs::{DisplayPreference, TracingConfig, WriterConfig,
///                     try_initialize_logging_thread_local};
///
/// let from_level: TracingConfig = tracing_core::LevelFilter::DEBUG.into();
/// let from_display: TracingConfig = DisplayPreference::Stderr.into();
/// let from_writer: TracingConfig = WriterConfig::File("glyphs.log".into()).into();
///
/// let _guard = try_initialize_logging_thread_local(from_display).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TracingConfig {
    pub level_filter: LevelFilter,
    pub writer_config: WriterConfig,
}

/// The `String` is the path of the log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String),
    DisplayAndFile(DisplayPreference, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

impl Default for TracingConfig {
    /// Logging is off by default.
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::OFF,
            writer_config: WriterConfig::None,
        }
    }
}

impl From<LevelFilter> for TracingConfig {
    fn from(level_filter: LevelFilter) -> Self {
        Self {
            level_filter,
            writer_config: WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string()),
        }
    }
}

impl From<tracing::Level> for TracingConfig {
    fn from(level: tracing::Level) -> Self { LevelFilter::from_level(level).into() }
}

impl From<DisplayPreference> for TracingConfig {
    fn from(preferred_display: DisplayPreference) -> Self {
        Self {
            level_filter: LevelFilter::DEBUG,
            writer_config: WriterConfig::Display(preferred_display),
        }
    }
}

impl From<WriterConfig> for TracingConfig {
    fn from(writer_config: WriterConfig) -> Self {
        Self {
            level_filter: LevelFilter::DEBUG,
            writer_config,
        }
    }
}

impl TracingConfig {
    /// Builds the config the `glyphs_demo` binary uses: stderr when no file is given.
    #[must_use]
    pub fn new_display_or_file(level_filter: LevelFilter, log_file: Option<String>) -> Self {
        let writer_config = match log_file {
            Some(path) => WriterConfig::File(path),
            None => WriterConfig::Display(DisplayPreference::Stderr),
        };
        Self {
            level_filter,
            writer_config,
        }
    }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    /// Installs the layers as the process wide subscriber. Can only succeed once.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file can't be created, or a global subscriber is
    /// already set.
    pub fn install_global(self) -> miette::Result<()> {
        use miette::IntoDiagnostic;

        let layers = try_create_layers(self)?;
        tracing_subscriber::registry()
            .with(layers)
            .try_init()
            .into_diagnostic()?;
        ok!()
    }

    /// Installs the layers for the current thread until the guard is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file can't be created.
    pub fn install_thread_local(self) -> miette::Result<dispatcher::DefaultGuard> {
        let layers = try_create_layers(self)?;
        let subscriber = tracing_subscriber::registry().with(layers);
        ok!(tracing::subscriber::set_default(subscriber))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_is_off() {
        let it = TracingConfig::default();
        assert_eq!(it.get_level_filter(), LevelFilter::OFF);
        assert_eq!(it.get_writer_config(), WriterConfig::None);
    }

    #[test]
    fn conversions() {
        let from_level: TracingConfig = tracing::Level::INFO.into();
        assert_eq!(from_level.level_filter, LevelFilter::INFO);
        assert_eq!(
            from_level.writer_config,
            WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string())
        );

        let from_display: TracingConfig = DisplayPreference::Stdout.into();
        assert_eq!(
            from_display.writer_config,
            WriterConfig::Display(DisplayPreference::Stdout)
        );
    }

    #[test]
    fn demo_config_picks_stderr_without_a_file() {
        assert_eq!(
            TracingConfig::new_display_or_file(LevelFilter::WARN, None).writer_config,
            WriterConfig::Display(DisplayPreference::Stderr)
        );
        assert_eq!(
            TracingConfig::new_display_or_file(LevelFilter::WARN, Some("a.log".into()))
                .writer_config,
            WriterConfig::File("a.log".into())
        );
    }
}
