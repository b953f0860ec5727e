//! Leveled, named logging for proxyguard.
//!
//! The lock protocol reports everything noteworthy through an injected
//! [`Logger`]; severity filtering and the output destination live entirely on
//! this side of the seam. Loggers are built by a [`LoggerFactory`] that
//! resolves per-logger levels and display names from the configuration.
//!
//! Five severities are used, from most to least severe: `error` (an operation
//! failed), `danger` (the system is in an operationally suspect state, e.g. a
//! lock desync), `warning`, `info` and `debug`.

use crate::config::LoggerSettings;
use std::sync::Arc;

/// Severity of a log record, or the maximum severity a logger emits.
///
/// Variant order is significant: a record is emitted when its level is at or
/// below the logger's maximum. `Off` is only meaningful as a maximum (the
/// configured name is `"none"`) and silences the logger entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Off,
    Error,
    Danger,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    /// Short tag used in console output.
    pub fn tag(self) -> &'static str {
        match self {
            LogLevel::Off => "",
            LogLevel::Error => "ERR",
            LogLevel::Danger => "DGR",
            LogLevel::Warning => "WRN",
            LogLevel::Info => "INF",
            LogLevel::Debug => "DBG",
        }
    }

    /// Parse a configured level name. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<LogLevel> {
        match name {
            "error" => Some(LogLevel::Error),
            "danger" => Some(LogLevel::Danger),
            "warning" => Some(LogLevel::Warning),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "none" => Some(LogLevel::Off),
            _ => None,
        }
    }
}

/// Destination for records that passed the severity filter.
pub trait LogSink: Send + Sync {
    fn emit(&self, level: LogLevel, logger: &str, message: &str);
}

/// Sink writing to the process console: error/danger/warning go to stderr,
/// info/debug to stdout.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn emit(&self, level: LogLevel, logger: &str, message: &str) {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
        match level {
            LogLevel::Error | LogLevel::Danger | LogLevel::Warning => {
                eprintln!("{} {} [{}] {}", timestamp, level.tag(), logger, message);
            }
            LogLevel::Info | LogLevel::Debug => {
                println!("{} {} [{}] {}", timestamp, level.tag(), logger, message);
            }
            LogLevel::Off => {}
        }
    }
}

/// A named logger with a fixed maximum severity.
#[derive(Clone)]
pub struct Logger {
    name: String,
    max_level: LogLevel,
    sink: Arc<dyn LogSink>,
}

impl Logger {
    pub fn new(name: impl Into<String>, max_level: LogLevel, sink: Arc<dyn LogSink>) -> Self {
        Self {
            name: name.into(),
            max_level,
            sink,
        }
    }

    /// The name emitted with every record from this logger.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn log(&self, level: LogLevel, message: &str) {
        if level == LogLevel::Off || level > self.max_level {
            return;
        }
        self.sink.emit(level, &self.name, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn danger(&self, message: &str) {
        self.log(LogLevel::Danger, message);
    }

    pub fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("max_level", &self.max_level)
            .finish_non_exhaustive()
    }
}

/// Builds [`Logger`] instances according to the configured logging setup.
///
/// Level resolution order for `build(name)`: the per-logger override, then
/// the configured default level, then [`LogLevel::Error`]. Unknown level
/// names are reported through the factory's own logger at warning severity
/// and treated as absent.
pub struct LoggerFactory {
    settings: LoggerSettings,
    sink: Arc<dyn LogSink>,
    logger: Logger,
}

impl LoggerFactory {
    /// Factory writing to the console.
    pub fn new(settings: LoggerSettings) -> Self {
        Self::with_sink(settings, Arc::new(ConsoleSink))
    }

    /// Factory writing to an explicit sink (tests use a recording sink).
    pub fn with_sink(settings: LoggerSettings, sink: Arc<dyn LogSink>) -> Self {
        // Bootstrap logger so bad level names in the factory's own
        // configuration can still be reported.
        let mut factory = Self {
            logger: Logger::new("logger.factory", LogLevel::Warning, sink.clone()),
            settings,
            sink,
        };

        let factory_level =
            factory.resolve_level(factory.settings.logger_factory_level.as_deref());
        factory.logger = Logger::new("logger.factory", factory_level, factory.sink.clone());
        factory
    }

    fn convert_level(&self, name: Option<&str>) -> Option<LogLevel> {
        let name = name?;
        let level = LogLevel::from_name(name);
        if level.is_none() {
            self.logger
                .warning(&format!("unknown log level name: {}", name));
        }
        level
    }

    fn resolve_level(&self, name: Option<&str>) -> LogLevel {
        self.convert_level(name)
            .or_else(|| self.convert_level(self.settings.default_log_level.as_deref()))
            .unwrap_or(LogLevel::Error)
    }

    /// Build the logger registered under `name`.
    pub fn build(&self, name: &str) -> Logger {
        let overrides = self.settings.loggers.get(name);

        let level = self.resolve_level(overrides.and_then(|o| o.log_level.as_deref()));
        let display_name = overrides
            .and_then(|o| o.display_name.clone())
            .unwrap_or_else(|| name.to_string());

        Logger::new(display_name, level, self.sink.clone())
    }
}
