//! Shared runtime context.
//!
//! A [`Context`] bundles the loaded configuration with the logger factory
//! built from it. Components receive a reference to the context at
//! construction time and pull their named loggers and settings from it.

use crate::config::Config;
use crate::logger::{LogSink, LoggerFactory};
use std::sync::Arc;

/// Configuration plus the logging facility derived from it.
pub struct Context {
    pub config: Config,
    pub logger_factory: LoggerFactory,
}

impl Context {
    /// Context logging to the console.
    pub fn new(config: Config) -> Self {
        let logger_factory = LoggerFactory::new(config.logger.clone());
        Self {
            config,
            logger_factory,
        }
    }

    /// Context logging to an explicit sink (used by tests to capture records).
    pub fn with_sink(config: Config, sink: Arc<dyn LogSink>) -> Self {
        let logger_factory = LoggerFactory::with_sink(config.logger.clone(), sink);
        Self {
            config,
            logger_factory,
        }
    }
}
