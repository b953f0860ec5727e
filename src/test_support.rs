//! Shared helpers for unit tests: a recording log sink, a context built over
//! it, and a scriptable started-mutex with failure injection.

use crate::config::Config;
use crate::context::Context;
use crate::logger::{LogLevel, LogSink};
use crate::mutex::Mutex as LifecycleMutex;
use std::sync::{Arc, Mutex};

/// One captured log record.
#[derive(Debug, Clone)]
pub(crate) struct LogRecord {
    pub level: LogLevel,
    pub logger: String,
    pub message: String,
}

/// Sink capturing every record that passed the severity filter.
#[derive(Default)]
pub(crate) struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub(crate) fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }

    pub(crate) fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level)
            .map(|r| r.message)
            .collect()
    }
}

impl LogSink for MemorySink {
    fn emit(&self, level: LogLevel, logger: &str, message: &str) {
        self.records.lock().unwrap().push(LogRecord {
            level,
            logger: logger.to_string(),
            message: message.to_string(),
        });
    }
}

/// Context whose loggers record into a shared [`MemorySink`]. The default
/// level is raised to `danger` so desync reports are observable, matching
/// how the embedding service is expected to configure itself.
pub(crate) fn test_context(mut config: Config) -> (Context, Arc<MemorySink>) {
    if config.logger.default_log_level.is_none() {
        config.logger.default_log_level = Some("danger".to_string());
    }
    let sink = Arc::new(MemorySink::default());
    let context = Context::with_sink(config, sink.clone());
    (context, sink)
}

/// A started-mutex stand-in with scriptable outcomes.
///
/// `on_free` runs on every free attempt before the scripted result is
/// applied; tests use it to sabotage the local lock file mid-protocol, the
/// way the original compensation paths can interleave with external failures.
#[derive(Default)]
pub(crate) struct ScriptedMutex {
    pub lock_ok: bool,
    pub free_ok: bool,
    pub acquired: bool,
    pub locked_tokens: Vec<String>,
    pub freed_tokens: Vec<String>,
    pub on_free: Option<Box<dyn FnMut() + Send>>,
}

impl ScriptedMutex {
    /// A well-behaved, initially free mutex.
    pub(crate) fn reliable() -> Self {
        Self {
            lock_ok: true,
            free_ok: true,
            ..Default::default()
        }
    }

    /// A well-behaved mutex recovered as already held.
    pub(crate) fn already_acquired() -> Self {
        Self {
            acquired: true,
            ..Self::reliable()
        }
    }
}

impl LifecycleMutex for ScriptedMutex {
    fn is_lock_acquired(&self) -> bool {
        self.acquired
    }

    fn lock(&mut self, auth: &str) -> bool {
        if self.acquired || !self.lock_ok {
            return false;
        }
        self.acquired = true;
        self.locked_tokens.push(auth.to_string());
        true
    }

    fn free(&mut self, auth: &str) -> bool {
        if !self.acquired {
            return false;
        }
        self.freed_tokens.push(auth.to_string());
        if let Some(hook) = self.on_free.as_mut() {
            hook();
        }
        if !self.free_ok {
            return false;
        }
        self.acquired = false;
        true
    }
}
