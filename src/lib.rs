//! Proxyguard: restart-safe dual-lock coordination for single-instance
//! service lifecycles.
//!
//! A [`LifecycleController`] guards the start/stop lifecycle of a
//! long-running service by composing two independently-failing locks into one
//! logically atomic transition: a locally persisted [`FileMutex`] that
//! survives process restarts, and a second "started" mutex (any
//! [`mutex::Mutex`] backend, possibly shared or remote) whose acquisition
//! marks the service as running in some external coordination context.
//!
//! Each successful start generates a fresh ownership token; releasing either
//! lock requires presenting exactly that token. Partial failures trigger a
//! single compensating action (and are otherwise reported, never silently
//! repaired), so the controller detects inconsistency between the two locks
//! rather than guaranteeing atomicity across arbitrary crash points.
//!
//! The service itself is opaque to this crate: it participates only through
//! the three [`Service`] hooks, which are invoked, never implemented, here.

pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod logger;
pub mod mutex;
pub mod token;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use context::Context;
pub use controller::{LifecycleController, Service};
pub use error::{GuardError, Result};
pub use logger::{LogLevel, LogSink, Logger, LoggerFactory};
pub use mutex::{BackedMutex, FileMutex, LockBackend, Mutex};
pub use token::{DEFAULT_AUTH_TOKEN_SIZE, TOKEN_ALPHABET, random_token};
