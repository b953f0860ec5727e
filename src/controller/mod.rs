//! Proxy lifecycle controller.
//!
//! Composes two independently-failing locks into one logically atomic
//! start/stop transition for a single-instance service:
//!
//! - the *started mutex*, any [`Mutex`] backend, possibly shared or remote,
//!   whose acquisition marks the service as running in some external
//!   coordination context;
//! - the *local file mutex*, a [`FileMutex`] over a storage path that records
//!   this controller's own belief about its running state across restarts.
//!
//! `start` drives the started mutex first, then the local mutex; `close`
//! releases in the reverse order. On a partial failure the controller
//! attempts exactly one compensating action (freeing the started mutex after
//! a failed local lock, re-locking the local mutex after a failed started
//! free). If the compensation also fails the two locks disagree, a state
//! called a *soft-lock*. It is logged as requiring manual intervention and
//! never repaired automatically.
//!
//! # Concurrency
//!
//! `start` and `close` may block on I/O but are not designed for concurrent
//! invocation on one controller; the `&mut self` receivers make callers
//! serialize them. The local storage path must not be shared with any other
//! controller instance. There are no timeouts, retries or lock expiry.


use crate::context::Context;
use crate::logger::Logger;
use crate::mutex::{FileMutex, Mutex};
use crate::token::{DEFAULT_AUTH_TOKEN_SIZE, random_token};
use std::path::PathBuf;

/// Hooks supplied by the concrete service whose lifecycle is being guarded.
///
/// Each hook is invoked exactly once per corresponding transition. The lock
/// protocol never depends on what the hooks do; they are opaque extension
/// points (the actual proxying lives behind them, outside this crate).
pub trait Service {
    /// Invoked once during controller construction.
    fn on_init(&mut self);

    /// Invoked when the service becomes (or is recovered as) started.
    fn on_run(&mut self);

    /// Invoked when the service is cleanly stopped.
    fn on_end(&mut self);
}

/// Two-phase start/close protocol over a started mutex and a local lock file.
pub struct LifecycleController<M: Mutex, S: Service> {
    started_mutex: M,
    local_mutex: FileMutex,
    service: S,
    logger: Logger,
    auth_token_size: Option<i64>,
}

impl<M: Mutex, S: Service> LifecycleController<M, S> {
    /// Build the controller, recovering lifecycle state from `storage_path`.
    ///
    /// Any disagreement between the recovered local state and the started
    /// mutex is logged at danger severity and left as-is. `on_init` always
    /// runs; when the local mutex recovered as acquired the controller is
    /// treated as already started and `on_run` fires immediately.
    pub fn new(
        context: &Context,
        started_mutex: M,
        service: S,
        storage_path: impl Into<PathBuf>,
    ) -> Self {
        let logger = context.logger_factory.build("ProxyController");
        let local_mutex = FileMutex::open(
            context.logger_factory.build("ProxyControllerStorage"),
            storage_path,
        );

        let mut controller = Self {
            started_mutex,
            local_mutex,
            service,
            logger,
            auth_token_size: context.config.auth_token_size,
        };

        if controller.local_mutex.is_lock_acquired()
            != controller.started_mutex.is_lock_acquired()
        {
            controller.logger.danger(
                "the local lock file storing the start state is not synchronized \
                 with the potentially remote started mutex",
            );
        }

        controller.service.on_init();
        if controller.local_mutex.is_lock_acquired() {
            controller.service.on_run();
        }

        controller
    }

    /// Two-phase acquire. Returns `true` only when both locks were taken with
    /// the same fresh token, in which case `on_run` has fired.
    ///
    /// The started mutex is locked first; if the local lock then fails, the
    /// started mutex is freed again as compensation. A failed compensation is
    /// logged as a soft-lock. The local state is never touched before the
    /// started mutex succeeded.
    pub fn start(&mut self) -> bool {
        if self.local_mutex.is_lock_acquired() {
            return false;
        }

        let token = random_token(self.resolve_token_size());

        if !self.started_mutex.lock(&token) {
            return false;
        }

        if !self.local_mutex.lock(&token) {
            if !self.started_mutex.free(&token) {
                self.logger.error(
                    "could not free the started mutex after a failed local lock; \
                     the service may be soft-locked and need a manual restart",
                );
            }
            return false;
        }

        self.service.on_run();
        true
    }

    /// Two-phase release, mirror image of [`start`](Self::start). Returns
    /// `true` only when both locks were released, in which case `on_end` has
    /// fired.
    ///
    /// The token recovered from the local mutex is presented to both frees.
    /// The local mutex is freed first; if the started free then fails, the
    /// local mutex is re-locked with the same token to restore the pre-close
    /// state. A failed re-lock is logged as a soft-lock.
    pub fn close(&mut self) -> bool {
        if !self.local_mutex.is_lock_acquired() {
            return false;
        }

        let Some(token) = self.local_mutex.current_auth_token().map(str::to_owned) else {
            return false;
        };

        if !self.local_mutex.free(&token) {
            return false;
        }

        if !self.started_mutex.free(&token) {
            if !self.local_mutex.lock(&token) {
                self.logger.error(
                    "could not re-lock the local lock file after a failed started-mutex \
                     release; the service may be soft-locked",
                );
            }
            return false;
        }

        self.service.on_end();
        true
    }

    /// Whether the controller currently considers the service started.
    pub fn is_started(&self) -> bool {
        self.local_mutex.is_lock_acquired()
    }

    pub fn started_mutex(&self) -> &M {
        &self.started_mutex
    }

    pub fn local_mutex(&self) -> &FileMutex {
        &self.local_mutex
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Token length from configuration, falling back to the default when the
    /// value is absent or non-positive (the latter is a misconfiguration and
    /// gets reported).
    fn resolve_token_size(&self) -> usize {
        match self.auth_token_size {
            Some(size) if size > 0 => size as usize,
            Some(_) => {
                self.logger.danger(
                    "configured auth_token_size is not positive, falling back to the default",
                );
                DEFAULT_AUTH_TOKEN_SIZE
            }
            None => DEFAULT_AUTH_TOKEN_SIZE,
        }
    }
}
