//! Mutex abstraction for the dual-lock lifecycle protocol.
//!
//! Two capabilities are split across two traits:
//!
//! - [`Mutex`] is the public lock/free contract the lifecycle controller
//!   drives. Implementations may be backed by anything, including a remote
//!   coordination service.
//! - [`LockBackend`] is the narrower capability a concrete backend supplies:
//!   the actual acquire/release against its store, plus an optional
//!   persistence hook. The shared orchestration (state check, delegate,
//!   persist) lives once in [`BackedMutex`] rather than in each backend.
//!
//! # State and ownership
//!
//! A mutex owns its cached state (`lock_acquired`, and for backends the
//! current holder token); all transitions go through `lock`/`free`. State is
//! only flipped after the backend reports success, so after a failed backend
//! call the cached state still matches the last successful operation.
//!
//! # Concurrency
//!
//! Operations may block on I/O. One mutex instance is not meant to be driven
//! concurrently; the `&mut self` receivers make callers serialize access at
//! compile time, which matches the protocol's single-caller contract.

mod file;


pub use file::FileMutex;

/// The lock/free contract shared by every backend.
pub trait Mutex {
    /// Whether this mutex currently believes it is held. Pure state read.
    fn is_lock_acquired(&self) -> bool;

    /// Acquire the lock on behalf of `auth`.
    ///
    /// Returns `false` without side effects when the lock is already held
    /// (the held token is not replaced), or when the backend fails.
    fn lock(&mut self, auth: &str) -> bool;

    /// Release the lock, presenting the `auth` token that acquired it.
    ///
    /// Returns `false` without side effects when the lock is not held, when
    /// `auth` does not match the current holder, or when the backend fails
    /// (in which case the lock remains logically held).
    fn free(&mut self, auth: &str) -> bool;
}

/// Backend capability driven by [`BackedMutex`].
///
/// `free_lock` must itself enforce ownership: it refuses to release unless
/// the presented token equals the recorded holder, so a non-owner can never
/// release someone else's lock.
pub trait LockBackend {
    /// Record `auth` as the holder in the backing store. `true` on success.
    fn acquire_lock(&mut self, auth: &str) -> bool;

    /// Release the lock in the backing store if `auth` is the holder.
    /// `true` on success.
    fn free_lock(&mut self, auth: &str) -> bool;

    /// Notification hook invoked after every successful transition, with the
    /// new holder (`None` after a release) and the new acquired flag.
    ///
    /// The default is a no-op: a backend whose store is itself durable (like
    /// the lock file) needs nothing here. Backends that must additionally
    /// notify a registry override it.
    fn persist(&mut self, auth: Option<&str>, has_lock: bool) {
        let _ = (auth, has_lock);
    }
}

/// Template-method mutex: the shared orchestration over a [`LockBackend`].
#[derive(Debug)]
pub struct BackedMutex<B: LockBackend> {
    backend: B,
    lock_acquired: bool,
}

impl<B: LockBackend> BackedMutex<B> {
    /// A mutex starting out unacquired.
    pub fn new(backend: B) -> Self {
        Self::with_state(backend, false)
    }

    /// A mutex whose held/unheld state was recovered by the backend (e.g.
    /// from a lock file surviving a restart).
    pub fn with_state(backend: B, lock_acquired: bool) -> Self {
        Self {
            backend,
            lock_acquired,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: LockBackend> Mutex for BackedMutex<B> {
    fn is_lock_acquired(&self) -> bool {
        self.lock_acquired
    }

    fn lock(&mut self, auth: &str) -> bool {
        if self.lock_acquired {
            return false;
        }

        if !self.backend.acquire_lock(auth) {
            return false;
        }

        self.lock_acquired = true;
        self.backend.persist(Some(auth), true);
        true
    }

    fn free(&mut self, auth: &str) -> bool {
        if !self.lock_acquired {
            return false;
        }

        if !self.backend.free_lock(auth) {
            return false;
        }

        self.lock_acquired = false;
        self.backend.persist(None, false);
        true
    }
}
