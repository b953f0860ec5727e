//! File-backed mutex.
//!
//! The lock state is a single filesystem entry: a regular file at the
//! configured path means "locked" and its byte content is the holder's auth
//! token. Construction reads the path synchronously, which is how lock
//! ownership survives a process restart without re-negotiation.
//!
//! No advisory or OS-level locking is used; correctness rests on the token
//! discipline alone, so no other process may write this path.

use super::{BackedMutex, LockBackend, Mutex};
use crate::logger::Logger;
use std::fs;
use std::path::{Path, PathBuf};

/// [`LockBackend`] persisting the holder token as the lock file content.
#[derive(Debug)]
pub struct FileBackend {
    logger: Logger,
    path: PathBuf,
    current_auth: Option<String>,
}

impl FileBackend {
    /// Read the initial lock state from disk.
    ///
    /// A regular file with non-empty content means the lock was held by a
    /// previous run; its content becomes the current token. A missing path is
    /// the normal unlocked state and logs nothing. A directory, or a file
    /// that exists but cannot be read, is logged as an error and treated as
    /// unlocked.
    fn read_initial_state(logger: &Logger, path: &Path) -> Option<String> {
        match fs::read_to_string(path) {
            Ok(content) if content.is_empty() => None,
            Ok(content) => Some(content),
            Err(err) => {
                match fs::metadata(path) {
                    Ok(meta) if meta.is_dir() => logger.error(&format!(
                        "could not read lock from file {} as it is a directory",
                        path.display()
                    )),
                    Ok(_) => logger.error(&format!(
                        "could not read lock from file {}: {}",
                        path.display(),
                        err
                    )),
                    // Path does not exist: nothing was locked.
                    Err(_) => {}
                }
                None
            }
        }
    }
}

impl LockBackend for FileBackend {
    fn acquire_lock(&mut self, auth: &str) -> bool {
        match fs::write(&self.path, auth) {
            Ok(()) => {
                self.current_auth = Some(auth.to_string());
                true
            }
            Err(err) => {
                self.logger.error(&format!(
                    "could not write lock to file {}: {}",
                    self.path.display(),
                    err
                ));
                false
            }
        }
    }

    fn free_lock(&mut self, auth: &str) -> bool {
        // Ownership check: only the recorded holder may release. A mismatch
        // is a legitimate contention outcome, not an error to log.
        if self.current_auth.as_deref() != Some(auth) {
            return false;
        }

        match fs::remove_file(&self.path) {
            Ok(()) => {
                self.current_auth = None;
                true
            }
            Err(err) => {
                if self.path.exists() {
                    self.logger.error(&format!(
                        "could not remove lock file {}: {}",
                        self.path.display(),
                        err
                    ));
                }
                false
            }
        }
    }

    // The lock file is the durability; the default no-op persist hook stays.
}

/// Mutex whose lock state is a file on a durable filesystem.
#[derive(Debug)]
pub struct FileMutex {
    inner: BackedMutex<FileBackend>,
}

impl FileMutex {
    /// Build the mutex over `path`, recovering any state a previous run left
    /// on disk.
    pub fn open(logger: Logger, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current_auth = FileBackend::read_initial_state(&logger, &path);
        let lock_acquired = current_auth.is_some();

        let backend = FileBackend {
            logger,
            path,
            current_auth,
        };

        Self {
            inner: BackedMutex::with_state(backend, lock_acquired),
        }
    }

    /// The token currently holding this lock, if any.
    ///
    /// The lifecycle controller reads this to perform symmetric teardown with
    /// the same token that acquired both locks.
    pub fn current_auth_token(&self) -> Option<&str> {
        self.inner.backend().current_auth.as_deref()
    }

    /// The path of the backing lock file.
    pub fn path(&self) -> &Path {
        &self.inner.backend().path
    }
}

impl Mutex for FileMutex {
    fn is_lock_acquired(&self) -> bool {
        self.inner.is_lock_acquired()
    }

    fn lock(&mut self, auth: &str) -> bool {
        self.inner.lock(auth)
    }

    fn free(&mut self, auth: &str) -> bool {
        self.inner.free(auth)
    }
}
