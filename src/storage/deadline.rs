//! Per-request deadline carried into storage calls.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::{StorageError, StorageResult};

/// Point in time after which a storage call must give up.
///
/// `Deadline::none()` never expires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// A deadline that never expires.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }

    /// A deadline at a fixed instant.
    #[must_use]
    pub const fn at(instant: Instant) -> Self {
        Self(Some(instant))
    }

    /// A deadline `timeout` from now.
    #[must_use]
    pub fn after(timeout: Duration) -> Self {
        Self::at(Instant::now() + timeout)
    }

    /// The instant this deadline expires, if any.
    #[must_use]
    pub const fn instant(self) -> Option<Instant> {
        self.0
    }

    /// Whether the deadline has already passed.
    #[must_use]
    pub fn is_expired(self) -> bool {
        self.0.is_some_and(|at| Instant::now() >= at)
    }

    /// Fail with [`StorageError::DeadlineExceeded`] if the deadline has passed.
    ///
    /// # Errors
    ///
    /// Returns `DeadlineExceeded` once the deadline is reached.
    pub fn check(self) -> StorageResult<()> {
        if self.is_expired() {
            Err(StorageError::DeadlineExceeded)
        } else {
            Ok(())
        }
    }

    /// Run a storage future, abandoning it when the deadline passes.
    ///
    /// # Errors
    ///
    /// Returns the future's own error, or `DeadlineExceeded` if it did not
    /// finish in time.
    pub async fn bound<F, T>(self, fut: F) -> StorageResult<T>
    where
        F: Future<Output = StorageResult<T>>,
    {
        self.check()?;

        match self.0 {
            Some(at) => tokio::time::timeout_at(at, fut)
                .await
                .map_err(|_| StorageError::DeadlineExceeded)?,
            None => fut.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_none_never_expires() {
        let deadline = Deadline::none();
        assert!(!deadline.is_expired());
        assert!(deadline.check().is_ok());
        assert_eq!(deadline.bound(async { Ok(7) }).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_expired_deadline_fails_check() {
        let deadline = Deadline::at(Instant::now());
        assert!(deadline.is_expired());
        assert!(matches!(
            deadline.check(),
            Err(StorageError::DeadlineExceeded)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_bound_abandons_slow_future() {
        let deadline = Deadline::after(Duration::from_millis(50));
        let result = deadline
            .bound(async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Ok(())
            })
            .await;
        assert!(matches!(result, Err(StorageError::DeadlineExceeded)));
    }

    #[tokio::test]
    async fn test_bound_skips_work_after_deadline() {
        let mut started = false;
        let result = Deadline::at(Instant::now())
            .bound(async {
                started = true;
                Ok(())
            })
            .await;
        assert!(matches!(result, Err(StorageError::DeadlineExceeded)));
        assert!(!started);
    }

    #[tokio::test]
    async fn test_bound_passes_through_errors() {
        let result: StorageResult<()> = Deadline::after(Duration::from_secs(5))
            .bound(async { Err(StorageError::NotFound) })
            .await;
        assert!(matches!(result, Err(StorageError::NotFound)));
    }
}
