//! Repository trait for short link data access.

use crate::domain::entities::{ClickedLink, Link, NewLink};
use crate::error::LinkError;
use async_trait::async_trait;

/// Store owning all persisted links.
///
/// Every method may be called concurrently with any other, including for the
/// same code. Implementations must rely on the backend's own atomicity:
/// uniqueness of `code` is a storage constraint, and a click is recorded in
/// one atomic update.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - Embedded in-memory implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`, `tests/store_concurrency.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link with zero clicks.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::CodeConflict`] if the code already exists. Only one
    /// of several concurrent inserts for the same code can succeed.
    ///
    /// Returns [`LinkError::Storage`] on any other backend failure.
    async fn create(&self, new_link: NewLink) -> Result<Link, LinkError>;

    /// Returns true if a link with this code exists.
    ///
    /// The answer may be stale by the time the caller acts on it.
    async fn exists(&self, code: &str) -> Result<bool, LinkError>;

    /// Finds a link by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, LinkError>;

    /// Lists all links, newest first.
    async fn list(&self) -> Result<Vec<Link>, LinkError>;

    /// Removes a link permanently.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if there was nothing
    /// to remove.
    async fn delete(&self, code: &str) -> Result<bool, LinkError>;

    /// Atomically increments `total_clicks` and sets `last_clicked_at` to now.
    ///
    /// Returns `Ok(None)` when no link has this code; nothing is written then.
    async fn record_click(&self, code: &str) -> Result<Option<ClickedLink>, LinkError>;

    /// Checks that the backend answers.
    async fn ping(&self) -> Result<(), LinkError>;
}
