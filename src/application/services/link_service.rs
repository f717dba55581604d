//! Link creation, lookup, deletion and click accounting.

use std::sync::Arc;

use crate::application::services::code_allocator::CodeAllocator;
use crate::domain::entities::{ClickedLink, Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::LinkError;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::url_validator::parse_http_url;

/// Inserts attempted for a random code before creation is abandoned.
///
/// Each attempt allocates a fresh code, so an insert only fails this way when
/// concurrent requests keep claiming codes between the check and the insert.
pub const MAX_INSERT_ATTEMPTS: usize = 3;

/// Entry point of the link core for the request-handling layer.
///
/// Holds no mutable state of its own; everything shared lives in the
/// repository.
pub struct LinkService<L: LinkRepository + ?Sized> {
    repository: Arc<L>,
    allocator: CodeAllocator<L>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(repository: Arc<L>, generator: Arc<dyn CodeGenerator>) -> Self {
        let allocator = CodeAllocator::new(repository.clone(), generator);
        Self {
            repository,
            allocator,
        }
    }

    /// Creates a short link for `target_url`.
    ///
    /// The URL is trimmed and stored in its normalized serialization, which
    /// is always usable as a redirect `Location`.
    ///
    /// # Code Selection
    ///
    /// - `custom_code` present: syntax-checked and inserted as is; a taken code
    ///   yields [`LinkError::CodeConflict`]
    /// - otherwise: a random 6-character code is allocated; if the insert loses
    ///   a race for it, a new code is allocated, up to [`MAX_INSERT_ATTEMPTS`]
    ///
    /// # Errors
    ///
    /// - [`LinkError::InvalidUrl`] if the trimmed URL is not absolute http(s)
    /// - [`LinkError::InvalidCode`] if the custom code fails the syntax check
    /// - [`LinkError::CodeConflict`] if the custom code is taken
    /// - [`LinkError::Exhausted`] if no free random code could be claimed
    /// - [`LinkError::Storage`] on backend failures
    pub async fn create_link(
        &self,
        target_url: &str,
        custom_code: Option<&str>,
    ) -> Result<Link, LinkError> {
        let trimmed = target_url.trim();
        let parsed =
            parse_http_url(trimmed).ok_or_else(|| LinkError::InvalidUrl(trimmed.to_string()))?;
        let target_url = parsed.as_str();

        if let Some(requested) = custom_code {
            let code = self.allocator.allocate(Some(requested)).await?;
            let link = self
                .repository
                .create(NewLink::new(code, target_url))
                .await?;

            tracing::info!(code = %link.code, custom = true, "Link created");
            return Ok(link);
        }

        for attempt in 1..=MAX_INSERT_ATTEMPTS {
            let code = self.allocator.allocate(None).await?;

            match self.repository.create(NewLink::new(code, target_url)).await {
                Ok(link) => {
                    tracing::info!(code = %link.code, custom = false, "Link created");
                    return Ok(link);
                }
                Err(LinkError::CodeConflict(code)) => {
                    tracing::warn!(attempt, %code, "Generated code claimed concurrently");
                }
                Err(err) => return Err(err),
            }
        }

        Err(LinkError::Exhausted {
            attempts: MAX_INSERT_ATTEMPTS,
        })
    }

    /// Looks up a link by code.
    pub async fn get_link(&self, code: &str) -> Result<Option<Link>, LinkError> {
        self.repository.find_by_code(code).await
    }

    /// Returns all links, newest first.
    pub async fn list_links(&self) -> Result<Vec<Link>, LinkError> {
        self.repository.list().await
    }

    /// Deletes a link. Returns whether anything was removed.
    pub async fn delete_link(&self, code: &str) -> Result<bool, LinkError> {
        let deleted = self.repository.delete(code).await?;
        if deleted {
            tracing::info!(%code, "Link deleted");
        }
        Ok(deleted)
    }

    /// Records one visit of `code` and returns the redirect target.
    ///
    /// `Ok(None)` means the code is unknown and no click was recorded.
    pub async fn record_click(&self, code: &str) -> Result<Option<ClickedLink>, LinkError> {
        let clicked = self.repository.record_click(code).await?;
        match &clicked {
            Some(_) => tracing::debug!(%code, "Click recorded"),
            None => tracing::debug!(%code, "Click on unknown code"),
        }
        Ok(clicked)
    }

    /// Checks that the link store answers.
    pub async fn ping(&self) -> Result<(), LinkError> {
        self.repository.ping().await
    }
}
