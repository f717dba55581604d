//! Short code allocation.

use std::sync::Arc;

use crate::domain::repositories::LinkRepository;
use crate::error::LinkError;
use crate::utils::code_generator::{CodeGenerator, is_valid_code};

/// Number of random candidates tried before giving up.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 5;

/// Produces codes for new links.
///
/// A requested code is only checked for syntax; the store's insert decides
/// whether it is free. A random code is checked against the store before it is
/// handed out, but that check only avoids doomed inserts: another request can
/// still claim the code in between, and the insert then reports
/// [`LinkError::CodeConflict`].
pub struct CodeAllocator<L: LinkRepository + ?Sized> {
    repository: Arc<L>,
    generator: Arc<dyn CodeGenerator>,
}

impl<L: LinkRepository + ?Sized> CodeAllocator<L> {
    /// Creates an allocator backed by `repository` and drawing from `generator`.
    pub fn new(repository: Arc<L>, generator: Arc<dyn CodeGenerator>) -> Self {
        Self {
            repository,
            generator,
        }
    }

    /// Returns a code for a new link.
    ///
    /// # Errors
    ///
    /// - [`LinkError::InvalidCode`] if `requested` fails the syntax check
    /// - [`LinkError::Exhausted`] if [`MAX_ALLOCATION_ATTEMPTS`] random candidates
    ///   were all taken
    /// - [`LinkError::Storage`] if the availability check fails
    pub async fn allocate(&self, requested: Option<&str>) -> Result<String, LinkError> {
        match requested {
            Some(code) if is_valid_code(code) => Ok(code.to_string()),
            Some(code) => Err(LinkError::InvalidCode(code.to_string())),
            None => self.allocate_random().await,
        }
    }

    async fn allocate_random(&self) -> Result<String, LinkError> {
        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            let candidate = self.generator.generate();

            if !self.repository.exists(&candidate).await? {
                return Ok(candidate);
            }

            tracing::debug!(attempt, code = %candidate, "Random code collision");
        }

        tracing::warn!(
            attempts = MAX_ALLOCATION_ATTEMPTS,
            "Random code space looks saturated"
        );

        Err(LinkError::Exhausted {
            attempts: MAX_ALLOCATION_ATTEMPTS,
        })
    }
}
