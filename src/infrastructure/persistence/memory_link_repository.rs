//! Embedded in-memory implementation of link repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::entities::{ClickedLink, Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::LinkError;

/// Stored link plus its insertion sequence number.
///
/// The sequence breaks ties between links created within the same clock tick
/// so listing stays newest-first.
#[derive(Debug, Clone)]
struct StoredLink {
    link: Link,
    seq: u64,
}

/// Process-local link store.
///
/// Uniqueness comes from inserting through the map's entry API, which holds
/// the shard lock between the vacancy check and the write. Clicks mutate the
/// row under the same per-entry write guard, so concurrent clicks on one code
/// never lose an increment. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryLinkRepository {
    links: DashMap<String, StoredLink>,
    next_seq: AtomicU64,
}

impl MemoryLinkRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns true if no links are stored.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, LinkError> {
        match self.links.entry(new_link.code.clone()) {
            Entry::Occupied(_) => Err(LinkError::CodeConflict(new_link.code)),
            Entry::Vacant(slot) => {
                let link = new_link.into_link(Utc::now());
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                slot.insert(StoredLink {
                    link: link.clone(),
                    seq,
                });
                Ok(link)
            }
        }
    }

    async fn exists(&self, code: &str) -> Result<bool, LinkError> {
        Ok(self.links.contains_key(code))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, LinkError> {
        Ok(self.links.get(code).map(|entry| entry.link.clone()))
    }

    async fn list(&self) -> Result<Vec<Link>, LinkError> {
        let mut entries: Vec<StoredLink> = self
            .links
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        entries.sort_by(|a, b| {
            b.link
                .created_at
                .cmp(&a.link.created_at)
                .then_with(|| b.seq.cmp(&a.seq))
        });

        Ok(entries.into_iter().map(|entry| entry.link).collect())
    }

    async fn delete(&self, code: &str) -> Result<bool, LinkError> {
        Ok(self.links.remove(code).is_some())
    }

    async fn record_click(&self, code: &str) -> Result<Option<ClickedLink>, LinkError> {
        Ok(self.links.get_mut(code).map(|mut entry| {
            let link = &mut entry.link;
            link.total_clicks += 1;
            link.last_clicked_at = Some(Utc::now());

            ClickedLink {
                code: link.code.clone(),
                target_url: link.target_url.clone(),
            }
        }))
    }

    async fn ping(&self) -> Result<(), LinkError> {
        Ok(())
    }
}
