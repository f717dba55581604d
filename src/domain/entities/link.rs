//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with its click accounting.
///
/// `code` is the primary key. `target_url` and `created_at` never change after
/// insertion; `total_clicks` and `last_clicked_at` change only through an
/// atomic click record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub code: String,
    pub target_url: String,
    pub total_clicks: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        code: String,
        target_url: String,
        total_clicks: i64,
        last_clicked_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            code,
            target_url,
            total_clicks,
            last_clicked_at,
            created_at,
        }
    }

    /// Returns true if the link has been followed at least once.
    pub fn was_clicked(&self) -> bool {
        self.last_clicked_at.is_some()
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub target_url: String,
}

impl NewLink {
    pub fn new(code: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            target_url: target_url.into(),
        }
    }

    /// Materializes the row a store writes for this input.
    pub fn into_link(self, created_at: DateTime<Utc>) -> Link {
        Link::new(self.code, self.target_url, 0, None, created_at)
    }
}

/// Result of a recorded click: where to send the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickedLink {
    pub code: String,
    pub target_url: String,
}
