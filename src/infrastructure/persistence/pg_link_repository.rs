//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{ClickedLink, Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::LinkError;

/// PostgreSQL repository for link storage and click accounting.
///
/// Code uniqueness is the `links` primary key; clicks are a single
/// `UPDATE ... RETURNING` statement.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    code: String,
    target_url: String,
    total_clicks: i64,
    last_clicked_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(
            row.code,
            row.target_url,
            row.total_clicks,
            row.last_clicked_at,
            row.created_at,
        )
    }
}

#[derive(sqlx::FromRow)]
struct ClickedRow {
    code: String,
    target_url: String,
}

/// Maps an insert failure, recognising the duplicate-key case.
fn map_insert_error(e: sqlx::Error, code: &str) -> LinkError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return LinkError::CodeConflict(code.to_string());
    }

    LinkError::storage(e)
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, LinkError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (code, target_url)
            VALUES ($1, $2)
            RETURNING code, target_url, total_clicks, last_clicked_at, created_at
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.target_url)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| map_insert_error(e, &new_link.code))?;

        Ok(row.into())
    }

    async fn exists(&self, code: &str) -> Result<bool, LinkError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM links WHERE code = $1)")
            .bind(code)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(LinkError::storage)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, LinkError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT code, target_url, total_clicks, last_clicked_at, created_at
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(LinkError::storage)?;

        Ok(row.map(Link::from))
    }

    async fn list(&self) -> Result<Vec<Link>, LinkError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT code, target_url, total_clicks, last_clicked_at, created_at
            FROM links
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(LinkError::storage)?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn delete(&self, code: &str) -> Result<bool, LinkError> {
        let result = sqlx::query("DELETE FROM links WHERE code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await
            .map_err(LinkError::storage)?;

        Ok(result.rows_affected() > 0)
    }

    async fn record_click(&self, code: &str) -> Result<Option<ClickedLink>, LinkError> {
        let row = sqlx::query_as::<_, ClickedRow>(
            r#"
            UPDATE links
            SET total_clicks = total_clicks + 1,
                last_clicked_at = NOW()
            WHERE code = $1
            RETURNING code, target_url
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(LinkError::storage)?;

        Ok(row.map(|r| ClickedLink {
            code: r.code,
            target_url: r.target_url,
        }))
    }

    async fn ping(&self) -> Result<(), LinkError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(LinkError::storage)?;

        Ok(())
    }
}
