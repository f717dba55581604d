//! Shared application state injected into handlers.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;

/// Process-lifetime values shared by all requests.
///
/// Cloned per request; everything inside is immutable or reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    /// Public origin used to build `shortUrl`, without a trailing slash.
    pub base_url: Arc<str>,
    /// Dashboard origin for `/` and `/code/{code}` hand-off.
    pub frontend_base_url: Option<Arc<str>>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Creates state with `started_at` set to now.
    pub fn new(
        link_service: Arc<LinkService<dyn LinkRepository>>,
        base_url: &str,
        frontend_base_url: Option<&str>,
    ) -> Self {
        Self {
            link_service,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            frontend_base_url: frontend_base_url.map(|url| Arc::from(url.trim_end_matches('/'))),
            started_at: Utc::now(),
        }
    }

    /// Full short URL for `code`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    /// Seconds since the state was created.
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::MemoryLinkRepository;
    use crate::utils::code_generator::RandomCodeGenerator;

    fn state(base_url: &str, frontend: Option<&str>) -> AppState {
        let repository: Arc<dyn LinkRepository> = Arc::new(MemoryLinkRepository::new());
        let service = Arc::new(LinkService::new(
            repository,
            Arc::new(RandomCodeGenerator::new()),
        ));
        AppState::new(service, base_url, frontend)
    }

    #[test]
    fn test_short_url_joins_without_double_slash() {
        let state = state("https://s.example.com/", None);
        assert_eq!(state.short_url("Ab3dEf"), "https://s.example.com/Ab3dEf");
    }

    #[test]
    fn test_frontend_trailing_slash_trimmed() {
        let state = state("http://localhost:3000", Some("https://dash.example.com/"));
        assert_eq!(
            state.frontend_base_url.as_deref(),
            Some("https://dash.example.com")
        );
    }

    #[test]
    fn test_uptime_is_non_negative() {
        assert!(state("http://localhost:3000", None).uptime_seconds() >= 0.0);
    }
}
