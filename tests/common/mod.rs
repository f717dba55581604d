#![allow(dead_code)]

use axum_test::TestServer;
use std::sync::Arc;
use tinylink::application::services::LinkService;
use tinylink::domain::entities::{Link, NewLink};
use tinylink::domain::repositories::LinkRepository;
use tinylink::infrastructure::persistence::MemoryLinkRepository;
use tinylink::routes::router;
use tinylink::state::AppState;
use tinylink::utils::code_generator::RandomCodeGenerator;

pub const BASE_URL: &str = "http://s.test";
pub const FRONTEND_URL: &str = "https://dash.test";

/// State backed by a fresh in-memory store.
///
/// The repository is returned alongside so tests can seed and inspect it.
pub fn create_test_state(frontend: Option<&str>) -> (AppState, Arc<MemoryLinkRepository>) {
    let repository = Arc::new(MemoryLinkRepository::new());
    let state = create_state_with(repository.clone(), frontend);
    (state, repository)
}

/// State over an arbitrary repository implementation.
pub fn create_state_with(repository: Arc<dyn LinkRepository>, frontend: Option<&str>) -> AppState {
    let service = Arc::new(LinkService::new(
        repository,
        Arc::new(RandomCodeGenerator::new()),
    ));
    AppState::new(service, BASE_URL, frontend)
}

/// Full application router over a fresh in-memory store.
pub fn create_test_server(frontend: Option<&str>) -> (TestServer, Arc<MemoryLinkRepository>) {
    let (state, repository) = create_test_state(frontend);
    let server = TestServer::new(router(state)).unwrap();
    (server, repository)
}

pub async fn create_test_link(repository: &MemoryLinkRepository, code: &str, url: &str) -> Link {
    repository.create(NewLink::new(code, url)).await.unwrap()
}
