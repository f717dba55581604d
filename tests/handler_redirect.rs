mod common;

use axum::http::StatusCode;
use serde_json::json;
use tinylink::domain::repositories::LinkRepository;

#[tokio::test]
async fn test_redirect_success() {
    let (server, repository) = common::create_test_server(None);
    common::create_test_link(&repository, "Ab3dEf", "https://example.com/a?x=1").await;

    let response = server.get("/Ab3dEf").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/a?x=1");
}

#[tokio::test]
async fn test_redirect_records_click() {
    let (server, repository) = common::create_test_server(None);
    common::create_test_link(&repository, "Click1", "https://example.com").await;

    server.get("/Click1").await.assert_status(StatusCode::FOUND);
    server.get("/Click1").await.assert_status(StatusCode::FOUND);

    let link = repository.find_by_code("Click1").await.unwrap().unwrap();
    assert_eq!(link.total_clicks, 2);
    assert!(link.last_clicked_at.is_some());
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (server, repository) = common::create_test_server(None);

    let response = server.get("/Nope12").await;

    response.assert_status_not_found();
    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_redirect_codes_are_case_sensitive() {
    let (server, repository) = common::create_test_server(None);
    common::create_test_link(&repository, "AbCdEf", "https://example.com").await;

    server.get("/abcdef").await.assert_status_not_found();

    let link = repository.find_by_code("AbCdEf").await.unwrap().unwrap();
    assert_eq!(link.total_clicks, 0);
}

#[tokio::test]
async fn test_redirect_malformed_code_is_not_found() {
    let (server, _repository) = common::create_test_server(None);

    for path in ["/abc", "/toolongcode", "/ab-cd-ef", "/favicon.ico"] {
        let response = server.get(path).await;
        response.assert_status_not_found();
    }
}

#[tokio::test]
async fn test_redirect_after_delete() {
    let (server, repository) = common::create_test_server(None);
    common::create_test_link(&repository, "Gone12", "https://example.com").await;
    repository.delete("Gone12").await.unwrap();

    server.get("/Gone12").await.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_url_with_control_characters() {
    let (server, repository) = common::create_test_server(None);

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com/a\nb\u{7}c", "code": "Ctrl01" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(
        response.json::<serde_json::Value>()["url"],
        "https://example.com/ab%07c"
    );

    let response = server.get("/Ctrl01").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/ab%07c");

    let link = repository.find_by_code("Ctrl01").await.unwrap().unwrap();
    assert_eq!(link.total_clicks, 1);
}
