// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::html;
use opinion_scraper::engines::http_session::HttpSession;
use opinion_scraper::engines::traits::{BrowserSession, EngineError};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_navigate_and_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/opinion/"))
        .respond_with(html(
            r#"<html lang="es-ES"><body><article><a href="2024/uno.html">Uno</a></article></body></html>"#,
        ))
        .mount(&server)
        .await;

    let mut session = HttpSession::new(Duration::from_secs(5)).unwrap();
    let url = format!("{}/opinion/", server.uri());
    session.navigate(&url).await.unwrap();

    assert_eq!(session.current_url().await.unwrap(), Some(url.clone()));
    assert_eq!(session.page_language().await.unwrap().as_deref(), Some("es-ES"));

    let anchors = session.find_all("article a").await.unwrap();
    assert_eq!(anchors.len(), 1);
    assert_eq!(anchors[0].attr("href"), Some(format!("{url}2024/uno.html").as_str()));

    let heading = session
        .wait_for("h1", Duration::from_millis(300))
        .await
        .unwrap();
    assert!(heading.is_none());

    session.close().await.unwrap();
    assert!(matches!(session.find_all("a").await, Err(EngineError::NoPage)));
}

#[tokio::test]
async fn test_non_success_status_is_load_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let mut session = HttpSession::new(Duration::from_secs(5)).unwrap();
    let err = session
        .navigate(&format!("{}/down", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::HttpStatus(502)));
    assert!(session.current_url().await.unwrap().is_none());
}

#[tokio::test]
async fn test_invalid_selector_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html("<html><body></body></html>"))
        .mount(&server)
        .await;

    let mut session = HttpSession::new(Duration::from_secs(5)).unwrap();
    session.navigate(&server.uri()).await.unwrap();

    assert!(matches!(
        session.find_all("a[").await,
        Err(EngineError::InvalidSelector(_))
    ));
}
