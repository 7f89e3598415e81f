// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{article_page, html, mount_translation, settings_for, TRANSLATE_PATH};
use opinion_scraper::application::use_cases::run_scraper::RunScraperUseCase;
use opinion_scraper::domain::models::article::TITLE_FAILED_TO_LOAD;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING: &str = r#"<html lang="es"><body>
    <article><a href="/opinion/2024-05-01/gato.html">Gato</a></article>
    <article><a href="/opinion/2024-05-02/perro.html">Perro</a></article>
    <article><a href="/opinion/2024-05-01/gato.html">Gato otra vez</a></article>
    <article><a href="/opinion/autores/">Autores</a></article>
    <article><a href="/opinion/2024-05-03/caballo.html">Caballo</a></article>
    <article><a href="/opinion/2024-05-04/roto.html">Roto</a></article>
</body></html>"#;

async fn mount_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/opinion/"))
        .respond_with(html(LISTING))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/opinion/2024-05-01/gato.html"))
        .respond_with(html(&article_page(
            "El gato negro",
            &["Primer parrafo.", "Segundo parrafo."],
            Some("/img/gato.jpg"),
        )))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/opinion/2024-05-02/perro.html"))
        .respond_with(html(&article_page(
            "El perro negro",
            &["Un parrafo."],
            Some("/img/perro.jpg"),
        )))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/opinion/2024-05-03/caballo.html"))
        .respond_with(html(&article_page("El caballo negro", &["Otro parrafo."], None)))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/opinion/2024-05-04/roto.html"))
        .respond_with(ResponseTemplate::new(503))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/img/gato.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/img/perro.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_run_over_http_engine() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    mount_translation(&server, "El gato negro", "The black cat").await;
    mount_translation(&server, "El perro negro", "The black dog").await;
    mount_translation(&server, "El caballo negro", "The black horse").await;
    // 其余翻译请求失败
    Mock::given(method("GET"))
        .and(path(TRANSLATE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let image_dir = tempfile::tempdir().unwrap();
    let settings = settings_for(&server, image_dir.path());

    let result = RunScraperUseCase::new(settings).execute().await.unwrap();

    // 去重、过滤后按出现顺序排列
    let urls: Vec<_> = result.articles.iter().map(|a| a.url.clone()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/opinion/2024-05-01/gato.html", server.uri()),
            format!("{}/opinion/2024-05-02/perro.html", server.uri()),
            format!("{}/opinion/2024-05-03/caballo.html", server.uri()),
            format!("{}/opinion/2024-05-04/roto.html", server.uri()),
        ]
    );

    let first = &result.articles[0];
    assert_eq!(first.title, "El gato negro");
    assert_eq!(first.content, "Primer parrafo.\nSegundo parrafo.");
    assert_eq!(
        first.image_url.as_deref(),
        Some(format!("{}/img/gato.jpg", server.uri()).as_str())
    );
    assert!(result.articles[2].image_url.is_none());
    assert!(result.articles[3].is_failed_load());

    assert_eq!(
        result.translated_titles,
        vec![
            "The black cat".to_string(),
            "The black dog".to_string(),
            "The black horse".to_string(),
            TITLE_FAILED_TO_LOAD.to_string(),
        ]
    );

    assert_eq!(result.repeated_words.len(), 1);
    assert_eq!(result.repeated_words.get("black"), Some(3));

    // 图片下载失败不影响运行
    let saved = image_dir.path().join("article_1.jpg");
    assert_eq!(std::fs::read(saved).unwrap(), vec![0xFF, 0xD8, 0xFF, 0xE0]);
    assert!(!image_dir.path().join("article_2.jpg").exists());
}

#[tokio::test]
async fn test_listing_failure_is_empty_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/opinion/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let image_dir = tempfile::tempdir().unwrap();
    let settings = settings_for(&server, image_dir.path());

    let result = RunScraperUseCase::new(settings).execute().await.unwrap();

    assert!(result.is_empty());
    assert!(result.translated_titles.is_empty());
    assert!(result.repeated_words.is_empty());

    // 空运行不会请求翻译接口
    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() != TRANSLATE_PATH));
}

#[tokio::test]
async fn test_result_written_as_json() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    Mock::given(method("GET"))
        .and(path(TRANSLATE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let workdir = tempfile::tempdir().unwrap();
    let json_path = workdir.path().join("out").join("result.json");

    let mut settings = settings_for(&server, &workdir.path().join("images"));
    settings.output.json_path = Some(json_path.to_string_lossy().to_string());
    settings.storage.enabled = false;

    let result = RunScraperUseCase::new(settings).execute().await.unwrap();

    let written: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&json_path).unwrap()).unwrap();
    assert_eq!(written["articles"].as_array().unwrap().len(), result.articles.len());
    // 翻译全部失败时保留原标题
    assert_eq!(written["translated_titles"][0], "El gato negro");
    assert!(!workdir.path().join("images").exists());
}

#[tokio::test]
async fn test_configured_stop_words_excluded_from_count() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    mount_translation(&server, "El gato negro", "The black cat").await;
    mount_translation(&server, "El perro negro", "The black dog").await;
    mount_translation(&server, "El caballo negro", "The black horse").await;
    Mock::given(method("GET"))
        .and(path(TRANSLATE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let image_dir = tempfile::tempdir().unwrap();
    let mut settings = settings_for(&server, image_dir.path());
    settings.storage.enabled = false;
    settings.analysis.extra_stop_words = vec!["Black".to_string()];

    let result = RunScraperUseCase::new(settings).execute().await.unwrap();

    assert_eq!(result.translated_titles[0], "The black cat");
    assert!(result.repeated_words.is_empty());
}
