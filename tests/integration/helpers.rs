// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use opinion_scraper::config::settings::Settings;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 翻译接口路径
pub const TRANSLATE_PATH: &str = "/translate_a/single";

/// 返回HTML页面
pub fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(body.to_string())
}

/// 文章页面
pub fn article_page(title: &str, paragraphs: &[&str], image: Option<&str>) -> String {
    let body: String = paragraphs.iter().map(|p| format!("<p>{p}</p>")).collect();
    let figure = image
        .map(|src| format!(r#"<figure><img src="{src}"></figure>"#))
        .unwrap_or_default();
    format!(
        r#"<html lang="es"><body><article>
            <h1 class="a_t">{title}</h1>
            {figure}
            <div class="a_c">{body}</div>
        </article></body></html>"#
    )
}

/// 注册一条翻译结果
pub async fn mount_translation(server: &MockServer, source: &str, translated: &str) {
    Mock::given(method("GET"))
        .and(path(TRANSLATE_PATH))
        .and(query_param("q", source))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            [[translated, source, null, null, 10]],
            null,
            "es"
        ])))
        .mount(server)
        .await;
}

/// 指向模拟服务器的配置，关闭所有等待时间
pub fn settings_for(server: &MockServer, image_dir: &std::path::Path) -> Settings {
    Settings::builder()
        .unwrap()
        .set_override("browser.engine", "http")
        .unwrap()
        .set_override("scraper.listing_url", format!("{}/opinion/", server.uri()))
        .unwrap()
        .set_override("scraper.edition_host", "127.0.0.1")
        .unwrap()
        .set_override("scraper.page_load_timeout_secs", 5)
        .unwrap()
        .set_override("scraper.retry_backoff_secs", 0)
        .unwrap()
        .set_override("scraper.settle_delay_ms", 0)
        .unwrap()
        .set_override("scraper.listing_settle_delay_ms", 0)
        .unwrap()
        .set_override("translation.endpoint", format!("{}{}", server.uri(), TRANSLATE_PATH))
        .unwrap()
        .set_override("translation.timeout_secs", 5)
        .unwrap()
        .set_override("storage.image_dir", image_dir.to_string_lossy().to_string())
        .unwrap()
        .set_override("storage.download_timeout_secs", 5)
        .unwrap()
        .set_override("extraction.title_wait_secs", 0)
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap()
}
