// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{BrowserSession, EngineError, PageElement};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

/// 需要解析为绝对地址的属性
const URL_ATTRIBUTES: [&str; 3] = ["href", "src", "data-src"];

/// HTTP会话
///
/// 基于reqwest + scraper 的静态页面会话，不执行JavaScript。
/// 适用于服务端渲染的列表页和文章页。
pub struct HttpSession {
    client: reqwest::Client,
    current_url: Option<Url>,
    body: Option<String>,
}

impl HttpSession {
    /// 创建HTTP会话
    ///
    /// # 参数
    ///
    /// * `request_timeout` - 单次请求超时时间
    pub fn new(request_timeout: Duration) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; opinion-scraper/0.1)")
            .timeout(request_timeout)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            current_url: None,
            body: None,
        })
    }

    fn document(&self) -> Result<&str, EngineError> {
        self.body.as_deref().ok_or(EngineError::NoPage)
    }
}

#[async_trait]
impl BrowserSession for HttpSession {
    async fn navigate(&mut self, url: &str) -> Result<(), EngineError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::HttpStatus(status.as_u16()));
        }

        let final_url = response.url().clone();
        let body = response.text().await?;

        tracing::debug!(url = %final_url, bytes = body.len(), "Page loaded over HTTP");
        self.current_url = Some(final_url);
        self.body = Some(body);
        Ok(())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<PageElement>, EngineError> {
        select_elements(self.document()?, self.current_url.as_ref(), selector)
    }

    async fn current_url(&self) -> Result<Option<String>, EngineError> {
        Ok(self.current_url.as_ref().map(Url::to_string))
    }

    async fn page_language(&self) -> Result<Option<String>, EngineError> {
        Ok(select_elements(self.document()?, None, "html")?
            .into_iter()
            .next()
            .and_then(|html| html.attr("lang").map(str::to_string)))
    }

    async fn close(&mut self) -> Result<(), EngineError> {
        self.current_url = None;
        self.body = None;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// 在HTML文档中查询元素快照
///
/// URL类属性在提供 `base` 时解析为绝对地址，无法解析的保持原值。
///
/// # 参数
///
/// * `html` - HTML文档
/// * `base` - 解析相对地址的基础URL
/// * `selector` - CSS选择器
pub fn select_elements(
    html: &str,
    base: Option<&Url>,
    selector: &str,
) -> Result<Vec<PageElement>, EngineError> {
    let selector =
        Selector::parse(selector).map_err(|e| EngineError::InvalidSelector(format!("{selector}: {e}")))?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&selector)
        .map(|element| {
            let attributes = element
                .value()
                .attrs()
                .map(|(name, value)| {
                    let value = match base {
                        Some(base) if URL_ATTRIBUTES.contains(&name) => base
                            .join(value)
                            .map(|u| u.to_string())
                            .unwrap_or_else(|_| value.to_string()),
                        _ => value.to_string(),
                    };
                    (name.to_string(), value)
                })
                .collect();

            PageElement {
                text: collapse_whitespace(element.text()),
                attributes,
            }
        })
        .collect())
}

/// 合并文本节点并把连续空白压缩为单个空格，与浏览器渲染后的文本一致
fn collapse_whitespace<'a>(fragments: impl Iterator<Item = &'a str>) -> String {
    fragments
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
