// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// `wait_for` 轮询间隔
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 非成功状态码
    #[error("Unexpected HTTP status {0}")]
    HttpStatus(u16),
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// 浏览器错误
    #[error("Browser error: {0}")]
    Browser(String),
    /// 选择器无效
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
    /// 尚未加载任何页面
    #[error("No page loaded")]
    NoPage,
}

/// 页面元素快照
///
/// 查询时刻元素的可见文本和属性。`href`/`src` 已解析为绝对地址。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PageElement {
    /// 元素文本
    #[serde(default)]
    pub text: String,
    /// 元素属性
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl PageElement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attributes: HashMap::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    /// 读取属性值
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// 去除首尾空白后的文本，空文本返回 `None`
    pub fn trimmed_text(&self) -> Option<&str> {
        let text = self.text.trim();
        (!text.is_empty()).then_some(text)
    }
}

/// 浏览会话特质
///
/// 一次运行只持有一个会话，同一时刻只有一个可导航页面。
/// 导航需要 `&mut self`，因此同一会话不可能被并发的抓取共享。
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// 导航到指定URL并等待页面加载完成
    async fn navigate(&mut self, url: &str) -> Result<(), EngineError>;

    /// 查询当前页面中匹配选择器的全部元素（文档顺序）
    async fn find_all(&self, selector: &str) -> Result<Vec<PageElement>, EngineError>;

    /// 当前页面URL
    async fn current_url(&self) -> Result<Option<String>, EngineError>;

    /// 当前页面 `<html lang>` 属性
    async fn page_language(&self) -> Result<Option<String>, EngineError>;

    /// 在超时时间内等待匹配元素出现，返回第一个匹配元素
    async fn wait_for(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Option<PageElement>, EngineError> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(first) = self.find_all(selector).await?.into_iter().next() {
                return Ok(Some(first));
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            tokio::time::sleep(WAIT_POLL_INTERVAL.min(deadline - now)).await;
        }
    }

    /// 关闭同意横幅，默认不做任何操作
    async fn dismiss_consent(&mut self, _selector: &str, _timeout: Duration) -> bool {
        false
    }

    /// 释放会话资源
    async fn close(&mut self) -> Result<(), EngineError>;

    /// 会话名称
    fn name(&self) -> &'static str;
}
