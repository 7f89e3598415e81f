// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::http_session::select_elements;
use crate::engines::traits::{BrowserSession, EngineError, PageElement};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use url::Url;

/// 脚本化会话
///
/// 内存中的页面集合，可以让指定URL先失败若干次或永远不返回。
#[derive(Default)]
pub(crate) struct ScriptedSession {
    pages: HashMap<String, String>,
    failures: HashMap<String, u32>,
    hanging: HashSet<String>,
    current: Option<String>,
    pub navigations: Vec<String>,
    closed: Arc<AtomicBool>,
    pub consent_requests: u32,
}

impl ScriptedSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// 前 `times` 次导航失败
    pub fn failing(mut self, url: &str, times: u32) -> Self {
        self.failures.insert(url.to_string(), times);
        self
    }

    /// 导航永远不完成
    pub fn hanging(mut self, url: &str) -> Self {
        self.hanging.insert(url.to_string());
        self
    }

    /// 会话关闭标记，会话被移交后仍可检查
    pub fn closed_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closed)
    }

    fn html(&self) -> Result<(&str, Option<Url>), EngineError> {
        let url = self.current.as_deref().ok_or(EngineError::NoPage)?;
        let html = self.pages.get(url).ok_or(EngineError::NoPage)?;
        Ok((html.as_str(), Url::parse(url).ok()))
    }
}

#[async_trait]
impl BrowserSession for ScriptedSession {
    async fn navigate(&mut self, url: &str) -> Result<(), EngineError> {
        self.navigations.push(url.to_string());

        if self.hanging.contains(url) {
            std::future::pending::<()>().await;
        }

        if let Some(remaining) = self.failures.get_mut(url) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(EngineError::Timeout);
            }
        }

        if !self.pages.contains_key(url) {
            return Err(EngineError::HttpStatus(404));
        }

        self.current = Some(url.to_string());
        Ok(())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<PageElement>, EngineError> {
        let (html, base) = self.html()?;
        select_elements(html, base.as_ref(), selector)
    }

    async fn current_url(&self) -> Result<Option<String>, EngineError> {
        Ok(self.current.clone())
    }

    async fn page_language(&self) -> Result<Option<String>, EngineError> {
        let (html, _) = self.html()?;
        Ok(select_elements(html, None, "html")?
            .into_iter()
            .next()
            .and_then(|el| el.attr("lang").map(str::to_string)))
    }

    async fn dismiss_consent(&mut self, _selector: &str, _timeout: std::time::Duration) -> bool {
        self.consent_requests += 1;
        false
    }

    async fn close(&mut self) -> Result<(), EngineError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
