// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::BrowserSettings;
use crate::engines::traits::{BrowserSession, EngineError, PageElement};
use async_trait::async_trait;
use chromiumoxide::handler::HandlerConfig;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

/// 同意横幅点击后的等待时间
const CONSENT_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Chromium会话
///
/// 基于chromiumoxide的浏览器会话。整个运行期间只打开一个页面，
/// 所有导航都在这个页面上串行进行。
pub struct ChromiumSession {
    browser: Option<Browser>,
    page: Option<Page>,
    handler: Option<JoinHandle<()>>,
    launched: bool,
}

impl ChromiumSession {
    /// 启动本地Chrome或连接远程Chrome实例，并打开一个空白页面
    ///
    /// # 参数
    ///
    /// * `settings` - 浏览器配置
    /// * `page_load_timeout` - 页面加载超时时间，CDP请求超时不会低于该值
    pub async fn start(
        settings: &BrowserSettings,
        page_load_timeout: Duration,
    ) -> Result<Self, EngineError> {
        let remote_debugging_url = settings
            .remote_debugging_url
            .clone()
            .or_else(|| std::env::var("CHROMIUM_REMOTE_DEBUGGING_URL").ok());

        let request_timeout = settings.cdp_request_timeout(page_load_timeout);
        let launched = remote_debugging_url.is_none();
        let (browser, mut handler) = if let Some(ref url) = remote_debugging_url {
            tracing::info!("Connecting to remote Chrome instance at: {}", url);
            let config = HandlerConfig {
                request_timeout,
                ..Default::default()
            };
            Browser::connect_with_config(url, config).await.map_err(|e| {
                EngineError::Browser(format!("Failed to connect to remote Chrome: {}", e))
            })?
        } else {
            let mut builder = BrowserConfig::builder()
                .no_sandbox()
                .window_size(settings.window_width, settings.window_height)
                .request_timeout(request_timeout)
                .arg("--disable-gpu")
                .arg("--disable-dev-shm-usage");

            if !settings.headless {
                builder = builder.with_head();
            }

            let config = builder.build().map_err(EngineError::Browser)?;
            Browser::launch(config)
                .await
                .map_err(|e| EngineError::Browser(e.to_string()))?
        };

        // Spawn a handler to process browser events
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| EngineError::Browser(e.to_string()))?;

        tracing::info!(launched, "Chromium session started");

        Ok(Self {
            browser: Some(browser),
            page: Some(page),
            handler: Some(handler),
            launched,
        })
    }

    fn page(&self) -> Result<&Page, EngineError> {
        self.page.as_ref().ok_or(EngineError::NoPage)
    }
}

/// 生成收集元素快照的脚本
///
/// `href`/`src` 取DOM属性值，与WebDriver的 `get_attribute` 一样返回绝对地址。
fn snapshot_script(selector: &str) -> Result<String, EngineError> {
    let selector = serde_json::to_string(selector)
        .map_err(|e| EngineError::InvalidSelector(e.to_string()))?;

    Ok(format!(
        r#"(() => Array.from(document.querySelectorAll({selector})).map((el) => {{
    const attributes = {{}};
    for (const attr of el.attributes) {{
        attributes[attr.name] = attr.value;
    }}
    if (typeof el.href === "string" && el.href) {{
        attributes.href = el.href;
    }}
    if (typeof el.src === "string" && el.src) {{
        attributes.src = el.src;
    }}
    return {{ text: el.innerText || el.textContent || "", attributes }};
}}))()"#
    ))
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn navigate(&mut self, url: &str) -> Result<(), EngineError> {
        // goto waits for the load event
        self.page()?
            .goto(url)
            .await
            .map_err(|e| EngineError::Browser(e.to_string()))?;
        Ok(())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<PageElement>, EngineError> {
        let script = snapshot_script(selector)?;
        self.page()?
            .evaluate(script)
            .await
            .map_err(|e| EngineError::Browser(e.to_string()))?
            .into_value::<Vec<PageElement>>()
            .map_err(|e| EngineError::Browser(format!("Unexpected element snapshot: {}", e)))
    }

    async fn current_url(&self) -> Result<Option<String>, EngineError> {
        self.page()?
            .url()
            .await
            .map_err(|e| EngineError::Browser(e.to_string()))
    }

    async fn page_language(&self) -> Result<Option<String>, EngineError> {
        let lang = self
            .page()?
            .evaluate("document.documentElement.getAttribute('lang') || ''")
            .await
            .map_err(|e| EngineError::Browser(e.to_string()))?
            .into_value::<String>()
            .map_err(|e| EngineError::Browser(e.to_string()))?;
        Ok((!lang.is_empty()).then_some(lang))
    }

    async fn dismiss_consent(&mut self, selector: &str, timeout: Duration) -> bool {
        match self.wait_for(selector, timeout).await {
            Ok(Some(_)) => {}
            _ => return false,
        }

        let Ok(page) = self.page() else {
            return false;
        };
        let clicked = match page.find_element(selector).await {
            Ok(button) => button.click().await.is_ok(),
            Err(_) => false,
        };

        if clicked {
            tracing::info!("Accepted cookie consent");
            tokio::time::sleep(CONSENT_SETTLE_DELAY).await;
        }
        clicked
    }

    async fn close(&mut self) -> Result<(), EngineError> {
        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                tracing::debug!("Failed to close page: {}", e);
            }
        }

        let mut result = Ok(());
        let browser = self.browser.take();
        // A remote browser is shared; only tear down what we launched.
        if let (Some(mut browser), true) = (browser, self.launched) {
            if let Err(e) = browser.close().await {
                result = Err(EngineError::Browser(e.to_string()));
            }
            if let Err(e) = browser.wait().await {
                tracing::debug!("Failed to wait for browser exit: {}", e);
            }
        }

        if let Some(handler) = self.handler.take() {
            handler.abort();
        }

        tracing::info!("Chromium session closed");
        result
    }

    fn name(&self) -> &'static str {
        "chromium"
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        // Dropping the Browser kills a launched child process.
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
    }
}
