// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{BrowserSettings, SessionEngine};
use std::time::Duration;

pub mod chromium_session;
pub mod http_session;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

use chromium_session::ChromiumSession;
use http_session::HttpSession;
use traits::{BrowserSession, EngineError};

/// 根据配置打开浏览会话
///
/// # 参数
///
/// * `settings` - 浏览器配置
/// * `page_load_timeout` - 页面加载超时时间，作为HTTP会话的请求超时和Chromium会话CDP超时的下限
pub async fn open_session(
    settings: &BrowserSettings,
    page_load_timeout: Duration,
) -> Result<Box<dyn BrowserSession>, EngineError> {
    let session: Box<dyn BrowserSession> = match settings.engine {
        SessionEngine::Chromium => Box::new(ChromiumSession::start(settings, page_load_timeout).await?),
        SessionEngine::Http => Box::new(HttpSession::new(page_load_timeout)?),
    };
    tracing::info!(engine = session.name(), "Browser session opened");
    Ok(session)
}
