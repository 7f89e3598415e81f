// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::ArticleRecord;
use crate::domain::services::extraction_service::ExtractionService;
use crate::engines::traits::{BrowserSession, EngineError};
use crate::utils::retry_policy::RetryPolicy;
use std::time::Duration;

/// 文章抓取器
///
/// 带超时和重试的文章页加载，成功后交给提取服务。
/// 任何情况下都返回一条完整记录，单篇文章失败不会中断整批抓取。
pub struct ArticleFetcher {
    extraction: ExtractionService,
    retry_policy: RetryPolicy,
    page_load_timeout: Duration,
    settle_delay: Duration,
}

impl ArticleFetcher {
    /// 创建文章抓取器
    ///
    /// # 参数
    ///
    /// * `extraction` - 提取服务
    /// * `retry_policy` - 页面加载重试策略
    /// * `page_load_timeout` - 单次页面加载超时时间
    /// * `settle_delay` - 加载成功后等待页面稳定的时间
    pub fn new(
        extraction: ExtractionService,
        retry_policy: RetryPolicy,
        page_load_timeout: Duration,
        settle_delay: Duration,
    ) -> Self {
        Self {
            extraction,
            retry_policy,
            page_load_timeout,
            settle_delay,
        }
    }

    /// 抓取单篇文章
    ///
    /// 加载失败时按固定退避重试，全部失败后返回 `Failed to load` 降级记录。
    pub async fn fetch<S: BrowserSession + ?Sized>(&self, session: &mut S, url: &str) -> ArticleRecord {
        if let Err(e) = self.load_with_retry(session, url).await {
            tracing::warn!(
                url = %url,
                attempts = self.retry_policy.total_attempts(),
                "Failed to load article: {}",
                e
            );
            return ArticleRecord::failed_to_load(url);
        }

        let fields = self.extraction.extract(&*session).await;
        ArticleRecord {
            url: url.to_string(),
            title: fields.title,
            content: fields.content,
            image_url: fields.image_url,
        }
    }

    async fn load_with_retry<S: BrowserSession + ?Sized>(
        &self,
        session: &mut S,
        url: &str,
    ) -> Result<(), EngineError> {
        let mut attempt = 0;
        loop {
            match load_page(session, url, self.page_load_timeout).await {
                Ok(()) => {
                    tokio::time::sleep(self.settle_delay).await;
                    return Ok(());
                }
                Err(e) if self.retry_policy.should_retry(attempt) => {
                    attempt += 1;
                    tracing::info!(
                        url = %url,
                        "Page load failed ({}), retrying ({}/{})...",
                        e,
                        attempt,
                        self.retry_policy.max_retries
                    );
                    tokio::time::sleep(self.retry_policy.backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// 在超时时间内导航到指定页面
pub async fn load_page<S: BrowserSession + ?Sized>(
    session: &mut S,
    url: &str,
    timeout: Duration,
) -> Result<(), EngineError> {
    tokio::time::timeout(timeout, session.navigate(url))
        .await
        .map_err(|_| EngineError::Timeout)?
}
