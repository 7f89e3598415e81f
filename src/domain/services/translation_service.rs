// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::retry_policy::RetryPolicy;
use async_trait::async_trait;
use thiserror::Error;

/// 翻译错误类型
#[derive(Error, Debug)]
pub enum TranslationError {
    /// 请求失败
    #[error("Translation request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 翻译服务返回非成功状态码
    #[error("Translation provider returned status {0}")]
    HttpStatus(u16),
    /// 响应格式无效
    #[error("Invalid translation response: {0}")]
    InvalidResponse(String),
    /// 翻译结果为空
    #[error("Empty translation")]
    Empty,
}

/// 翻译服务特质
///
/// 外部翻译服务的不透明调用，每次调用都可能失败。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// 将文本从源语言翻译为目标语言
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslationError>;
}

/// 标题翻译器
///
/// 使用固定的源语言→目标语言对逐条翻译。单条失败时记录日志并保留原文，
/// 输出与输入长度相同、顺序一致。
pub struct TitleTranslator<P> {
    provider: P,
    source_lang: String,
    target_lang: String,
    retry_policy: RetryPolicy,
}

impl<P: TranslationProvider> TitleTranslator<P> {
    pub fn new(provider: P, source_lang: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            provider,
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            retry_policy: RetryPolicy::none(),
        }
    }

    /// 设置单条翻译的重试策略
    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    /// 翻译全部标题
    ///
    /// # 参数
    ///
    /// * `titles` - 源语言标题
    ///
    /// # 返回值
    ///
    /// 与输入等长、顺序一致的目标语言标题，失败项为原文
    pub async fn translate_all<S: AsRef<str>>(&self, titles: &[S]) -> Vec<String> {
        let mut translated = Vec::with_capacity(titles.len());
        for title in titles {
            translated.push(self.translate_one(title.as_ref()).await);
        }
        translated
    }

    async fn translate_one(&self, title: &str) -> String {
        if title.trim().is_empty() {
            return title.to_string();
        }

        let mut attempt = 0;
        loop {
            match self.try_translate(title).await {
                Ok(text) => return text,
                Err(e) if self.retry_policy.should_retry(attempt) => {
                    attempt += 1;
                    tracing::debug!("Translation attempt {} failed for '{}': {}", attempt, title, e);
                    tokio::time::sleep(self.retry_policy.backoff).await;
                }
                Err(e) => {
                    tracing::warn!("Translation failed for '{}': {}", title, e);
                    return title.to_string();
                }
            }
        }
    }

    async fn try_translate(&self, title: &str) -> Result<String, TranslationError> {
        let text = self
            .provider
            .translate(title, &self.source_lang, &self.target_lang)
            .await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(TranslationError::Empty);
        }
        Ok(text.to_string())
    }
}
