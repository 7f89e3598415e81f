// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::TranslationSettings;
use crate::domain::services::translation_service::{TranslationError, TranslationProvider};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Google翻译客户端
///
/// 调用公开的 `translate_a/single` 接口（`client=gtx`），不需要API密钥。
///
/// # 配置
///
/// - `translation.endpoint` - 接口地址
/// - `translation.timeout_secs` - 请求超时时间
pub struct GoogleTranslateClient {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTranslateClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, TranslationError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_settings(settings: &TranslationSettings) -> Result<Self, TranslationError> {
        Self::new(
            settings.endpoint.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslateClient {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslationError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source_lang),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::HttpStatus(status.as_u16()));
        }

        let body: Value = response.json().await?;
        parse_translation(&body)
    }
}

/// 解析接口响应
///
/// 响应的第一个元素是分段数组，每段的第一个元素是译文片段。
fn parse_translation(body: &Value) -> Result<String, TranslationError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError::InvalidResponse("missing segment list".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(TranslationError::Empty);
    }
    Ok(translated)
}
