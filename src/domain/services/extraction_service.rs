// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::article::{CONTENT_NOT_FOUND, TITLE_NOT_FOUND};
use crate::engines::traits::{BrowserSession, PageElement};
use serde::Deserialize;
use std::time::Duration;

/// 提取规则
///
/// 标题、正文、封面图各自独立的分层选择器。默认值对应 El País 文章模板。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExtractionRules {
    /// 首选标题选择器
    pub title_primary: String,
    /// 等待首选标题出现的时间（秒）
    pub title_wait_secs: u64,
    /// 备用标题选择器
    pub title_fallback: String,
    /// 首选正文段落选择器
    pub content_primary: String,
    /// 备用正文段落选择器，按顺序尝试
    pub content_secondary: Vec<String>,
    /// 补救用副标题选择器
    pub salvage_subtitle: String,
    /// 补救用图注选择器
    pub salvage_captions: String,
    /// 封面图选择器，按优先级排列
    pub image_selectors: Vec<String>,
    /// 图片地址属性，按顺序读取
    pub image_attributes: Vec<String>,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            title_primary: "h1.a_t".to_string(),
            title_wait_secs: 10,
            title_fallback: "h1".to_string(),
            content_primary: "div.a_c p".to_string(),
            content_secondary: vec![
                "article p".to_string(),
                ".article_body p".to_string(),
                ".a_b p".to_string(),
            ],
            salvage_subtitle: "h2.a_st".to_string(),
            salvage_captions: "figcaption".to_string(),
            image_selectors: vec![
                "article img".to_string(),
                ".a_m_w img".to_string(),
                "figure img".to_string(),
            ],
            image_attributes: vec!["src".to_string(), "data-src".to_string()],
        }
    }
}

/// 提取出的字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

/// 提取服务
///
/// 每一层都是返回 `Option` 的函数，按顺序取第一个非空结果。
/// 会话查询出错与元素不存在同等对待，不会向上传播。
pub struct ExtractionService {
    rules: ExtractionRules,
}

impl ExtractionService {
    pub fn new(rules: ExtractionRules) -> Self {
        Self { rules }
    }

    /// 从当前页面提取标题、正文和封面图
    pub async fn extract<S: BrowserSession + ?Sized>(&self, session: &S) -> ExtractedFields {
        ExtractedFields {
            title: self.extract_title(session).await,
            content: self.extract_content(session).await,
            image_url: self.extract_image(session).await,
        }
    }

    /// 标题：首选选择器（有界等待） → 第一个通用标题 → 占位文本
    pub async fn extract_title<S: BrowserSession + ?Sized>(&self, session: &S) -> String {
        if let Some(title) = self.primary_title(session).await {
            return title;
        }
        if let Some(title) = first_text(session, &self.rules.title_fallback).await {
            tracing::debug!("Primary title selector missing, used fallback heading");
            return title;
        }
        TITLE_NOT_FOUND.to_string()
    }

    async fn primary_title<S: BrowserSession + ?Sized>(&self, session: &S) -> Option<String> {
        let wait = Duration::from_secs(self.rules.title_wait_secs);
        match session.wait_for(&self.rules.title_primary, wait).await {
            Ok(element) => element.and_then(|el| el.trimmed_text().map(str::to_string)),
            Err(e) => {
                tracing::debug!(selector = %self.rules.title_primary, "Title lookup failed: {}", e);
                None
            }
        }
    }

    /// 正文：首选段落 → 备用段落 → 副标题加图注 → 占位文本
    pub async fn extract_content<S: BrowserSession + ?Sized>(&self, session: &S) -> String {
        if let Some(body) = joined_paragraphs(session, &self.rules.content_primary).await {
            return body;
        }

        for selector in &self.rules.content_secondary {
            if let Some(body) = joined_paragraphs(session, selector).await {
                tracing::debug!(selector = %selector, "Used secondary content selector");
                return body;
            }
        }

        if let Some(salvaged) = self.salvage(session).await {
            tracing::debug!("No paragraphs found, salvaged subtitle and captions");
            return salvaged;
        }

        CONTENT_NOT_FOUND.to_string()
    }

    async fn salvage<S: BrowserSession + ?Sized>(&self, session: &S) -> Option<String> {
        let mut parts = Vec::new();

        if let Some(subtitle) = first_text(session, &self.rules.salvage_subtitle).await {
            parts.push(subtitle);
        }
        parts.extend(non_empty_texts(query(session, &self.rules.salvage_captions).await));

        join_lines(parts)
    }

    /// 封面图：按优先级尝试选择器，取第一个匹配元素的图片地址
    pub async fn extract_image<S: BrowserSession + ?Sized>(&self, session: &S) -> Option<String> {
        for selector in &self.rules.image_selectors {
            let source = query(session, selector)
                .await
                .into_iter()
                .next()
                .and_then(|img| self.image_source(&img));

            if source.is_some() {
                return source;
            }
        }
        None
    }

    fn image_source(&self, img: &PageElement) -> Option<String> {
        self.rules
            .image_attributes
            .iter()
            .filter_map(|attr| img.attr(attr))
            .map(str::trim)
            .find(|src| !src.is_empty())
            .map(str::to_string)
    }
}

impl Default for ExtractionService {
    fn default() -> Self {
        Self::new(ExtractionRules::default())
    }
}

async fn query<S: BrowserSession + ?Sized>(session: &S, selector: &str) -> Vec<PageElement> {
    match session.find_all(selector).await {
        Ok(elements) => elements,
        Err(e) => {
            tracing::debug!(selector = %selector, "Element query failed: {}", e);
            Vec::new()
        }
    }
}

async fn first_text<S: BrowserSession + ?Sized>(session: &S, selector: &str) -> Option<String> {
    query(session, selector)
        .await
        .into_iter()
        .find_map(|el| el.trimmed_text().map(str::to_string))
}

async fn joined_paragraphs<S: BrowserSession + ?Sized>(
    session: &S,
    selector: &str,
) -> Option<String> {
    join_lines(non_empty_texts(query(session, selector).await))
}

fn non_empty_texts(elements: Vec<PageElement>) -> impl Iterator<Item = String> {
    elements
        .into_iter()
        .filter_map(|el| el.trimmed_text().map(str::to_string))
}

fn join_lines<I: IntoIterator<Item = String>>(parts: I) -> Option<String> {
    let parts: Vec<String> = parts.into_iter().collect();
    (!parts.is_empty()).then(|| parts.join("\n"))
}
