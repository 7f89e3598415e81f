// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::ArticleLink;
use crate::domain::services::article_fetcher::load_page;
use crate::engines::traits::BrowserSession;
use std::collections::HashSet;
use std::time::Duration;

/// 默认最大文章数
pub const DEFAULT_MAX_ARTICLES: usize = 5;

/// 链接过滤器
///
/// 完整文章页的地址包含栏目路径片段，并以文章页后缀结尾。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFilter {
    section_path: String,
    suffix: String,
}

impl LinkFilter {
    pub fn new(section_path: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            section_path: section_path.into(),
            suffix: suffix.into(),
        }
    }

    pub fn accepts(&self, href: &str) -> bool {
        href.contains(&self.section_path) && href.ends_with(&self.suffix)
    }
}

/// 从候选地址中选出文章链接
///
/// 保持首次出现的顺序，重复地址直接跳过，不符合过滤条件的地址静默丢弃，
/// 最多返回 `max` 个。
pub fn select_article_links<I, S>(hrefs: I, filter: &LinkFilter, max: usize) -> Vec<ArticleLink>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for href in hrefs {
        if links.len() >= max {
            break;
        }
        let href = href.as_ref().trim();
        if href.is_empty() || !filter.accepts(href) {
            continue;
        }
        if seen.insert(href.to_string()) {
            links.push(ArticleLink::new(href));
        }
    }

    links
}

/// 列表页配置
#[derive(Debug, Clone)]
pub struct ListingPage {
    /// 列表页URL
    pub url: String,
    /// 文章链接选择器
    pub link_selector: String,
    /// 页面加载超时时间
    pub page_load_timeout: Duration,
    /// 加载后等待页面稳定的时间
    pub settle_delay: Duration,
    /// 同意横幅按钮选择器
    pub consent_selector: Option<String>,
    /// 等待同意横幅的时间
    pub consent_wait: Duration,
}

/// 源语言检查
#[derive(Debug, Clone)]
pub struct LanguageCheck {
    /// 期望的语言代码前缀
    pub expected_lang: String,
    /// 源语言版本的站点域名
    pub edition_host: String,
}

impl LanguageCheck {
    /// 判断页面是否为源语言版本
    ///
    /// 优先看 `<html lang>`，否则看当前地址是否属于源语言版本站点。
    pub fn matches(&self, page_lang: Option<&str>, current_url: Option<&str>) -> bool {
        if let Some(lang) = page_lang {
            if lang.to_lowercase().starts_with(&self.expected_lang.to_lowercase()) {
                return true;
            }
        }

        current_url.is_some_and(|url| {
            let url = url.to_lowercase();
            url.contains(&self.edition_host.to_lowercase()) && !url.contains("english")
        })
    }
}

/// 链接收集器
pub struct LinkCollector {
    listing: ListingPage,
    filter: LinkFilter,
    language: Option<LanguageCheck>,
}

impl LinkCollector {
    pub fn new(listing: ListingPage, filter: LinkFilter) -> Self {
        Self {
            listing,
            filter,
            language: None,
        }
    }

    pub fn with_language_check(mut self, check: LanguageCheck) -> Self {
        self.language = Some(check);
        self
    }

    /// 收集文章链接
    ///
    /// 列表页加载失败或查询失败时返回空列表，不视为错误。
    ///
    /// # 参数
    ///
    /// * `session` - 浏览会话
    /// * `max` - 最大链接数
    pub async fn collect<S: BrowserSession + ?Sized>(
        &self,
        session: &mut S,
        max: usize,
    ) -> Vec<ArticleLink> {
        if let Err(e) = load_page(session, &self.listing.url, self.listing.page_load_timeout).await {
            tracing::error!(url = %self.listing.url, "Failed to load listing page: {}", e);
            return Vec::new();
        }
        tokio::time::sleep(self.listing.settle_delay).await;

        if let Some(selector) = &self.listing.consent_selector {
            session.dismiss_consent(selector, self.listing.consent_wait).await;
        }

        if let Some(check) = &self.language {
            self.log_language(&*session, check).await;
        }

        let anchors = match session.find_all(&self.listing.link_selector).await {
            Ok(anchors) => anchors,
            Err(e) => {
                tracing::error!(selector = %self.listing.link_selector, "Failed to query article anchors: {}", e);
                return Vec::new();
            }
        };

        let links = select_article_links(
            anchors.iter().filter_map(|a| a.attr("href")),
            &self.filter,
            max,
        );
        tracing::info!("Found {} article links", links.len());
        links
    }

    async fn log_language<S: BrowserSession + ?Sized>(&self, session: &S, check: &LanguageCheck) -> bool {
        let lang = session.page_language().await.ok().flatten();
        let url = session.current_url().await.ok().flatten();
        tracing::info!("Page language: {}", lang.as_deref().unwrap_or("unknown"));

        let matches = check.matches(lang.as_deref(), url.as_deref());
        if matches {
            tracing::info!("Website is in the expected source language");
        } else {
            tracing::warn!("Website may not be in the expected source language");
        }
        matches
    }
}
