// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::{ArticleRecord, PipelineResult};
use crate::domain::repositories::storage_repository::ImageStore;
use crate::domain::services::article_fetcher::ArticleFetcher;
use crate::domain::services::link_collector::LinkCollector;
use crate::domain::services::translation_service::{TitleTranslator, TranslationProvider};
use crate::domain::services::word_frequency::FrequencyCounter;
use crate::engines::traits::BrowserSession;

/// 日志中正文预览的最大字符数
const CONTENT_PREVIEW_CHARS: usize = 300;

/// 抓取流水线
///
/// `收集链接 → (为空则结束) → 逐篇抓取 → 翻译标题 → 统计词频 → 组装结果`。
/// 流水线本身不做重试，重试只发生在文章抓取和标题翻译内部。
pub struct ScrapePipeline<P> {
    collector: LinkCollector,
    fetcher: ArticleFetcher,
    translator: TitleTranslator<P>,
    counter: FrequencyCounter,
    image_store: Option<Box<dyn ImageStore>>,
    max_articles: usize,
}

impl<P: TranslationProvider> ScrapePipeline<P> {
    pub fn new(
        collector: LinkCollector,
        fetcher: ArticleFetcher,
        translator: TitleTranslator<P>,
        counter: FrequencyCounter,
        max_articles: usize,
    ) -> Self {
        Self {
            collector,
            fetcher,
            translator,
            counter,
            image_store: None,
            max_articles,
        }
    }

    /// 设置封面图片存储
    pub fn with_image_store(mut self, store: Box<dyn ImageStore>) -> Self {
        self.image_store = Some(store);
        self
    }

    /// 执行一次完整运行
    ///
    /// 单篇文章或单条标题的失败只会降级对应字段，不会中断运行。
    pub async fn run<S: BrowserSession + ?Sized>(&self, session: &mut S) -> PipelineResult {
        tracing::info!("Navigating to listing page...");
        let links = self.collector.collect(session, self.max_articles).await;

        if links.is_empty() {
            tracing::warn!("No articles found!");
            return PipelineResult::empty();
        }

        let mut articles = Vec::with_capacity(links.len());
        for (index, link) in links.iter().enumerate() {
            let position = index + 1;
            tracing::info!(article = position, url = %link, "Scraping article");

            let article = self.fetcher.fetch(session, link.as_str()).await;
            tracing::info!(article = position, "Title: {}", article.title);
            tracing::info!(
                article = position,
                "Content: {}...",
                article.content_preview(CONTENT_PREVIEW_CHARS)
            );

            self.persist_image(&article, position).await;
            articles.push(article);
        }

        tracing::info!(
            "Translating titles ({} -> {})...",
            self.translator.source_lang(),
            self.translator.target_lang()
        );
        let source_titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
        let translated_titles = self.translator.translate_all(&source_titles).await;

        for (position, (source, translated)) in
            source_titles.iter().zip(&translated_titles).enumerate()
        {
            tracing::info!("{}. {} -> {}", position + 1, source, translated);
        }

        tracing::info!("Analyzing repeated words...");
        let repeated_words = self.counter.count(&translated_titles);

        if repeated_words.is_empty() {
            tracing::info!(
                "No words repeated more than {} times",
                self.counter.threshold()
            );
        } else {
            for (word, count) in repeated_words.sorted_by_count() {
                tracing::info!("'{}' - {} times", word, count);
            }
        }

        PipelineResult {
            articles,
            translated_titles,
            repeated_words,
        }
    }

    /// 持有会话执行一次运行，结束后无条件关闭会话
    pub async fn run_scoped<S: BrowserSession + ?Sized>(&self, mut session: Box<S>) -> PipelineResult {
        let result = self.run(session.as_mut()).await;
        if let Err(e) = session.close().await {
            tracing::warn!(session = session.name(), "Failed to close browser session: {}", e);
        }
        result
    }

    async fn persist_image(&self, article: &ArticleRecord, position: usize) {
        let Some(image_url) = article.image_url.as_deref() else {
            tracing::info!(article = position, "No cover image available");
            return;
        };
        let Some(store) = &self.image_store else {
            return;
        };

        let filename = format!("article_{position}.jpg");
        if let Err(e) = store.persist(image_url, Some(&filename)).await {
            tracing::warn!(article = position, url = %image_url, "Failed to download image: {}", e);
        }
    }
}
