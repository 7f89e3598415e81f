// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;

use crate::config::settings::Settings;
use crate::domain::models::PipelineResult;
use crate::domain::services::article_fetcher::ArticleFetcher;
use crate::domain::services::extraction_service::ExtractionService;
use crate::domain::services::link_collector::{
    LanguageCheck, LinkCollector, LinkFilter, ListingPage,
};
use crate::domain::services::pipeline::ScrapePipeline;
use crate::domain::services::translation_service::TitleTranslator;
use crate::domain::services::word_frequency::{FrequencyCounter, StopFilter, DEFAULT_THRESHOLD};
use crate::engines;
use crate::infrastructure::storage::LocalImageStore;
use crate::infrastructure::translation::google_translate::GoogleTranslateClient;
use crate::utils::retry_policy::RetryPolicy;

// === Section: Use Case Definition ===

/// 运行抓取用例
///
/// 根据配置组装流水线，打开浏览会话，执行一次运行并在结束时关闭会话。
pub struct RunScraperUseCase {
    settings: Settings,
}

// === Section: Implementation ===

impl RunScraperUseCase {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// 执行一次完整运行
    ///
    /// 只有无法打开会话或无法组装流水线时返回错误；
    /// 单篇文章、单条翻译和图片保存的失败都只会降级结果。
    pub async fn execute(&self) -> anyhow::Result<PipelineResult> {
        let pipeline = self.build_pipeline()?;

        let session = engines::open_session(
            &self.settings.browser,
            self.settings.scraper.page_load_timeout(),
        )
        .await
        .context("Failed to open browser session")?;

        let result = pipeline.run_scoped(session).await;

        if let Some(path) = &self.settings.output.json_path {
            write_json(&result, Path::new(path)).await?;
        }

        Ok(result)
    }

    /// 根据配置组装流水线
    pub fn build_pipeline(&self) -> anyhow::Result<ScrapePipeline<GoogleTranslateClient>> {
        let scraper = &self.settings.scraper;
        let browser = &self.settings.browser;
        let translation = &self.settings.translation;

        let collector = LinkCollector::new(
            ListingPage {
                url: scraper.listing_url.clone(),
                link_selector: scraper.link_selector.clone(),
                page_load_timeout: scraper.page_load_timeout(),
                settle_delay: Duration::from_millis(scraper.listing_settle_delay_ms),
                consent_selector: browser.consent_selector.clone(),
                consent_wait: Duration::from_secs(browser.consent_wait_secs),
            },
            LinkFilter::new(&scraper.section_path, &scraper.article_suffix),
        )
        .with_language_check(LanguageCheck {
            expected_lang: translation.source_lang.clone(),
            edition_host: scraper.edition_host.clone(),
        });

        let fetcher = ArticleFetcher::new(
            ExtractionService::new(self.settings.extraction.clone()),
            scraper.retry_policy(),
            scraper.page_load_timeout(),
            Duration::from_millis(scraper.settle_delay_ms),
        );

        let provider = GoogleTranslateClient::from_settings(translation)
            .context("Failed to build translation client")?;
        let translator = TitleTranslator::new(
            provider,
            &translation.source_lang,
            &translation.target_lang,
        )
        .with_retry_policy(RetryPolicy::fixed(
            translation.max_retries,
            Duration::from_secs(1),
        ));

        let mut pipeline = ScrapePipeline::new(
            collector,
            fetcher,
            translator,
            FrequencyCounter::new(
                StopFilter::english().with_extra(&self.settings.analysis.extra_stop_words),
                DEFAULT_THRESHOLD,
            ),
            scraper.max_articles,
        );

        if self.settings.storage.enabled {
            let store = LocalImageStore::from_settings(&self.settings.storage)
                .context("Failed to build image store")?;
            pipeline = pipeline.with_image_store(Box::new(store));
        }

        Ok(pipeline)
    }
}

async fn write_json(result: &PipelineResult, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_vec_pretty(result)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write result to {}", path.display()))?;
    tracing::info!("Result written to {}", path.display());
    Ok(())
}
