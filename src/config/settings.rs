// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::extraction_service::ExtractionRules;
use crate::utils::retry_policy::RetryPolicy;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含抓取、浏览器、翻译、存储和输出等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 抓取配置
    pub scraper: ScraperSettings,
    /// 浏览器配置
    pub browser: BrowserSettings,
    /// 翻译配置
    pub translation: TranslationSettings,
    /// 存储配置
    pub storage: StorageSettings,
    /// 输出配置
    pub output: OutputSettings,
    /// 提取规则
    #[serde(default)]
    pub extraction: ExtractionRules,
    /// 词频分析配置
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

/// 抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperSettings {
    /// 列表页URL
    pub listing_url: String,
    /// 栏目路径片段
    pub section_path: String,
    /// 文章页后缀
    pub article_suffix: String,
    /// 列表页文章链接选择器
    pub link_selector: String,
    /// 最大文章数
    pub max_articles: usize,
    /// 页面加载重试次数
    pub max_retries: u32,
    /// 页面加载超时时间（秒）
    pub page_load_timeout_secs: u64,
    /// 重试退避时间（秒）
    pub retry_backoff_secs: u64,
    /// 文章页加载后的稳定等待时间（毫秒）
    pub settle_delay_ms: u64,
    /// 列表页加载后的稳定等待时间（毫秒）
    pub listing_settle_delay_ms: u64,
    /// 源语言版本的站点域名
    pub edition_host: String,
}

impl ScraperSettings {
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::fixed(self.max_retries, Duration::from_secs(self.retry_backoff_secs))
    }
}

/// 会话引擎类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionEngine {
    /// chromiumoxide 驱动的浏览器
    Chromium,
    /// reqwest + scraper 静态抓取
    Http,
}

/// 浏览器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserSettings {
    /// 会话引擎
    pub engine: SessionEngine,
    /// 远程调试地址 (可选，连接已运行的Chrome)
    pub remote_debugging_url: Option<String>,
    /// 是否无头模式
    pub headless: bool,
    /// 窗口宽度
    pub window_width: u32,
    /// 窗口高度
    pub window_height: u32,
    /// CDP请求超时时间（秒）
    pub request_timeout_secs: u64,
    /// 同意横幅按钮选择器 (可选)
    pub consent_selector: Option<String>,
    /// 等待同意横幅的时间（秒）
    pub consent_wait_secs: u64,
}

impl BrowserSettings {
    /// CDP请求超时时间
    ///
    /// chromiumoxide 用同一个值作为导航期限，所以不能小于页面加载超时时间，
    /// 否则页面加载会比配置的超时更早失败。
    pub fn cdp_request_timeout(&self, page_load_timeout: Duration) -> Duration {
        Duration::from_secs(self.request_timeout_secs).max(page_load_timeout)
    }
}

/// 翻译配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationSettings {
    /// 源语言
    pub source_lang: String,
    /// 目标语言
    pub target_lang: String,
    /// 翻译接口地址
    pub endpoint: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 单条翻译重试次数
    pub max_retries: u32,
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 是否保存封面图片
    pub enabled: bool,
    /// 图片目录
    pub image_dir: String,
    /// 下载超时时间（秒）
    pub download_timeout_secs: u64,
}

/// 词频分析配置设置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// 追加的停用词
    pub extra_stop_words: Vec<String>,
}

/// 输出配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    /// 结果JSON文件路径 (可选)
    pub json_path: Option<String>,
    /// 是否输出JSON格式日志
    pub json_logs: bool,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载内置默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和
    /// `OPINION_SCRAPER__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("OPINION_SCRAPER").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 只包含内置默认值的配置构建器
    pub fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            // Default scraper settings
            .set_default("scraper.listing_url", "https://elpais.com/opinion/")?
            .set_default("scraper.section_path", "/opinion/")?
            .set_default("scraper.article_suffix", ".html")?
            .set_default("scraper.link_selector", "article a[href*='/opinion/']")?
            .set_default("scraper.max_articles", 5)?
            .set_default("scraper.max_retries", 2)?
            .set_default("scraper.page_load_timeout_secs", 60)?
            .set_default("scraper.retry_backoff_secs", 3)?
            .set_default("scraper.settle_delay_ms", 2000)?
            .set_default("scraper.listing_settle_delay_ms", 3000)?
            .set_default("scraper.edition_host", "elpais.com")?
            // Default browser settings
            .set_default("browser.engine", "chromium")?
            .set_default("browser.headless", true)?
            .set_default("browser.window_width", 1920)?
            .set_default("browser.window_height", 1080)?
            .set_default("browser.request_timeout_secs", 30)?
            .set_default("browser.consent_selector", "#didomi-notice-agree-button")?
            .set_default("browser.consent_wait_secs", 5)?
            // Default translation settings
            .set_default("translation.source_lang", "es")?
            .set_default("translation.target_lang", "en")?
            .set_default(
                "translation.endpoint",
                "https://translate.googleapis.com/translate_a/single",
            )?
            .set_default("translation.timeout_secs", 10)?
            .set_default("translation.max_retries", 0)?
            // Default storage settings
            .set_default("storage.enabled", true)?
            .set_default("storage.image_dir", "images")?
            .set_default("storage.download_timeout_secs", 15)?
            // Default output settings
            .set_default("output.json_logs", false)
    }
}
