// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use futures::StreamExt;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::config::settings::StorageSettings;
use crate::domain::repositories::storage_repository::{ImageStore, StorageError};

/// 由地址推导的文件名最大长度
const MAX_DERIVED_FILENAME_LEN: usize = 100;

/// 本地文件系统图片存储
///
/// 以流的方式下载图片并写入图片目录，目录不存在时自动创建。
pub struct LocalImageStore {
    client: reqwest::Client,
    base_path: PathBuf,
}

impl LocalImageStore {
    pub fn new(base_path: impl Into<PathBuf>, timeout: Duration) -> Result<Self, StorageError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_path: base_path.into(),
        })
    }

    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        Self::new(
            &settings.image_dir,
            Duration::from_secs(settings.download_timeout_secs),
        )
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn persist(
        &self,
        url: &str,
        suggested_filename: Option<&str>,
    ) -> Result<PathBuf, StorageError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::HttpStatus(status.as_u16()));
        }

        // 确保目录存在
        fs::create_dir_all(&self.base_path).await?;
        let full_path = self.base_path.join(resolve_filename(url, suggested_filename));

        let mut file = fs::File::create(&full_path).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;

        tracing::info!("Image saved: {}", full_path.display());
        Ok(full_path)
    }
}

/// 确定图片文件名
///
/// 依次使用建议文件名、地址中的文件名，最后退回到基于地址哈希的稳定文件名。
pub fn resolve_filename(url: &str, suggested: Option<&str>) -> String {
    suggested
        .and_then(file_name_component)
        .or_else(|| filename_from_url(url))
        .unwrap_or_else(|| fallback_filename(url))
}

fn file_name_component(name: &str) -> Option<String> {
    Path::new(name.trim())
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

fn filename_from_url(url: &str) -> Option<String> {
    let last_segment = match Url::parse(url) {
        Ok(parsed) => parsed.path().rsplit('/').next().map(str::to_string),
        Err(_) => url
            .rsplit('/')
            .next()
            .and_then(|s| s.split('?').next())
            .map(str::to_string),
    }?;

    let decoded = urlencoding::decode(&last_segment)
        .map(|s| s.into_owned())
        .unwrap_or(last_segment);

    file_name_component(&decoded).filter(|n| n.len() <= MAX_DERIVED_FILENAME_LEN)
}

fn fallback_filename(url: &str) -> String {
    let digest = hex::encode(Sha256::digest(url.as_bytes()));
    format!("article_image_{}.jpg", &digest[..16])
}
