// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 下载失败
    #[error("Download failed: {0}")]
    Download(#[from] reqwest::Error),
    /// 非成功状态码
    #[error("Unexpected HTTP status {0}")]
    HttpStatus(u16),
}

/// 图片存储特质
///
/// 把图片地址对应的内容保存到本地，返回保存路径。
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// 保存图片
    ///
    /// # 参数
    ///
    /// * `url` - 图片地址
    /// * `suggested_filename` - 建议的文件名
    async fn persist(
        &self,
        url: &str,
        suggested_filename: Option<&str>,
    ) -> Result<PathBuf, StorageError>;
}
