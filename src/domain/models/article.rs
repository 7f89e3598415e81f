// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 页面加载彻底失败时的标题
pub const TITLE_FAILED_TO_LOAD: &str = "Failed to load";
/// 找不到标题时的标题
pub const TITLE_NOT_FOUND: &str = "Title not found";
/// 找不到正文时的正文
pub const CONTENT_NOT_FOUND: &str = "Content not found";

/// 文章链接
///
/// 列表页中发现的完整文章页地址。一次运行内唯一，
/// 且已经通过栏目路径和文章后缀过滤。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleLink(String);

impl ArticleLink {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ArticleLink {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// 文章记录
///
/// 每次抓取尝试都会得到一条完整记录。`title` 和 `content` 永远存在，
/// 局部失败时取对应的占位文本。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// 文章地址
    pub url: String,
    /// 标题
    pub title: String,
    /// 正文，段落之间以换行分隔
    pub content: String,
    /// 封面图片地址
    pub image_url: Option<String>,
}

impl ArticleRecord {
    /// 页面始终无法加载时的降级记录
    pub fn failed_to_load(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: TITLE_FAILED_TO_LOAD.to_string(),
            content: String::new(),
            image_url: None,
        }
    }

    /// 是否为加载失败的降级记录
    pub fn is_failed_load(&self) -> bool {
        self.title == TITLE_FAILED_TO_LOAD && self.content.is_empty() && self.image_url.is_none()
    }

    /// 正文预览，最多 `max_chars` 个字符
    pub fn content_preview(&self, max_chars: usize) -> &str {
        match self.content.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.content[..idx],
            None => &self.content,
        }
    }
}
