// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::article::ArticleRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 高频词表
///
/// 只包含出现次数超过阈值的词。每次运行重新计算，只读。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordFrequencyMap(HashMap<String, usize>);

impl WordFrequencyMap {
    pub fn new(counts: HashMap<String, usize>) -> Self {
        Self(counts)
    }

    pub fn get(&self, word: &str) -> Option<usize> {
        self.0.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(word, count)| (word.as_str(), *count))
    }

    /// 按出现次数降序排列，次数相同时按字母升序
    pub fn sorted_by_count(&self) -> Vec<(&str, usize)> {
        let mut words: Vec<_> = self.iter().collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        words
    }
}

/// 流水线结果
///
/// 一次运行对外输出的唯一产物。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    /// 文章记录，与链接顺序一致
    pub articles: Vec<ArticleRecord>,
    /// 翻译后的标题，与文章顺序一致
    pub translated_titles: Vec<String>,
    /// 高频词
    pub repeated_words: WordFrequencyMap,
}

impl PipelineResult {
    /// 没有发现任何文章时的结果
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
