// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::WordFrequencyMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// 默认高频阈值，只保留出现次数大于该值的词
pub const DEFAULT_THRESHOLD: usize = 2;

static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z]+").expect("Failed to compile word regex"));

/// 英文停用词
const ENGLISH_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "shall", "can",
    "need", "to", "of", "in", "for", "on", "with", "at", "by", "from", "as", "into", "through",
    "during", "before", "after", "above", "below", "between", "out", "off", "over", "under",
    "and", "but", "or", "nor", "not", "so", "yet", "both", "either", "neither", "each", "every",
    "all", "any", "few", "more", "most", "other", "some", "such", "no", "only", "own", "same",
    "than", "too", "very", "just", "because", "if", "when", "where", "how", "what", "which",
    "who", "whom", "this", "that", "these", "those", "it", "its", "he", "she", "they", "them",
    "his", "her", "their", "our", "your", "my", "about",
];

/// 分词
///
/// 提取所有连续的ASCII字母串并转为小写。
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    WORD_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_ascii_lowercase())
}

/// 停用词过滤器
#[derive(Debug, Clone)]
pub struct StopFilter {
    stop_words: HashSet<String>,
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl StopFilter {
    /// 内置英文停用词表
    pub fn english() -> Self {
        Self::from_list(ENGLISH_STOP_WORDS)
    }

    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stop_words: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// 追加停用词
    pub fn with_extra<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// 词是否应计入统计：不是停用词且长度大于1
    pub fn accepts(&self, token: &str) -> bool {
        token.len() > 1 && !self.is_stop_word(token)
    }
}

/// 词频统计器
///
/// 在整批标题上统计每一次出现（不是按标题去重），只返回出现次数大于阈值的词。
#[derive(Debug, Clone)]
pub struct FrequencyCounter {
    filter: StopFilter,
    threshold: usize,
}

impl Default for FrequencyCounter {
    fn default() -> Self {
        Self::new(StopFilter::english(), DEFAULT_THRESHOLD)
    }
}

impl FrequencyCounter {
    pub fn new(filter: StopFilter, threshold: usize) -> Self {
        Self { filter, threshold }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// 统计高频词
    ///
    /// # 参数
    ///
    /// * `titles` - 翻译后的标题
    ///
    /// # 返回值
    ///
    /// 出现次数大于阈值的词及其次数
    pub fn count<S: AsRef<str>>(&self, titles: &[S]) -> WordFrequencyMap {
        let mut counts: HashMap<String, usize> = HashMap::new();

        for title in titles {
            for token in tokenize(title.as_ref()) {
                if self.filter.accepts(&token) {
                    *counts.entry(token).or_default() += 1;
                }
            }
        }

        counts.retain(|_, count| *count > self.threshold);
        WordFrequencyMap::new(counts)
    }
}
