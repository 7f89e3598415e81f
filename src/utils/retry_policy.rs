// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

/// 重试策略配置
///
/// 页面加载与翻译调用共用的有界重试策略。`max_retries` 是首次尝试之外的
/// 额外次数，总尝试次数为 `max_retries + 1`。
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// 最大重试次数
    pub max_retries: u32,
    /// 每次重试前的固定退避时间
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::page_load()
    }
}

impl RetryPolicy {
    /// 页面加载策略：重试2次，固定3秒退避
    pub fn page_load() -> Self {
        Self::fixed(2, Duration::from_secs(3))
    }

    /// 固定退避策略
    pub fn fixed(max_retries: u32, backoff: Duration) -> Self {
        Self {
            max_retries,
            backoff,
        }
    }

    /// 不重试
    pub fn none() -> Self {
        Self::fixed(0, Duration::ZERO)
    }

    /// 总尝试次数
    pub fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// 已失败 `attempt` 次（从0开始计数的尝试序号）后是否还应该重试
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }
}
