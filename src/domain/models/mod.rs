// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 定义在流水线中线性流动的值类型：文章链接、文章记录、高频词表和流水线结果
pub mod article;
pub mod pipeline_result;

pub use article::{ArticleLink, ArticleRecord};
pub use pipeline_result::{PipelineResult, WordFrequencyMap};
