// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 抓取流水线的各个阶段：
/// - 链接收集（link_collector）：从列表页得到去重、有序、有上限的文章链接
/// - 文章抓取（article_fetcher）：带超时和重试的文章页加载
/// - 内容提取（extraction_service）：标题、正文、封面图的分层回退提取
/// - 标题翻译（translation_service）：逐条隔离失败的翻译适配
/// - 词频统计（word_frequency）：分词、停用词过滤和计数
/// - 流水线（pipeline）：按顺序编排以上阶段并组装结果
pub mod article_fetcher;
pub mod extraction_service;
pub mod link_collector;
pub mod pipeline;
pub mod translation_service;
pub mod word_frequency;
