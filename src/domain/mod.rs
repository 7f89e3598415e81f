// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：文章链接、文章记录和流水线结果
/// - 仓库接口（repositories）：图片存储抽象接口
/// - 服务（services）：抓取流水线的各个阶段
pub mod models;
pub mod repositories;
pub mod services;
