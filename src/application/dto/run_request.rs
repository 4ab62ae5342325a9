// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::viewport::Viewport;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 启动运行请求
///
/// `extra_pages` 为换行分隔的附加页面路径，空串表示无附加页面
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct StartRunRequestDto {
    /// 目标站点根URL
    #[validate(url)]
    pub base_url: String,
    /// 选择的视口集合，不能为空
    #[validate(length(min = 1, message = "viewport set cannot be empty"))]
    pub viewports: Vec<Viewport>,
    /// 换行分隔的附加页面路径
    #[serde(default)]
    pub extra_pages: String,
}
