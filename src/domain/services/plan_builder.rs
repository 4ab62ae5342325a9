// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::catalog::DEFAULT_PAGES;
use crate::domain::models::run::DomainError;
use crate::domain::models::viewport::Viewport;

/// 运行计划中的一个待截图项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCapture {
    /// 派发顺序序号，从0开始
    pub position: i32,
    /// 页面路径
    pub page_path: String,
    /// 页面显示名称
    pub page_name: String,
    /// 视口
    pub viewport: Viewport,
}

/// 展开后的运行计划
#[derive(Debug, Clone)]
pub struct RunPlan {
    /// 实际生效的视口集合（去重，保留选择顺序）
    pub viewports: Vec<Viewport>,
    /// 总项数，等于 页面数 x 视口数
    pub total_pages: i32,
    /// 有序的待截图项列表
    pub items: Vec<PlannedCapture>,
}

/// 将运行配置展开为有序的截图计划
///
/// 页面顺序为内置目录顺序加附加页面顺序，视口顺序为选择顺序
/// （去重，保留首次出现）。展开按页面为外层、视口为内层进行，
/// 对相同输入的输出逐字节一致。
///
/// 附加页面按行拆分，去除首尾空白，空行忽略，名称即路径本身。
/// 与内置目录重复的附加页面不去重，会被截图两次。
///
/// # 参数
///
/// * `viewports` - 选择的视口集合，不能为空
/// * `extra_pages` - 换行分隔的附加页面路径
///
/// # 返回值
///
/// * `Ok(RunPlan)` - 展开后的运行计划
/// * `Err(DomainError)` - 视口集合为空
pub fn build_plan(viewports: &[Viewport], extra_pages: &str) -> Result<RunPlan, DomainError> {
    let mut selected: Vec<Viewport> = Vec::new();
    for viewport in viewports {
        if !selected.contains(viewport) {
            selected.push(*viewport);
        }
    }

    if selected.is_empty() {
        return Err(DomainError::ValidationError(
            "viewport set cannot be empty".to_string(),
        ));
    }

    let mut pages: Vec<(String, String)> = DEFAULT_PAGES
        .iter()
        .map(|page| (page.path.to_string(), page.name.to_string()))
        .collect();

    for line in extra_pages.lines() {
        let path = line.trim();
        if path.is_empty() {
            continue;
        }
        pages.push((path.to_string(), path.to_string()));
    }

    let mut items = Vec::with_capacity(pages.len() * selected.len());
    let mut position = 0i32;
    for (page_path, page_name) in &pages {
        for viewport in &selected {
            items.push(PlannedCapture {
                position,
                page_path: page_path.clone(),
                page_name: page_name.clone(),
                viewport: *viewport,
            });
            position += 1;
        }
    }

    Ok(RunPlan {
        viewports: selected,
        total_pages: items.len() as i32,
        items,
    })
}
