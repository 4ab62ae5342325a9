// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::capture_result::{CaptureResult, ResultStatus};
use crate::domain::models::run::{Run, RunStatus};
use crate::domain::models::viewport::Viewport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 运行概要响应
///
/// 用于运行列表和启动响应，进度为完成项占总项数的百分比
#[derive(Debug, Serialize, Deserialize)]
pub struct RunSummaryDto {
    /// 运行唯一标识符
    pub id: Uuid,
    /// 目标站点根URL
    pub base_url: String,
    /// 本次运行选择的视口集合
    pub viewports: Vec<Viewport>,
    /// 运行状态
    pub status: RunStatus,
    /// 总项数
    pub total_pages: i32,
    /// 已完成项数
    pub completed_count: i32,
    /// 已失败项数
    pub failed_count: i32,
    /// 完成进度（0-100）
    pub progress_percent: f64,
    /// 开始时间
    pub started_at: DateTime<Utc>,
    /// 结束时间
    pub finished_at: Option<DateTime<Utc>>,
}

impl From<Run> for RunSummaryDto {
    fn from(run: Run) -> Self {
        let progress_percent = run.progress_percent();
        Self {
            id: run.id,
            base_url: run.base_url,
            viewports: run.viewports,
            status: run.status,
            total_pages: run.total_pages,
            completed_count: run.completed_count,
            failed_count: run.failed_count,
            progress_percent,
            started_at: run.started_at,
            finished_at: run.finished_at,
        }
    }
}

/// 单个截图结果响应
#[derive(Debug, Serialize, Deserialize)]
pub struct CaptureResultDto {
    /// 结果唯一标识符
    pub id: Uuid,
    /// 所属运行ID
    pub run_id: Uuid,
    /// 派发顺序序号
    pub position: i32,
    /// 页面路径
    pub page_path: String,
    /// 页面显示名称
    pub page_name: String,
    /// 视口
    pub viewport: Viewport,
    /// 结果状态
    pub status: ResultStatus,
    /// 截图地址
    pub image_url: Option<String>,
    /// 错误信息
    pub error_message: Option<String>,
    /// 失败是否为重定向类提示
    pub is_redirect: bool,
    /// 终结时间
    pub captured_at: Option<DateTime<Utc>>,
}

impl From<CaptureResult> for CaptureResultDto {
    fn from(result: CaptureResult) -> Self {
        let is_redirect = result.is_redirect();
        Self {
            id: result.id,
            run_id: result.run_id,
            position: result.position,
            page_path: result.page_path,
            page_name: result.page_name,
            viewport: result.viewport,
            status: result.status,
            image_url: result.image_url,
            error_message: result.error_message,
            is_redirect,
            captured_at: result.captured_at,
        }
    }
}

/// 运行详情响应
///
/// 运行概要加上按派发顺序排列的全部结果
#[derive(Debug, Serialize, Deserialize)]
pub struct RunDetailDto {
    /// 运行概要
    pub run: RunSummaryDto,
    /// 全部结果，按派发顺序排列
    pub results: Vec<CaptureResultDto>,
}
