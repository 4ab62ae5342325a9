// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::viewport::Viewport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// 截图运行实体
///
/// 表示一次完整的截图扫描执行：针对一组页面和一组视口的
/// 笛卡尔积逐项截图。运行持有聚合计数和生命周期时间戳，
/// 其总项数在创建时固定，之后不再变化。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    /// 运行唯一标识符
    pub id: Uuid,
    /// 目标站点的根URL
    pub base_url: String,
    /// 本次运行选择的视口集合（有序、去重、非空）
    pub viewports: Vec<Viewport>,
    /// 运行状态，跟踪运行在其生命周期中的当前阶段
    pub status: RunStatus,
    /// 总项数，创建时固定为 页面数 x 视口数
    pub total_pages: i32,
    /// 已完成项数，单调不减
    pub completed_count: i32,
    /// 已失败项数，单调不减
    pub failed_count: i32,
    /// 开始时间
    pub started_at: DateTime<Utc>,
    /// 结束时间，进入终态时设置
    pub finished_at: Option<DateTime<Utc>>,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

/// 运行状态枚举
///
/// 状态转换遵循以下流程：
/// Running → Completed/Failed/Cancelled
/// 终态不可再转出。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// 运行中
    #[default]
    Running,
    /// 已完成，所有项成功
    Completed,
    /// 已失败，所有项终结且至少一项失败
    Failed,
    /// 已取消，停止请求在所有项终结前生效
    Cancelled,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RunStatus::Running => write!(f, "running"),
            RunStatus::Completed => write!(f, "completed"),
            RunStatus::Failed => write!(f, "failed"),
            RunStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for RunStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(RunStatus::Running),
            "completed" => Ok(RunStatus::Completed),
            "failed" => Ok(RunStatus::Failed),
            "cancelled" => Ok(RunStatus::Cancelled),
            _ => Err(()),
        }
    }
}

/// 领域错误类型
///
/// 表示在领域层可能发生的各种错误情况，包括状态转换错误
/// 和验证失败。
#[derive(Error, Debug)]
pub enum DomainError {
    /// 无效的状态转换，当状态转换不符合业务规则时发生
    #[error("Invalid state transition")]
    InvalidStateTransition,

    /// 验证错误，当输入数据不符合领域规则时发生
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl Run {
    /// 创建一个新的运行
    ///
    /// # 参数
    ///
    /// * `base_url` - 目标站点根URL
    /// * `viewports` - 选择的视口集合
    /// * `total_pages` - 总项数（页面数 x 视口数）
    ///
    /// # 返回值
    ///
    /// 返回处于Running状态、计数归零的运行实例
    pub fn new(base_url: String, viewports: Vec<Viewport>, total_pages: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            base_url,
            viewports,
            status: RunStatus::Running,
            total_pages,
            completed_count: 0,
            failed_count: 0,
            started_at: now,
            finished_at: None,
            created_at: now,
        }
    }

    /// 尚未终结的项数
    pub fn pending_count(&self) -> i32 {
        self.total_pages - self.completed_count - self.failed_count
    }

    /// 完成进度（0-100）
    pub fn progress_percent(&self) -> f64 {
        if self.total_pages == 0 {
            return 100.0;
        }
        f64::from(self.completed_count) / f64::from(self.total_pages) * 100.0
    }

    /// 判断运行是否处于终态
    pub fn is_terminal(&self) -> bool {
        self.status != RunStatus::Running
    }

    /// 完成运行
    ///
    /// 将运行状态从Running变更为Completed；
    /// 仅当所有项终结且无失败项时允许
    ///
    /// # 返回值
    ///
    /// * `Ok(Run)` - 成功完成的运行
    /// * `Err(DomainError)` - 状态转换失败
    pub fn complete(mut self) -> Result<Self, DomainError> {
        if self.status != RunStatus::Running {
            return Err(DomainError::InvalidStateTransition);
        }
        if self.pending_count() != 0 || self.failed_count != 0 {
            return Err(DomainError::InvalidStateTransition);
        }
        self.status = RunStatus::Completed;
        self.finished_at = Some(Utc::now());
        Ok(self)
    }

    /// 标记运行失败
    ///
    /// 将运行状态从Running变更为Failed；
    /// 仅当所有项终结且存在失败项时允许
    ///
    /// # 返回值
    ///
    /// * `Ok(Run)` - 失败的运行
    /// * `Err(DomainError)` - 状态转换失败
    pub fn fail(mut self) -> Result<Self, DomainError> {
        if self.status != RunStatus::Running {
            return Err(DomainError::InvalidStateTransition);
        }
        if self.pending_count() != 0 || self.failed_count == 0 {
            return Err(DomainError::InvalidStateTransition);
        }
        self.status = RunStatus::Failed;
        self.finished_at = Some(Utc::now());
        Ok(self)
    }

    /// 取消运行
    ///
    /// 将运行状态从Running变更为Cancelled
    ///
    /// # 返回值
    ///
    /// * `Ok(Run)` - 已取消的运行
    /// * `Err(DomainError)` - 状态转换失败
    pub fn cancel(mut self) -> Result<Self, DomainError> {
        if self.status != RunStatus::Running {
            return Err(DomainError::InvalidStateTransition);
        }
        self.status = RunStatus::Cancelled;
        self.finished_at = Some(Utc::now());
        Ok(self)
    }
}
