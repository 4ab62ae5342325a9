// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::run::DomainError;
use crate::domain::models::viewport::Viewport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 重定向类错误消息的前缀约定
///
/// 以该前缀开头的error_message表示目标页面发生了重定向，
/// 属于提示性结果而非硬失败，消费方据此区分展示
pub const REDIRECT_MESSAGE_PREFIX: &str = "Redirect";

/// 截图结果实体
///
/// 表示一次运行中针对单个（页面, 视口）组合的截图尝试。
/// 结果由其运行独占持有，删除运行时级联删除全部结果。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureResult {
    /// 结果唯一标识符
    pub id: Uuid,
    /// 所属运行ID
    pub run_id: Uuid,
    /// 派发顺序序号，提供与派发列表一致的稳定排序
    pub position: i32,
    /// 页面路径
    pub page_path: String,
    /// 页面显示名称
    pub page_name: String,
    /// 视口
    pub viewport: Viewport,
    /// 结果状态
    pub status: ResultStatus,
    /// 截图地址，仅在Completed状态下设置
    pub image_url: Option<String>,
    /// 错误信息，仅在Failed状态下设置
    pub error_message: Option<String>,
    /// 终结时间，进入终态时设置
    pub captured_at: Option<DateTime<Utc>>,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

/// 结果状态枚举
///
/// 严格单向状态机：
/// Pending → Capturing → Completed/Failed
/// 不允许回退，终态不可再转出。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    /// 待处理，已创建但尚未派发
    #[default]
    Pending,
    /// 截图中，已派发给截图服务
    Capturing,
    /// 已完成，成功拿到截图
    Completed,
    /// 已失败
    Failed,
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ResultStatus::Pending => write!(f, "pending"),
            ResultStatus::Capturing => write!(f, "capturing"),
            ResultStatus::Completed => write!(f, "completed"),
            ResultStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for ResultStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ResultStatus::Pending),
            "capturing" => Ok(ResultStatus::Capturing),
            "completed" => Ok(ResultStatus::Completed),
            "failed" => Ok(ResultStatus::Failed),
            _ => Err(()),
        }
    }
}

impl CaptureResult {
    /// 创建一个新的截图结果
    ///
    /// # 参数
    ///
    /// * `run_id` - 所属运行ID
    /// * `position` - 派发顺序序号
    /// * `page_path` - 页面路径
    /// * `page_name` - 页面显示名称
    /// * `viewport` - 视口
    ///
    /// # 返回值
    ///
    /// 返回处于Pending状态的结果实例
    pub fn new(
        run_id: Uuid,
        position: i32,
        page_path: String,
        page_name: String,
        viewport: Viewport,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            run_id,
            position,
            page_path,
            page_name,
            viewport,
            status: ResultStatus::Pending,
            image_url: None,
            error_message: None,
            captured_at: None,
            created_at: Utc::now(),
        }
    }

    /// 开始截图
    ///
    /// 将结果状态从Pending变更为Capturing
    ///
    /// # 返回值
    ///
    /// * `Ok(CaptureResult)` - 已进入Capturing的结果
    /// * `Err(DomainError)` - 状态转换失败
    pub fn begin_capture(mut self) -> Result<Self, DomainError> {
        match self.status {
            ResultStatus::Pending => {
                self.status = ResultStatus::Capturing;
                Ok(self)
            }
            _ => Err(DomainError::InvalidStateTransition),
        }
    }

    /// 完成截图
    ///
    /// 将结果状态从Capturing变更为Completed并记录截图地址
    ///
    /// # 返回值
    ///
    /// * `Ok(CaptureResult)` - 已完成的结果
    /// * `Err(DomainError)` - 状态转换失败
    pub fn complete(mut self, image_url: String) -> Result<Self, DomainError> {
        match self.status {
            ResultStatus::Capturing => {
                self.status = ResultStatus::Completed;
                self.image_url = Some(image_url);
                self.captured_at = Some(Utc::now());
                Ok(self)
            }
            _ => Err(DomainError::InvalidStateTransition),
        }
    }

    /// 标记截图失败
    ///
    /// 将结果状态从Capturing变更为Failed并记录错误信息
    ///
    /// # 返回值
    ///
    /// * `Ok(CaptureResult)` - 失败的结果
    /// * `Err(DomainError)` - 状态转换失败
    pub fn fail(mut self, error_message: String) -> Result<Self, DomainError> {
        match self.status {
            ResultStatus::Capturing => {
                self.status = ResultStatus::Failed;
                self.error_message = Some(error_message);
                self.captured_at = Some(Utc::now());
                Ok(self)
            }
            _ => Err(DomainError::InvalidStateTransition),
        }
    }

    /// 判断结果是否处于终态
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, ResultStatus::Completed | ResultStatus::Failed)
    }

    /// 判断失败是否为重定向类提示
    ///
    /// 按error_message前缀约定区分重定向与硬失败
    pub fn is_redirect(&self) -> bool {
        self.error_message
            .as_deref()
            .is_some_and(|msg| msg.starts_with(REDIRECT_MESSAGE_PREFIX))
    }
}
