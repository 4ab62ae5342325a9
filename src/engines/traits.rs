// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::capture_result::REDIRECT_MESSAGE_PREFIX;
use crate::domain::models::viewport::Viewport;
use async_trait::async_trait;
use thiserror::Error;

/// 截图引擎错误类型
#[derive(Error, Debug)]
pub enum CaptureError {
    /// 截图服务不可达（连接失败或超时）
    #[error("Capture endpoint unreachable: {0}")]
    Unreachable(String),
    /// 截图服务返回非2xx状态码
    #[error("Capture endpoint returned HTTP {0}")]
    HttpError(u16),
    /// 检测到目标页面重定向，提示性结果而非硬失败
    ///
    /// 消息按约定以`Redirect`开头，消费方据此区分展示
    #[error("{0}")]
    RedirectDetected(String),
    /// 其他错误
    #[error("{0}")]
    Unknown(String),
}

impl CaptureError {
    /// 按消息前缀约定对服务返回的失败文本分类
    pub fn from_service_error(message: String) -> Self {
        if message.starts_with(REDIRECT_MESSAGE_PREFIX) {
            CaptureError::RedirectDetected(message)
        } else {
            CaptureError::Unknown(message)
        }
    }
}

impl From<reqwest::Error> for CaptureError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            CaptureError::Unreachable(err.to_string())
        } else {
            CaptureError::Unknown(err.to_string())
        }
    }
}

/// 截图请求
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    /// 目标页面的完整URL（已注入租户参数）
    pub url: String,
    /// 视口
    pub viewport: Viewport,
    /// 页面显示名称，用于截图命名
    pub page_name: String,
    /// 租户ID
    pub tenant_id: String,
}

/// 截图存放位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLocation {
    /// 截图的可访问地址
    pub url: String,
}

/// 截图引擎特质
///
/// 对外部截图服务的单次调用抽象。引擎自身不重试、不批处理；
/// 超时与退避策略由调用方决定。
#[async_trait]
pub trait CaptureEngine: Send + Sync {
    /// 执行一次截图
    async fn capture(&self, request: &CaptureRequest) -> Result<ImageLocation, CaptureError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
