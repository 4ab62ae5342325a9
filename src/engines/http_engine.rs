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

use crate::engines::traits::{CaptureEngine, CaptureError, CaptureRequest, ImageLocation};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// HTTP截图引擎
///
/// 基于reqwest实现的截图服务客户端，向外部端点发起
/// `POST /capture` 调用。不重试，不在传输层默认行为之外
/// 做超时处理。
pub struct HttpCaptureEngine {
    /// HTTP客户端
    client: reqwest::Client,
    /// 截图服务端点，不含路径
    endpoint: String,
}

/// 截图服务请求体
#[derive(Debug, Serialize)]
struct CaptureRequestBody<'a> {
    url: &'a str,
    viewport: String,
    #[serde(rename = "pageName")]
    page_name: &'a str,
    #[serde(rename = "tenantId")]
    tenant_id: &'a str,
}

/// 截图服务响应体
#[derive(Debug, Deserialize)]
struct CaptureResponseBody {
    success: bool,
    #[serde(rename = "imageUrl")]
    image_url: Option<String>,
    error: Option<String>,
}

impl HttpCaptureEngine {
    /// 创建新的HTTP截图引擎实例
    ///
    /// # 参数
    ///
    /// * `endpoint` - 截图服务端点URL
    ///
    /// # 返回值
    ///
    /// 返回新的HTTP截图引擎实例
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    fn capture_url(&self) -> String {
        format!("{}/capture", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl CaptureEngine for HttpCaptureEngine {
    /// 执行一次截图
    ///
    /// # 参数
    ///
    /// * `request` - 截图请求
    ///
    /// # 返回值
    ///
    /// * `Ok(ImageLocation)` - 截图存放位置
    /// * `Err(CaptureError)` - 截图失败
    async fn capture(&self, request: &CaptureRequest) -> Result<ImageLocation, CaptureError> {
        let body = CaptureRequestBody {
            url: &request.url,
            viewport: request.viewport.to_string(),
            page_name: &request.page_name,
            tenant_id: &request.tenant_id,
        };

        let response = self
            .client
            .post(self.capture_url())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CaptureError::HttpError(status.as_u16()));
        }

        let payload: CaptureResponseBody = response
            .json()
            .await
            .map_err(|e| CaptureError::Unknown(format!("Invalid capture response: {}", e)))?;

        if payload.success {
            match payload.image_url {
                Some(url) => Ok(ImageLocation { url }),
                None => Err(CaptureError::Unknown(
                    "Capture endpoint returned no image URL".to_string(),
                )),
            }
        } else {
            let message = payload
                .error
                .unwrap_or_else(|| "Capture failed".to_string());
            Err(CaptureError::from_service_error(message))
        }
    }

    /// 引擎名称
    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
#[path = "http_engine_test.rs"]
mod tests;
