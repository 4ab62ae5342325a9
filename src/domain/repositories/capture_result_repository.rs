// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::capture_result::CaptureResult;
use crate::domain::repositories::run_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 截图结果仓库特质
///
/// 定义截图结果数据访问接口
#[async_trait]
pub trait CaptureResultRepository: Send + Sync {
    /// 批量创建结果记录
    async fn create_many(&self, results: &[CaptureResult]) -> Result<(), RepositoryError>;
    /// 查找运行的全部结果，按派发顺序排序
    async fn find_by_run_id(&self, run_id: Uuid) -> Result<Vec<CaptureResult>, RepositoryError>;
    /// 标记结果进入截图中
    async fn mark_capturing(&self, id: Uuid) -> Result<(), RepositoryError>;
    /// 标记结果已完成并记录截图地址
    async fn mark_completed(&self, id: Uuid, image_url: &str) -> Result<(), RepositoryError>;
    /// 标记结果已失败并记录错误信息
    async fn mark_failed(&self, id: Uuid, error_message: &str) -> Result<(), RepositoryError>;
    /// 删除运行的全部结果
    async fn delete_by_run_id(&self, run_id: Uuid) -> Result<u64, RepositoryError>;
}
