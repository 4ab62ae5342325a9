// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::run::{Run, RunStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
}

/// 运行仓库特质
///
/// 定义运行数据访问接口。聚合计数的自增必须是原子操作，
/// 终态写入必须带守卫（只允许覆盖Running状态），以保证
/// 终态吸收和并发项完成时计数不丢失。
#[async_trait]
pub trait RunRepository: Send + Sync {
    /// 创建新运行
    async fn create(&self, run: &Run) -> Result<Run, RepositoryError>;
    /// 根据ID查找运行
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Run>, RepositoryError>;
    /// 列出所有运行，按开始时间倒序
    async fn list(&self) -> Result<Vec<Run>, RepositoryError>;
    /// 原子自增已完成计数
    async fn increment_completed(&self, id: Uuid) -> Result<(), RepositoryError>;
    /// 原子自增已失败计数
    async fn increment_failed(&self, id: Uuid) -> Result<(), RepositoryError>;
    /// 将运行写入终态
    ///
    /// 仅当运行仍处于Running状态时生效；返回是否实际写入。
    /// 并发的终态写入中只有第一个获胜。
    async fn finish(
        &self,
        id: Uuid,
        status: RunStatus,
        finished_at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError>;
    /// 删除运行，级联删除其全部结果
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
