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

use crate::domain::models::run::{Run, RunStatus};
use crate::domain::models::viewport::Viewport;
use crate::domain::repositories::run_repository::{RepositoryError, RunRepository};
use crate::infrastructure::database::entities::capture_result as result_entity;
use crate::infrastructure::database::entities::run as run_entity;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

/// 运行仓库实现
///
/// 基于SeaORM实现的运行数据访问层
#[derive(Clone)]
pub struct RunRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl RunRepositoryImpl {
    /// 创建新的运行仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    ///
    /// # 返回值
    ///
    /// 返回新的运行仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<run_entity::Model> for Run {
    fn from(model: run_entity::Model) -> Self {
        let viewports = model
            .viewports
            .split(',')
            .filter_map(|v| v.parse::<Viewport>().ok())
            .collect();

        Self {
            id: model.id,
            base_url: model.base_url,
            viewports,
            status: model.status.parse().unwrap_or_default(),
            total_pages: model.total_pages,
            completed_count: model.completed_count,
            failed_count: model.failed_count,
            started_at: model.started_at.into(),
            finished_at: model.finished_at.map(Into::into),
            created_at: model.created_at.into(),
        }
    }
}

impl From<&Run> for run_entity::ActiveModel {
    fn from(run: &Run) -> Self {
        let viewports = run
            .viewports
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");

        Self {
            id: Set(run.id),
            base_url: Set(run.base_url.clone()),
            viewports: Set(viewports),
            status: Set(run.status.to_string()),
            total_pages: Set(run.total_pages),
            completed_count: Set(run.completed_count),
            failed_count: Set(run.failed_count),
            started_at: Set(run.started_at.into()),
            finished_at: Set(run.finished_at.map(Into::into)),
            created_at: Set(run.created_at.into()),
        }
    }
}

#[async_trait]
impl RunRepository for RunRepositoryImpl {
    async fn create(&self, run: &Run) -> Result<Run, RepositoryError> {
        let model: run_entity::ActiveModel = run.into();

        model.insert(self.db.as_ref()).await?;
        Ok(run.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Run>, RepositoryError> {
        let model = run_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Run>, RepositoryError> {
        let models = run_entity::Entity::find()
            .order_by_desc(run_entity::Column::StartedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Run::from).collect())
    }

    async fn increment_completed(&self, id: Uuid) -> Result<(), RepositoryError> {
        run_entity::Entity::update_many()
            .col_expr(
                run_entity::Column::CompletedCount,
                Expr::col(run_entity::Column::CompletedCount).add(1),
            )
            .filter(run_entity::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }

    async fn increment_failed(&self, id: Uuid) -> Result<(), RepositoryError> {
        run_entity::Entity::update_many()
            .col_expr(
                run_entity::Column::FailedCount,
                Expr::col(run_entity::Column::FailedCount).add(1),
            )
            .filter(run_entity::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }

    async fn finish(
        &self,
        id: Uuid,
        status: RunStatus,
        finished_at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        // 仅覆盖仍处于running的行，保证终态吸收、先到先得
        let result = run_entity::Entity::update_many()
            .col_expr(run_entity::Column::Status, Expr::value(status.to_string()))
            .col_expr(
                run_entity::Column::FinishedAt,
                Expr::value::<Option<DateTime<FixedOffset>>>(Some(finished_at.into())),
            )
            .filter(run_entity::Column::Id.eq(id))
            .filter(run_entity::Column::Status.eq(RunStatus::Running.to_string()))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        result_entity::Entity::delete_many()
            .filter(result_entity::Column::RunId.eq(id))
            .exec(&txn)
            .await?;

        let deleted = run_entity::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        if deleted.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
