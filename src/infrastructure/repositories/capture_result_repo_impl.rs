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

use crate::domain::models::capture_result::{CaptureResult, ResultStatus};
use crate::domain::repositories::capture_result_repository::CaptureResultRepository;
use crate::domain::repositories::run_repository::RepositoryError;
use crate::infrastructure::database::entities::capture_result as result_entity;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 截图结果仓库实现
///
/// 基于SeaORM实现的结果数据访问层。状态更新带前置状态过滤，
/// 数据库层面兜底严格单向状态机。
#[derive(Clone)]
pub struct CaptureResultRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl CaptureResultRepositoryImpl {
    /// 创建新的结果仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    ///
    /// # 返回值
    ///
    /// 返回新的结果仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<result_entity::Model> for CaptureResult {
    fn from(model: result_entity::Model) -> Self {
        Self {
            id: model.id,
            run_id: model.run_id,
            position: model.position,
            page_path: model.page_path,
            page_name: model.page_name,
            viewport: model.viewport.parse().unwrap_or_default(),
            status: model.status.parse().unwrap_or_default(),
            image_url: model.image_url,
            error_message: model.error_message,
            captured_at: model.captured_at.map(Into::into),
            created_at: model.created_at.into(),
        }
    }
}

impl From<&CaptureResult> for result_entity::ActiveModel {
    fn from(result: &CaptureResult) -> Self {
        Self {
            id: Set(result.id),
            run_id: Set(result.run_id),
            position: Set(result.position),
            page_path: Set(result.page_path.clone()),
            page_name: Set(result.page_name.clone()),
            viewport: Set(result.viewport.to_string()),
            status: Set(result.status.to_string()),
            image_url: Set(result.image_url.clone()),
            error_message: Set(result.error_message.clone()),
            captured_at: Set(result.captured_at.map(Into::into)),
            created_at: Set(result.created_at.into()),
        }
    }
}

#[async_trait]
impl CaptureResultRepository for CaptureResultRepositoryImpl {
    async fn create_many(&self, results: &[CaptureResult]) -> Result<(), RepositoryError> {
        if results.is_empty() {
            return Ok(());
        }

        let models: Vec<result_entity::ActiveModel> = results.iter().map(Into::into).collect();
        result_entity::Entity::insert_many(models)
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }

    async fn find_by_run_id(&self, run_id: Uuid) -> Result<Vec<CaptureResult>, RepositoryError> {
        let models = result_entity::Entity::find()
            .filter(result_entity::Column::RunId.eq(run_id))
            .order_by_asc(result_entity::Column::Position)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(CaptureResult::from).collect())
    }

    async fn mark_capturing(&self, id: Uuid) -> Result<(), RepositoryError> {
        result_entity::Entity::update_many()
            .col_expr(
                result_entity::Column::Status,
                Expr::value(ResultStatus::Capturing.to_string()),
            )
            .filter(result_entity::Column::Id.eq(id))
            .filter(result_entity::Column::Status.eq(ResultStatus::Pending.to_string()))
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }

    async fn mark_completed(&self, id: Uuid, image_url: &str) -> Result<(), RepositoryError> {
        result_entity::Entity::update_many()
            .col_expr(
                result_entity::Column::Status,
                Expr::value(ResultStatus::Completed.to_string()),
            )
            .col_expr(
                result_entity::Column::ImageUrl,
                Expr::value(Some(image_url.to_string())),
            )
            .col_expr(
                result_entity::Column::CapturedAt,
                Expr::value::<Option<DateTime<FixedOffset>>>(Some(Utc::now().into())),
            )
            .filter(result_entity::Column::Id.eq(id))
            .filter(result_entity::Column::Status.eq(ResultStatus::Capturing.to_string()))
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }

    async fn mark_failed(&self, id: Uuid, error_message: &str) -> Result<(), RepositoryError> {
        result_entity::Entity::update_many()
            .col_expr(
                result_entity::Column::Status,
                Expr::value(ResultStatus::Failed.to_string()),
            )
            .col_expr(
                result_entity::Column::ErrorMessage,
                Expr::value(Some(error_message.to_string())),
            )
            .col_expr(
                result_entity::Column::CapturedAt,
                Expr::value::<Option<DateTime<FixedOffset>>>(Some(Utc::now().into())),
            )
            .filter(result_entity::Column::Id.eq(id))
            .filter(result_entity::Column::Status.eq(ResultStatus::Capturing.to_string()))
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }

    async fn delete_by_run_id(&self, run_id: Uuid) -> Result<u64, RepositoryError> {
        let result = result_entity::Entity::delete_many()
            .filter(result_entity::Column::RunId.eq(run_id))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected)
    }
}
