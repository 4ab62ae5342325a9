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

use crate::{
    application::dto::{
        run_request::StartRunRequestDto,
        run_response::{RunDetailDto, RunSummaryDto},
    },
    domain::{
        models::{capture_result::CaptureResult, run::Run, run::RunStatus},
        repositories::{
            capture_result_repository::CaptureResultRepository,
            run_repository::{RepositoryError, RunRepository},
        },
        services::plan_builder,
    },
    utils::url_utils,
    workers::{manager::RunManager, run_worker::WorkItem},
};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

#[derive(Error, Debug)]
pub enum RunUseCaseError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Run not found")]
    NotFound,
}

/// 运行用例
///
/// 编排运行的创建、查询、停止与删除。配置校验在创建任何
/// 记录之前完成；校验失败时不产生运行。
pub struct RunUseCase<R, C>
where
    R: RunRepository + 'static,
    C: CaptureResultRepository + 'static,
{
    run_repo: Arc<R>,
    result_repo: Arc<C>,
    manager: Arc<RunManager<R, C>>,
    tenant_id: String,
}

impl<R, C> RunUseCase<R, C>
where
    R: RunRepository + Send + Sync,
    C: CaptureResultRepository + Send + Sync,
{
    pub fn new(
        run_repo: Arc<R>,
        result_repo: Arc<C>,
        manager: Arc<RunManager<R, C>>,
        tenant_id: String,
    ) -> Self {
        Self {
            run_repo,
            result_repo,
            manager,
            tenant_id,
        }
    }

    /// 启动新运行
    ///
    /// 校验配置，展开运行计划，落库运行与全部Pending结果，
    /// 然后把工作项交给运行管理器后台执行
    pub async fn start_run(
        &self,
        dto: StartRunRequestDto,
    ) -> Result<RunSummaryDto, RunUseCaseError> {
        dto.validate()
            .map_err(|e| RunUseCaseError::ValidationError(e.to_string()))?;

        let base_url = url_utils::parse_base_url(&dto.base_url)
            .map_err(|e| RunUseCaseError::ValidationError(format!("invalid base URL: {}", e)))?;

        let plan = plan_builder::build_plan(&dto.viewports, &dto.extra_pages)
            .map_err(|e| RunUseCaseError::ValidationError(e.to_string()))?;

        // Resolve every target URL up front so a bad extra page rejects the
        // whole configuration before anything is persisted
        let mut target_urls = Vec::with_capacity(plan.items.len());
        for item in &plan.items {
            let target = url_utils::build_target_url(&base_url, &item.page_path, &self.tenant_id)
                .map_err(|e| {
                    RunUseCaseError::ValidationError(format!(
                        "invalid page path {}: {}",
                        item.page_path, e
                    ))
                })?;
            target_urls.push(target.to_string());
        }

        let run = Run::new(dto.base_url.clone(), plan.viewports.clone(), plan.total_pages);
        let created = self.run_repo.create(&run).await?;

        let results: Vec<CaptureResult> = plan
            .items
            .iter()
            .map(|item| {
                CaptureResult::new(
                    run.id,
                    item.position,
                    item.page_path.clone(),
                    item.page_name.clone(),
                    item.viewport,
                )
            })
            .collect();
        self.result_repo.create_many(&results).await?;

        let work_items: Vec<WorkItem> = results
            .iter()
            .zip(target_urls)
            .map(|(result, url)| WorkItem {
                result_id: result.id,
                url,
                page_name: result.page_name.clone(),
                viewport: result.viewport,
            })
            .collect();

        self.manager.spawn_run(run.id, work_items);
        info!(
            "Run {} started: {} pages x {} viewports",
            run.id,
            plan.total_pages / plan.viewports.len() as i32,
            plan.viewports.len()
        );

        Ok(created.into())
    }

    /// 获取运行详情及其全部结果
    pub async fn get_run(&self, run_id: Uuid) -> Result<RunDetailDto, RunUseCaseError> {
        let run = self
            .run_repo
            .find_by_id(run_id)
            .await?
            .ok_or(RunUseCaseError::NotFound)?;
        let results = self.result_repo.find_by_run_id(run_id).await?;

        Ok(RunDetailDto {
            run: run.into(),
            results: results.into_iter().map(Into::into).collect(),
        })
    }

    /// 列出所有运行
    pub async fn list_runs(&self) -> Result<Vec<RunSummaryDto>, RunUseCaseError> {
        let runs = self.run_repo.list().await?;
        Ok(runs.into_iter().map(Into::into).collect())
    }

    /// 请求停止运行
    ///
    /// 在途运行置位取消标志；已终结的运行保持不变（幂等）。
    /// 存储中仍为Running但登记表中不存在的运行（如进程重启
    /// 后的遗留行）直接写入Cancelled。
    pub async fn stop_run(&self, run_id: Uuid) -> Result<RunSummaryDto, RunUseCaseError> {
        let run = self
            .run_repo
            .find_by_id(run_id)
            .await?
            .ok_or(RunUseCaseError::NotFound)?;

        if self.manager.request_stop(run_id) {
            return Ok(run.into());
        }

        if run.status == RunStatus::Running {
            self.run_repo
                .finish(run_id, RunStatus::Cancelled, Utc::now())
                .await?;
            let run = self
                .run_repo
                .find_by_id(run_id)
                .await?
                .ok_or(RunUseCaseError::NotFound)?;
            return Ok(run.into());
        }

        Ok(run.into())
    }

    /// 删除运行，级联删除其全部结果
    ///
    /// 在途运行不允许删除，需先停止
    pub async fn delete_run(&self, run_id: Uuid) -> Result<(), RunUseCaseError> {
        if self.manager.is_active(run_id) {
            return Err(RunUseCaseError::ValidationError(
                "cannot delete an active run; stop it first".to_string(),
            ));
        }

        if self.run_repo.find_by_id(run_id).await?.is_none() {
            return Err(RunUseCaseError::NotFound);
        }

        self.run_repo.delete(run_id).await?;
        info!("Run {} deleted", run_id);
        Ok(())
    }
}
