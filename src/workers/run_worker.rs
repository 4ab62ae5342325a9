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

use crate::domain::models::run::RunStatus;
use crate::domain::models::viewport::Viewport;
use crate::domain::repositories::capture_result_repository::CaptureResultRepository;
use crate::domain::repositories::run_repository::RunRepository;
use crate::engines::traits::{CaptureEngine, CaptureError, CaptureRequest};
use crate::utils::errors::WorkerError;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// 一个待派发的截图工作项
///
/// 由运行计划展开而来，URL已是注入租户参数后的完整目标地址
#[derive(Debug, Clone)]
pub struct WorkItem {
    /// 对应的结果记录ID
    pub result_id: Uuid,
    /// 目标页面完整URL
    pub url: String,
    /// 页面显示名称
    pub page_name: String,
    /// 视口
    pub viewport: Viewport,
}

/// 运行工作器
///
/// 驱动单个运行从派发到终态：按计划顺序、受限并发地执行
/// 每个工作项，逐项记录结果并原子更新聚合计数。单个工作项
/// 的任何故障都只影响该项，不会中止运行。
pub struct RunWorker<R, C>
where
    R: RunRepository + 'static,
    C: CaptureResultRepository + 'static,
{
    run_repository: Arc<R>,
    result_repository: Arc<C>,
    engine: Arc<dyn CaptureEngine>,
    /// 同时在途的截图数上限
    max_in_flight: usize,
    /// 单个工作项的超时时间
    item_timeout: Duration,
    /// 注入到截图请求中的租户ID
    tenant_id: String,
    /// 协作式取消标志，置位后不再派发新项
    cancel_flag: Arc<AtomicBool>,
}

impl<R, C> RunWorker<R, C>
where
    R: RunRepository + Send + Sync,
    C: CaptureResultRepository + Send + Sync,
{
    /// 创建新的运行工作器实例
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        run_repository: Arc<R>,
        result_repository: Arc<C>,
        engine: Arc<dyn CaptureEngine>,
        max_in_flight: usize,
        item_timeout: Duration,
        tenant_id: String,
        cancel_flag: Arc<AtomicBool>,
    ) -> Self {
        Self {
            run_repository,
            result_repository,
            engine,
            max_in_flight: max_in_flight.max(1),
            item_timeout,
            tenant_id,
            cancel_flag,
        }
    }

    /// 运行截图工作器
    ///
    /// 按派发顺序处理所有工作项，全部落定后判定运行终态。
    /// 取消标志置位后停止派发新项，在途项允许自然结束。
    pub async fn run(self: Arc<Self>, run_id: Uuid, items: Vec<WorkItem>) {
        info!("Run worker started for run {} ({} items)", run_id, items.len());

        let semaphore = Arc::new(Semaphore::new(self.max_in_flight));
        let mut handles = Vec::with_capacity(items.len());

        for item in items {
            if self.cancel_flag.load(Ordering::SeqCst) {
                info!("Stop requested, halting dispatch for run {}", run_id);
                break;
            }

            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };

            // A stop may have arrived while waiting for a slot
            if self.cancel_flag.load(Ordering::SeqCst) {
                drop(permit);
                info!("Stop requested, halting dispatch for run {}", run_id);
                break;
            }

            let worker = Arc::clone(&self);
            handles.push(tokio::spawn(async move {
                let _permit = permit;
                worker.process_item(run_id, item).await;
            }));
        }

        futures::future::join_all(handles).await;

        if let Err(e) = self.finalize(run_id).await {
            error!("Failed to finalize run {}: {}", run_id, e);
        }
    }

    /// 处理单个工作项
    ///
    /// 故障隔离：截图错误和记录错误都被吸收在本项内，
    /// 工作器本身绝不因单项故障而中止
    #[instrument(skip(self, item), fields(result_id = %item.result_id, url = %item.url, viewport = %item.viewport))]
    async fn process_item(&self, run_id: Uuid, item: WorkItem) {
        if let Err(e) = self.result_repository.mark_capturing(item.result_id).await {
            error!("Failed to mark result as capturing: {}", e);
        }

        let request = CaptureRequest {
            url: item.url.clone(),
            viewport: item.viewport,
            page_name: item.page_name.clone(),
            tenant_id: self.tenant_id.clone(),
        };

        let outcome = match tokio::time::timeout(self.item_timeout, self.engine.capture(&request))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(CaptureError::Unreachable(format!(
                "No response from capture endpoint within {}s",
                self.item_timeout.as_secs()
            ))),
        };

        match outcome {
            Ok(image) => {
                debug!("Capture completed: {}", image.url);
                if let Err(e) = self
                    .result_repository
                    .mark_completed(item.result_id, &image.url)
                    .await
                {
                    error!("Failed to record completed capture: {}", e);
                }
                if let Err(e) = self.run_repository.increment_completed(run_id).await {
                    error!("Failed to increment completed count: {}", e);
                }
                metrics::counter!("shotrs_captures_completed_total").increment(1);
            }
            Err(err) => {
                let message = err.to_string();
                warn!("Capture failed: {}", message);
                if let Err(e) = self
                    .result_repository
                    .mark_failed(item.result_id, &message)
                    .await
                {
                    error!("Failed to record failed capture: {}", e);
                }
                if let Err(e) = self.run_repository.increment_failed(run_id).await {
                    error!("Failed to increment failed count: {}", e);
                }
                metrics::counter!("shotrs_captures_failed_total").increment(1);
            }
        }
    }

    /// 判定并写入运行终态
    ///
    /// 所有项落定时按失败计数得出Completed/Failed；仍有未落定
    /// 项（即派发被取消截断）时写入Cancelled。自然完成优先于
    /// 待处理的停止请求；守卫式写入保证第一个终态获胜。
    async fn finalize(&self, run_id: Uuid) -> Result<(), WorkerError> {
        let run = self
            .run_repository
            .find_by_id(run_id)
            .await
            .map_err(|e| WorkerError::RepositoryError(e.to_string()))?
            .ok_or_else(|| WorkerError::NotFound(run_id.to_string()))?;

        let settled = run.completed_count + run.failed_count;
        let status = if settled >= run.total_pages {
            if run.failed_count == 0 {
                RunStatus::Completed
            } else {
                RunStatus::Failed
            }
        } else {
            RunStatus::Cancelled
        };

        let applied = self
            .run_repository
            .finish(run_id, status, Utc::now())
            .await
            .map_err(|e| WorkerError::RepositoryError(e.to_string()))?;

        if applied {
            info!(
                "Run {} finished: {} ({}/{} completed, {} failed)",
                run_id, status, run.completed_count, run.total_pages, run.failed_count
            );
        } else {
            debug!("Run {} already terminal, leaving status untouched", run_id);
        }

        Ok(())
    }
}
