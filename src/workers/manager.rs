// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::capture_result_repository::CaptureResultRepository;
use crate::domain::repositories::run_repository::RunRepository;
use crate::engines::traits::CaptureEngine;
use crate::workers::run_worker::{RunWorker, WorkItem};
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

/// 运行管理器
///
/// 持有在途运行的登记表并负责其生命周期：为每个运行派生
/// 一个RunWorker任务，并提供协作式停止。停止只阻止后续
/// 派发，不抢占在途的截图调用。
pub struct RunManager<R, C>
where
    R: RunRepository + 'static,
    C: CaptureResultRepository + 'static,
{
    run_repository: Arc<R>,
    result_repository: Arc<C>,
    engine: Arc<dyn CaptureEngine>,
    max_in_flight: usize,
    item_timeout: Duration,
    tenant_id: String,
    /// 在途运行登记表：运行ID → 取消标志
    active: Arc<DashMap<Uuid, Arc<AtomicBool>>>,
}

impl<R, C> RunManager<R, C>
where
    R: RunRepository + Send + Sync,
    C: CaptureResultRepository + Send + Sync,
{
    /// 创建新的运行管理器实例
    pub fn new(
        run_repository: Arc<R>,
        result_repository: Arc<C>,
        engine: Arc<dyn CaptureEngine>,
        max_in_flight: usize,
        item_timeout: Duration,
        tenant_id: String,
    ) -> Self {
        Self {
            run_repository,
            result_repository,
            engine,
            max_in_flight,
            item_timeout,
            tenant_id,
            active: Arc::new(DashMap::new()),
        }
    }

    /// 启动一个运行的后台执行
    ///
    /// 在登记表中注册取消标志后派生工作器任务；
    /// 任务结束时自行注销
    pub fn spawn_run(&self, run_id: Uuid, items: Vec<WorkItem>) {
        let cancel_flag = Arc::new(AtomicBool::new(false));
        self.active.insert(run_id, cancel_flag.clone());

        let worker = Arc::new(RunWorker::new(
            self.run_repository.clone(),
            self.result_repository.clone(),
            self.engine.clone(),
            self.max_in_flight,
            self.item_timeout,
            self.tenant_id.clone(),
            cancel_flag,
        ));

        let active = Arc::clone(&self.active);
        tokio::spawn(async move {
            worker.run(run_id, items).await;
            active.remove(&run_id);
        });

        metrics::counter!("shotrs_runs_started_total").increment(1);
        info!("Run {} spawned", run_id);
    }

    /// 请求停止一个在途运行
    ///
    /// 协作式：置位取消标志，在途项允许自然结束。
    ///
    /// # 返回值
    ///
    /// 运行在登记表中时返回true，否则返回false
    pub fn request_stop(&self, run_id: Uuid) -> bool {
        match self.active.get(&run_id) {
            Some(cancel_flag) => {
                cancel_flag.store(true, Ordering::SeqCst);
                info!("Stop requested for run {}", run_id);
                true
            }
            None => false,
        }
    }

    /// 判断运行是否仍在途
    pub fn is_active(&self, run_id: Uuid) -> bool {
        self.active.contains_key(&run_id)
    }
}
