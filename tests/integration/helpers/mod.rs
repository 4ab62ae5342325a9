// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.


use shotrs::domain::models::run::Run;
use shotrs::domain::repositories::run_repository::RunRepository;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// 轮询存储直到运行进入终态
///
/// 超时前未终结则panic
pub async fn wait_until_terminal<R: RunRepository>(
    repo: &Arc<R>,
    run_id: Uuid,
    timeout: Duration,
) -> Run {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        let run = repo
            .find_by_id(run_id)
            .await
            .expect("find should succeed")
            .expect("run should exist");
        if run.is_terminal() {
            return run;
        }
        if tokio::time::Instant::now() >= deadline {
            panic!("run {} did not reach a terminal state in time", run_id);
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
