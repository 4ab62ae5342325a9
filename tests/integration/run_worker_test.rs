// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::integration::helpers::memory_repos::{
    MemoryCaptureResultRepository, MemoryRunRepository,
};
use crate::integration::helpers::mock_engine::{ScriptedCaptureEngine, ScriptedOutcome};
use shotrs::domain::models::capture_result::{CaptureResult, ResultStatus};
use shotrs::domain::models::run::{Run, RunStatus};
use shotrs::domain::models::viewport::Viewport;
use shotrs::domain::repositories::capture_result_repository::CaptureResultRepository;
use shotrs::domain::repositories::run_repository::RunRepository;
use shotrs::engines::traits::CaptureEngine;
use shotrs::workers::run_worker::{RunWorker, WorkItem};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

struct Fixture {
    run_repo: Arc<MemoryRunRepository>,
    result_repo: Arc<MemoryCaptureResultRepository>,
    run: Run,
    items: Vec<WorkItem>,
}

/// 准备一个含若干页面、单视口的运行及其Pending结果
async fn setup(pages: &[&str]) -> Fixture {
    let result_repo = Arc::new(MemoryCaptureResultRepository::new());
    let run_repo = Arc::new(MemoryRunRepository::new(result_repo.clone()));

    let run = Run::new(
        "https://example.com".to_string(),
        vec![Viewport::Desktop],
        pages.len() as i32,
    );
    run_repo.create(&run).await.unwrap();

    let results: Vec<CaptureResult> = pages
        .iter()
        .enumerate()
        .map(|(position, path)| {
            CaptureResult::new(
                run.id,
                position as i32,
                path.to_string(),
                path.to_string(),
                Viewport::Desktop,
            )
        })
        .collect();
    result_repo.create_many(&results).await.unwrap();

    let items = results
        .iter()
        .map(|result| WorkItem {
            result_id: result.id,
            url: format!("https://example.com{}?practice_id=1", result.page_path),
            page_name: result.page_name.clone(),
            viewport: result.viewport,
        })
        .collect();

    Fixture {
        run_repo,
        result_repo,
        run,
        items,
    }
}

fn worker(
    fixture: &Fixture,
    engine: Arc<dyn CaptureEngine>,
    item_timeout: Duration,
) -> Arc<RunWorker<MemoryRunRepository, MemoryCaptureResultRepository>> {
    Arc::new(RunWorker::new(
        fixture.run_repo.clone(),
        fixture.result_repo.clone(),
        engine,
        2,
        item_timeout,
        "1".to_string(),
        Arc::new(AtomicBool::new(false)),
    ))
}

#[tokio::test]
async fn test_run_with_all_items_succeeding_completes() {
    // Given: 三个全部会成功的工作项
    let fixture = setup(&["/", "/dashboard", "/settings"]).await;
    let engine = Arc::new(ScriptedCaptureEngine::succeeding());

    // When: 运行工作器驱动到终态
    worker(&fixture, engine, Duration::from_secs(5))
        .run(fixture.run.id, fixture.items.clone())
        .await;

    // Then: 运行Completed，计数与结果一致
    let run = fixture
        .run_repo
        .find_by_id(fixture.run.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(run.completed_count, 3);
    assert_eq!(run.failed_count, 0);
    assert_eq!(run.pending_count(), 0);
    assert!(run.finished_at.is_some());

    let results = fixture
        .result_repo
        .find_by_run_id(fixture.run.id)
        .await
        .unwrap();
    assert_eq!(results.len(), 3);
    for (index, result) in results.iter().enumerate() {
        assert_eq!(result.position, index as i32);
        assert_eq!(result.status, ResultStatus::Completed);
        assert!(result.image_url.is_some());
        assert!(result.captured_at.is_some());
    }
}

#[tokio::test]
async fn test_item_failure_does_not_abort_the_run() {
    // Given: 第二个页面不可达，其余成功
    let fixture = setup(&["/", "/kaputt", "/settings"]).await;
    let engine = Arc::new(ScriptedCaptureEngine::succeeding().with_rule(
        "/kaputt",
        ScriptedOutcome::Unreachable("connection refused".to_string()),
    ));

    worker(&fixture, engine, Duration::from_secs(5))
        .run(fixture.run.id, fixture.items.clone())
        .await;

    // Then: 运行Failed但其余项照常完成
    let run = fixture
        .run_repo
        .find_by_id(fixture.run.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(run.status, RunStatus::Failed);
    assert_eq!(run.completed_count, 2);
    assert_eq!(run.failed_count, 1);

    let results = fixture
        .result_repo
        .find_by_run_id(fixture.run.id)
        .await
        .unwrap();
    let failed: Vec<_> = results
        .iter()
        .filter(|result| result.status == ResultStatus::Failed)
        .collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].page_path, "/kaputt");
    assert!(failed[0]
        .error_message
        .as_deref()
        .unwrap()
        .starts_with("Capture endpoint unreachable"));
    assert!(!failed[0].is_redirect());
}

#[tokio::test]
async fn test_redirect_failure_is_distinguishable() {
    // Given: 受保护页面发生重定向
    let fixture = setup(&["/", "/settings"]).await;
    let engine = Arc::new(ScriptedCaptureEngine::succeeding().with_rule(
        "/settings",
        ScriptedOutcome::Redirect("Redirect zu /auth/login erkannt".to_string()),
    ));

    worker(&fixture, engine, Duration::from_secs(5))
        .run(fixture.run.id, fixture.items.clone())
        .await;

    let results = fixture
        .result_repo
        .find_by_run_id(fixture.run.id)
        .await
        .unwrap();
    let redirected = results
        .iter()
        .find(|result| result.page_path == "/settings")
        .unwrap();

    // Then: 错误信息保留Redirect前缀并被识别为重定向
    assert_eq!(redirected.status, ResultStatus::Failed);
    assert!(redirected
        .error_message
        .as_deref()
        .unwrap()
        .starts_with("Redirect"));
    assert!(redirected.is_redirect());
}

#[tokio::test]
async fn test_item_timeout_is_recorded_as_unreachable() {
    // Given: 截图耗时超过单项超时
    let fixture = setup(&["/"]).await;
    let engine = Arc::new(
        ScriptedCaptureEngine::succeeding().with_delay(Duration::from_millis(200)),
    );

    worker(&fixture, engine, Duration::from_millis(50))
        .run(fixture.run.id, fixture.items.clone())
        .await;

    // Then: 该项失败，信息说明无响应
    let run = fixture
        .run_repo
        .find_by_id(fixture.run.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(run.status, RunStatus::Failed);
    assert_eq!(run.failed_count, 1);

    let results = fixture
        .result_repo
        .find_by_run_id(fixture.run.id)
        .await
        .unwrap();
    assert!(results[0]
        .error_message
        .as_deref()
        .unwrap()
        .starts_with("Capture endpoint unreachable"));
}

#[tokio::test]
async fn test_counters_never_exceed_total_while_running() {
    // Given: 慢速引擎下的五个工作项
    let fixture = setup(&["/a", "/b", "/c", "/d", "/e"]).await;
    let engine = Arc::new(
        ScriptedCaptureEngine::succeeding().with_delay(Duration::from_millis(30)),
    );

    let handle = {
        let worker = worker(&fixture, engine, Duration::from_secs(5));
        let run_id = fixture.run.id;
        let items = fixture.items.clone();
        tokio::spawn(async move { worker.run(run_id, items).await })
    };

    // When: 运行期间反复观测
    loop {
        let run = fixture
            .run_repo
            .find_by_id(fixture.run.id)
            .await
            .unwrap()
            .unwrap();

        // Then: 计数不变式始终成立
        assert!(run.completed_count + run.failed_count <= run.total_pages);
        assert!(run.pending_count() >= 0);

        if run.is_terminal() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    handle.await.unwrap();

    let run = fixture
        .run_repo
        .find_by_id(fixture.run.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(run.completed_count + run.failed_count, run.total_pages);
}
