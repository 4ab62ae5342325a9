// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::integration::helpers::memory_repos::{
    MemoryCaptureResultRepository, MemoryRunRepository,
};
use crate::integration::helpers::mock_engine::ScriptedCaptureEngine;
use crate::integration::helpers::wait_until_terminal;
use shotrs::application::dto::run_request::StartRunRequestDto;
use shotrs::application::use_cases::run_use_case::{RunUseCase, RunUseCaseError};
use shotrs::domain::catalog::DEFAULT_PAGES;
use shotrs::domain::models::run::{Run, RunStatus};
use shotrs::domain::models::viewport::Viewport;
use shotrs::domain::repositories::capture_result_repository::CaptureResultRepository;
use shotrs::domain::repositories::run_repository::RunRepository;
use shotrs::engines::traits::CaptureEngine;
use shotrs::workers::manager::RunManager;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

struct Fixture {
    run_repo: Arc<MemoryRunRepository>,
    result_repo: Arc<MemoryCaptureResultRepository>,
    use_case: RunUseCase<MemoryRunRepository, MemoryCaptureResultRepository>,
}

fn fixture(engine: ScriptedCaptureEngine) -> Fixture {
    let result_repo = Arc::new(MemoryCaptureResultRepository::new());
    let run_repo = Arc::new(MemoryRunRepository::new(result_repo.clone()));
    let manager = Arc::new(RunManager::new(
        run_repo.clone(),
        result_repo.clone(),
        Arc::new(engine) as Arc<dyn CaptureEngine>,
        4,
        Duration::from_secs(5),
        "1".to_string(),
    ));
    let use_case = RunUseCase::new(
        run_repo.clone(),
        result_repo.clone(),
        manager,
        "1".to_string(),
    );

    Fixture {
        run_repo,
        result_repo,
        use_case,
    }
}

fn request(viewports: Vec<Viewport>, extra_pages: &str) -> StartRunRequestDto {
    StartRunRequestDto {
        base_url: "https://praxis.example.com".to_string(),
        viewports,
        extra_pages: extra_pages.to_string(),
    }
}

#[tokio::test]
async fn test_start_rejects_empty_viewport_set_without_creating_a_run() {
    let fixture = fixture(ScriptedCaptureEngine::succeeding());

    // When: 空视口集合
    let err = fixture
        .use_case
        .start_run(request(vec![], ""))
        .await
        .expect_err("start should fail");

    // Then: 校验错误，且没有任何运行被创建
    assert!(matches!(err, RunUseCaseError::ValidationError(_)));
    assert!(fixture.run_repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_start_rejects_malformed_base_url() {
    let fixture = fixture(ScriptedCaptureEngine::succeeding());

    for base_url in ["", "not a url", "ftp://example.com"] {
        let dto = StartRunRequestDto {
            base_url: base_url.to_string(),
            viewports: vec![Viewport::Desktop],
            extra_pages: String::new(),
        };
        let err = fixture
            .use_case
            .start_run(dto)
            .await
            .expect_err("start should fail");
        assert!(matches!(err, RunUseCaseError::ValidationError(_)));
    }

    assert!(fixture.run_repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_start_creates_run_with_pending_results_and_completes() {
    let fixture = fixture(ScriptedCaptureEngine::succeeding());

    // When: 启动单视口、无附加页面的运行
    let summary = fixture
        .use_case
        .start_run(request(vec![Viewport::Desktop], ""))
        .await
        .expect("start should succeed");

    // Then: 总数等于目录页数，结果齐备
    assert_eq!(summary.total_pages as usize, DEFAULT_PAGES.len());
    let results = fixture
        .result_repo
        .find_by_run_id(summary.id)
        .await
        .unwrap();
    assert_eq!(results.len(), DEFAULT_PAGES.len());

    // 最终自然完成
    let run = wait_until_terminal(&fixture.run_repo, summary.id, Duration::from_secs(10)).await;
    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(run.completed_count as usize, DEFAULT_PAGES.len());
    assert_eq!(run.failed_count, 0);

    let detail = fixture.use_case.get_run(summary.id).await.unwrap();
    assert_eq!(detail.run.progress_percent, 100.0);
    assert_eq!(detail.results.len(), DEFAULT_PAGES.len());
}

#[tokio::test]
async fn test_get_run_unknown_id_is_not_found() {
    let fixture = fixture(ScriptedCaptureEngine::succeeding());

    let err = fixture
        .use_case
        .get_run(Uuid::new_v4())
        .await
        .expect_err("get should fail");
    assert!(matches!(err, RunUseCaseError::NotFound));
}

#[tokio::test]
async fn test_stop_unknown_run_is_not_found() {
    let fixture = fixture(ScriptedCaptureEngine::succeeding());

    let err = fixture
        .use_case
        .stop_run(Uuid::new_v4())
        .await
        .expect_err("stop should fail");
    assert!(matches!(err, RunUseCaseError::NotFound));
}

#[tokio::test]
async fn test_stop_orphaned_running_row_marks_it_cancelled() {
    // Given: 存储中有Running行但登记表中没有对应运行
    let fixture = fixture(ScriptedCaptureEngine::succeeding());
    let orphan = Run::new(
        "https://praxis.example.com".to_string(),
        vec![Viewport::Desktop],
        3,
    );
    fixture.run_repo.create(&orphan).await.unwrap();

    // When: 请求停止
    let summary = fixture
        .use_case
        .stop_run(orphan.id)
        .await
        .expect("stop should succeed");

    // Then: 直接写入Cancelled
    assert_eq!(summary.status, RunStatus::Cancelled);
}

#[tokio::test]
async fn test_stop_terminal_run_is_idempotent() {
    let fixture = fixture(ScriptedCaptureEngine::succeeding());
    let summary = fixture
        .use_case
        .start_run(request(vec![Viewport::Desktop], ""))
        .await
        .unwrap();
    wait_until_terminal(&fixture.run_repo, summary.id, Duration::from_secs(10)).await;

    let stopped = fixture
        .use_case
        .stop_run(summary.id)
        .await
        .expect("stop should succeed");
    assert_eq!(stopped.status, RunStatus::Completed);
}

#[tokio::test]
async fn test_delete_run_cascades_to_results() {
    let fixture = fixture(ScriptedCaptureEngine::succeeding());
    let summary = fixture
        .use_case
        .start_run(request(vec![Viewport::Desktop], ""))
        .await
        .unwrap();
    wait_until_terminal(&fixture.run_repo, summary.id, Duration::from_secs(10)).await;

    // When: 删除运行
    fixture
        .use_case
        .delete_run(summary.id)
        .await
        .expect("delete should succeed");

    // Then: 运行与结果一并消失
    let err = fixture
        .use_case
        .get_run(summary.id)
        .await
        .expect_err("get should fail");
    assert!(matches!(err, RunUseCaseError::NotFound));
    assert!(fixture.use_case.list_runs().await.unwrap().is_empty());
    assert!(fixture
        .result_repo
        .find_by_run_id(summary.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_delete_unknown_run_is_not_found() {
    let fixture = fixture(ScriptedCaptureEngine::succeeding());

    let err = fixture
        .use_case
        .delete_run(Uuid::new_v4())
        .await
        .expect_err("delete should fail");
    assert!(matches!(err, RunUseCaseError::NotFound));
}

#[tokio::test]
async fn test_delete_active_run_is_rejected() {
    // Given: 慢速引擎保证运行仍在途
    let fixture = fixture(
        ScriptedCaptureEngine::succeeding().with_delay(Duration::from_millis(100)),
    );
    let summary = fixture
        .use_case
        .start_run(request(vec![Viewport::Desktop], ""))
        .await
        .unwrap();

    // When: 运行仍在途时尝试删除
    let err = fixture
        .use_case
        .delete_run(summary.id)
        .await
        .expect_err("delete should fail");

    // Then: 要求先停止
    assert!(matches!(err, RunUseCaseError::ValidationError(_)));

    // 清理：停止并等待退场，避免后台任务悬挂
    fixture.use_case.stop_run(summary.id).await.unwrap();
    wait_until_terminal(&fixture.run_repo, summary.id, Duration::from_secs(10)).await;
}
