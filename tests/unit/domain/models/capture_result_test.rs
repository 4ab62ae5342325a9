// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use shotrs::domain::models::capture_result::{CaptureResult, ResultStatus};
use shotrs::domain::models::viewport::Viewport;
use uuid::Uuid;

fn new_result() -> CaptureResult {
    CaptureResult::new(
        Uuid::new_v4(),
        0,
        "/dashboard".to_string(),
        "Dashboard".to_string(),
        Viewport::Desktop,
    )
}

#[test]
fn test_result_lifecycle_happy_path() {
    // Given: 新创建的结果
    let result = new_result();
    assert_eq!(result.status, ResultStatus::Pending);
    assert!(result.captured_at.is_none());

    // When: 正常走完 pending → capturing → completed
    let result = result.begin_capture().expect("begin should succeed");
    assert_eq!(result.status, ResultStatus::Capturing);

    let result = result
        .complete("https://blob.example.com/dashboard.png".to_string())
        .expect("complete should succeed");

    // Then: 终态字段齐备
    assert_eq!(result.status, ResultStatus::Completed);
    assert_eq!(
        result.image_url.as_deref(),
        Some("https://blob.example.com/dashboard.png")
    );
    assert!(result.captured_at.is_some());
    assert!(result.is_terminal());
}

#[test]
fn test_result_failure_records_message() {
    let result = new_result().begin_capture().unwrap();

    let result = result
        .fail("Capture endpoint unreachable: connection refused".to_string())
        .expect("fail should succeed");

    assert_eq!(result.status, ResultStatus::Failed);
    assert!(result.error_message.is_some());
    assert!(result.captured_at.is_some());
    assert!(!result.is_redirect());
}

#[test]
fn test_result_transitions_are_strictly_forward() {
    // 不允许跳过Capturing直接终结
    assert!(new_result().complete("x".to_string()).is_err());
    assert!(new_result().fail("x".to_string()).is_err());

    // 终态不可再转出
    let completed = new_result()
        .begin_capture()
        .unwrap()
        .complete("x".to_string())
        .unwrap();
    assert!(completed.clone().begin_capture().is_err());
    assert!(completed.clone().complete("y".to_string()).is_err());
    assert!(completed.fail("y".to_string()).is_err());

    let failed = new_result()
        .begin_capture()
        .unwrap()
        .fail("x".to_string())
        .unwrap();
    assert!(failed.clone().begin_capture().is_err());
    assert!(failed.complete("y".to_string()).is_err());
}

#[test]
fn test_redirect_prefix_convention() {
    // Given: 以Redirect开头的失败信息
    let redirected = new_result()
        .begin_capture()
        .unwrap()
        .fail("Redirect zu /auth/login erkannt".to_string())
        .unwrap();

    // Then: 识别为重定向类提示
    assert!(redirected.is_redirect());

    let hard_failure = new_result()
        .begin_capture()
        .unwrap()
        .fail("Seite konnte nicht geladen werden (Timeout)".to_string())
        .unwrap();
    assert!(!hard_failure.is_redirect());

    // 无错误信息的结果不算重定向
    assert!(!new_result().is_redirect());
}

#[test]
fn test_result_status_string_round_trip() {
    for status in [
        ResultStatus::Pending,
        ResultStatus::Capturing,
        ResultStatus::Completed,
        ResultStatus::Failed,
    ] {
        let parsed: ResultStatus = status.to_string().parse().unwrap();
        assert_eq!(parsed, status);
    }
    assert!("bogus".parse::<ResultStatus>().is_err());
}
