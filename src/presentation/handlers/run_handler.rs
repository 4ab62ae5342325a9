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

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    application::{
        dto::run_request::StartRunRequestDto,
        use_cases::run_use_case::{RunUseCase, RunUseCaseError},
    },
    config::settings::Settings,
    domain::repositories::{
        capture_result_repository::CaptureResultRepository,
        run_repository::{RepositoryError, RunRepository},
    },
    workers::manager::RunManager,
};

/// 启动新的截图运行
pub async fn start_run<R, C>(
    Extension(run_repo): Extension<Arc<R>>,
    Extension(result_repo): Extension<Arc<C>>,
    Extension(manager): Extension<Arc<RunManager<R, C>>>,
    Extension(settings): Extension<Arc<Settings>>,
    Json(payload): Json<StartRunRequestDto>,
) -> impl IntoResponse
where
    R: RunRepository + 'static,
    C: CaptureResultRepository + 'static,
{
    let use_case = RunUseCase::new(
        run_repo,
        result_repo,
        manager,
        settings.capture.tenant_id.clone(),
    );
    match use_case.start_run(payload).await {
        Ok(run) => (StatusCode::CREATED, Json(run)).into_response(),
        Err(e) => {
            let (status, msg): (StatusCode, String) = e.into();
            (status, Json(json!({ "error": msg }))).into_response()
        }
    }
}

/// 列出所有运行
pub async fn list_runs<R, C>(
    Extension(run_repo): Extension<Arc<R>>,
    Extension(result_repo): Extension<Arc<C>>,
    Extension(manager): Extension<Arc<RunManager<R, C>>>,
    Extension(settings): Extension<Arc<Settings>>,
) -> impl IntoResponse
where
    R: RunRepository + 'static,
    C: CaptureResultRepository + 'static,
{
    let use_case = RunUseCase::new(
        run_repo,
        result_repo,
        manager,
        settings.capture.tenant_id.clone(),
    );
    match use_case.list_runs().await {
        Ok(runs) => (StatusCode::OK, Json(runs)).into_response(),
        Err(e) => {
            let (status, msg): (StatusCode, String) = e.into();
            (status, Json(json!({ "error": msg }))).into_response()
        }
    }
}

/// 获取运行详情及其全部结果
pub async fn get_run<R, C>(
    Extension(run_repo): Extension<Arc<R>>,
    Extension(result_repo): Extension<Arc<C>>,
    Extension(manager): Extension<Arc<RunManager<R, C>>>,
    Extension(settings): Extension<Arc<Settings>>,
    Path(run_id): Path<Uuid>,
) -> impl IntoResponse
where
    R: RunRepository + 'static,
    C: CaptureResultRepository + 'static,
{
    let use_case = RunUseCase::new(
        run_repo,
        result_repo,
        manager,
        settings.capture.tenant_id.clone(),
    );
    match use_case.get_run(run_id).await {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(e) => {
            let (status, msg): (StatusCode, String) = e.into();
            (status, Json(json!({ "error": msg }))).into_response()
        }
    }
}

/// 请求停止进行中的运行
pub async fn stop_run<R, C>(
    Extension(run_repo): Extension<Arc<R>>,
    Extension(result_repo): Extension<Arc<C>>,
    Extension(manager): Extension<Arc<RunManager<R, C>>>,
    Extension(settings): Extension<Arc<Settings>>,
    Path(run_id): Path<Uuid>,
) -> impl IntoResponse
where
    R: RunRepository + 'static,
    C: CaptureResultRepository + 'static,
{
    let use_case = RunUseCase::new(
        run_repo,
        result_repo,
        manager,
        settings.capture.tenant_id.clone(),
    );
    match use_case.stop_run(run_id).await {
        Ok(run) => (StatusCode::ACCEPTED, Json(run)).into_response(),
        Err(e) => {
            let (status, msg): (StatusCode, String) = e.into();
            (status, Json(json!({ "error": msg }))).into_response()
        }
    }
}

/// 删除运行及其全部结果
pub async fn delete_run<R, C>(
    Extension(run_repo): Extension<Arc<R>>,
    Extension(result_repo): Extension<Arc<C>>,
    Extension(manager): Extension<Arc<RunManager<R, C>>>,
    Extension(settings): Extension<Arc<Settings>>,
    Path(run_id): Path<Uuid>,
) -> impl IntoResponse
where
    R: RunRepository + 'static,
    C: CaptureResultRepository + 'static,
{
    let use_case = RunUseCase::new(
        run_repo,
        result_repo,
        manager,
        settings.capture.tenant_id.clone(),
    );
    match use_case.delete_run(run_id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            let (status, msg): (StatusCode, String) = e.into();
            (status, Json(json!({ "error": msg }))).into_response()
        }
    }
}

impl From<RunUseCaseError> for (StatusCode, String) {
    fn from(err: RunUseCaseError) -> Self {
        match err {
            RunUseCaseError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            RunUseCaseError::Repository(RepositoryError::NotFound) => {
                (StatusCode::NOT_FOUND, "Run not found".to_string())
            }
            RunUseCaseError::Repository(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            RunUseCaseError::NotFound => (StatusCode::NOT_FOUND, "Run not found".to_string()),
        }
    }
}
