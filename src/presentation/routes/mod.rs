// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::capture_result_repository::CaptureResultRepository;
use crate::domain::repositories::run_repository::RunRepository;
use crate::presentation::handlers::run_handler;
use axum::{
    routing::{get, post},
    Router,
};

/// 创建应用路由
///
/// 仓库实现通过Extension注入，路由对其保持泛型
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes<R, C>() -> Router
where
    R: RunRepository + 'static,
    C: CaptureResultRepository + 'static,
{
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let run_routes = Router::new()
        .route(
            "/v1/runs",
            post(run_handler::start_run::<R, C>).get(run_handler::list_runs::<R, C>),
        )
        .route(
            "/v1/runs/{id}",
            get(run_handler::get_run::<R, C>).delete(run_handler::delete_run::<R, C>),
        )
        .route("/v1/runs/{id}/stop", post(run_handler::stop_run::<R, C>));

    Router::new().merge(public_routes).merge(run_routes)
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
