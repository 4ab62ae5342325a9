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

use axum::Extension;
use shotrs::config::settings::Settings;
use shotrs::engines::http_engine::HttpCaptureEngine;
use shotrs::engines::traits::CaptureEngine;
use shotrs::infrastructure::database::connection;
use shotrs::infrastructure::repositories::capture_result_repo_impl::CaptureResultRepositoryImpl;
use shotrs::infrastructure::repositories::run_repo_impl::RunRepositoryImpl;
use shotrs::presentation::routes;
use shotrs::utils::telemetry;
use shotrs::workers::manager::RunManager;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use migration::{Migrator, MigratorTrait};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting shotrs...");

    // Initialize Prometheus Metrics
    shotrs::infrastructure::metrics::init_metrics();

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Connect to database
    let db = connection::create_pool(&settings.database).await?;
    let db = Arc::new(db);
    info!("Database connection established");

    // Run database migrations
    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Initialize Components
    let run_repo = Arc::new(RunRepositoryImpl::new(db.clone()));
    let result_repo = Arc::new(CaptureResultRepositoryImpl::new(db.clone()));

    // Initialize Capture Engine
    let engine: Arc<dyn CaptureEngine> =
        Arc::new(HttpCaptureEngine::new(settings.capture.endpoint.clone()));
    info!("Capture engine initialized: {}", engine.name());

    // 5. Initialize Run Manager
    let manager = Arc::new(RunManager::new(
        run_repo.clone(),
        result_repo.clone(),
        engine,
        settings.concurrency.max_in_flight,
        Duration::from_secs(settings.capture.item_timeout_secs),
        settings.capture.tenant_id.clone(),
    ));

    // 6. Start HTTP server
    let app = routes::routes::<RunRepositoryImpl, CaptureResultRepositoryImpl>()
        .layer(Extension(run_repo))
        .layer(Extension(result_repo))
        .layer(Extension(manager))
        .layer(Extension(settings.clone()))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
