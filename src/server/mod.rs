// (C) Coralbits SL 2025
// This file is part of Pagelayout and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

pub mod api;
pub mod types;


use std::sync::Arc;

use anyhow::Result;
use poem::{listener::TcpListener, middleware::Tracing, EndpointExt, Route, Server};
use poem_openapi::OpenApiService;
use tracing::info;

pub use api::Api;

use crate::updater::PageLayoutUpdater;

pub fn app(updater: Arc<PageLayoutUpdater>) -> impl poem::Endpoint {
    let api_service =
        OpenApiService::new(Api::new(updater), "Page Layout", "0.1.0").server("/api/v1");
    let docs = api_service.swagger_ui();
    Route::new()
        .nest("/api/v1", api_service)
        .nest("/docs", docs)
        .with(Tracing)
}

pub async fn start(listen: &str, updater: Arc<PageLayoutUpdater>) -> Result<()> {
    info!("Listening at http://{}", listen);
    let listener = TcpListener::bind(listen);
    Server::new(listener)
        .run_with_graceful_shutdown(
            app(updater),
            async {
                let _ = tokio::signal::ctrl_c().await;
                info!("Shutdown signal received, stopping server...");
            },
            None,
        )
        .await?;
    Ok(())
}
