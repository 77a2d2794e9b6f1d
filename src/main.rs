use std::sync::Arc;

use anyhow::Context;
use catalogo_db::Database;
use catalogo_kernel::{settings::Settings, InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load Catálogo settings")?;
    catalogo_telemetry::init(&settings.telemetry).with_context(|| "failed to initialize logging")?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.redacted_target(),
        "catalogo-app bootstrap starting"
    );

    let database = Arc::new(
        Database::connect(&settings.database.connection_url())
            .await
            .with_context(|| "failed to open database session")?,
    );

    let mut registry = ModuleRegistry::new();
    catalogo_app::register_all(&mut registry, database.clone());

    let ctx = InitCtx {
        settings: &settings,
    };
    if let Err(error) = registry.init_modules(&ctx).await {
        database.close().await;
        return Err(error);
    }

    tracing::info!("catalogo-app bootstrap complete");

    let served = catalogo_http::start_server(&registry, &settings, shutdown_signal()).await;

    let stopped = registry.stop_modules().await;
    database.close().await;

    served.and(stopped)
}

/// Resolves on Ctrl-C or, on unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
