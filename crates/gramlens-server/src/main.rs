mod api;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use gramlens_browser::BrowserlessDriver;
use gramlens_collector::{CollectorTuning, StaticRoster};
use gramlens_core::UuidIdGenerator;
use gramlens_pipeline::Pipeline;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, default_rate_limit_state, AppState};
use crate::middleware::AuthState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = gramlens_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::info!(config = ?config, "starting gramlens server");

    let roster = gramlens_core::load_roster(&config.competitors_path)?;

    let navigation_timeout = Duration::from_secs(config.navigation_timeout_secs);
    let scroll_step_delay = Duration::from_millis(config.scroll_step_delay_ms);
    // one service call renders navigation plus the replayed scroll walk
    let request_timeout =
        navigation_timeout + scroll_step_delay * config.scroll_steps + Duration::from_secs(20);
    let driver = BrowserlessDriver::new(
        &config.browserless_url,
        config.browserless_token.as_deref(),
        request_timeout,
    )?;

    let tuning = CollectorTuning {
        navigation_timeout,
        scroll_steps: config.scroll_steps,
        scroll_step_delay,
        ..CollectorTuning::default()
    };

    let pipeline = Pipeline::new(
        Arc::new(driver),
        Arc::new(UuidIdGenerator),
        Arc::new(StaticRoster::new(roster)),
        tuning,
    );

    let auth = AuthState::from_env(matches!(
        config.env,
        gramlens_core::Environment::Development
    ))?;
    let app = build_app(
        AppState {
            pipeline: Arc::new(pipeline),
        },
        auth,
        default_rate_limit_state(),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
