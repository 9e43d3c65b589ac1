mod api;
mod middleware;

use std::sync::Arc;

use prospector_synth::Synthesizer;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = prospector_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool = prospector_db::connect_pool_from_config(&config).await?;
    let applied = prospector_db::run_migrations(&pool).await?;
    tracing::info!(applied, "database migrations complete");

    let catalog = Arc::new(prospector_core::load_catalog(&config.companies_path)?);
    tracing::info!(
        companies = catalog.companies.len(),
        path = %config.companies_path.display(),
        "loaded company catalog"
    );

    let synth = Arc::new(Synthesizer::from_app_config(
        &config,
        Some(Arc::clone(&catalog)),
    )?);
    if config.claude_api_key.is_none() {
        tracing::warn!("CLAUDE_API_KEY not set; analyses will return degraded results");
    }
    if config.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set; batch email generation will fail");
    }

    let auth = AuthState::from_env(matches!(
        config.env,
        prospector_core::Environment::Development
    ))?;
    let app = build_app(
        AppState {
            pool,
            synth,
            catalog,
        },
        auth,
        default_rate_limit_state(),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "prospector server listening");
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
