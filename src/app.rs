/*
 * Responsibility
 * - Config loading → dependency construction → Router assembly
 * - Middleware (HTTP tracing/timeout, CORS)
 * - axum::serve()
 */
use std::{panic, process, sync::Arc, time::Duration};

use anyhow::Result;
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::v1::handlers::{cnpj::lookup_cnpj, health::health};
use crate::services::{lookup::LookupService, registry::ReceitaWsClient};
use crate::{api, config::Config, middleware, state::AppState};

// Headroom the global request timeout leaves above the upstream deadline.
const REQUEST_TIMEOUT_SLACK: Duration = Duration::from_secs(5);

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,cnpj_proxy=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the whole process so it gets noticed.
        // Production: default behavior, the server keeps running.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        upstream = %config.upstream_base_url,
        timeout_ms = config.upstream_timeout.as_millis() as u64,
        "starting cnpj proxy in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_state(config: &Config) -> Result<AppState> {
    let registry = ReceitaWsClient::new(config.upstream_base_url.clone(), config.upstream_timeout)?;
    let lookup = LookupService::new(Arc::new(registry), config.upstream_timeout);

    Ok(AppState::new(Arc::new(lookup)))
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/", get(lookup_cnpj))
        .route("/health", get(health))
        .nest("/api/v1", api::v1::routes())
        .with_state(state);

    let router = middleware::http::apply(router, config.upstream_timeout + REQUEST_TIMEOUT_SLACK);
    // CORS last: outermost, so every response above gets the headers.
    middleware::cors::apply(router)
}
