use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dressup_api::background::session_reaper;
use dressup_api::config::ServerConfig;
use dressup_api::notifications::NotificationRouter;
use dressup_api::router::build_app_router;
use dressup_api::sessions::SessionManager;
use dressup_api::state::AppState;
use dressup_api::ws;
use dressup_core::{Catalog, DressUpEngine};
use dressup_events::EventBus;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dressup_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Catalog ---
    let catalog = Catalog::load(&config.catalog_path).expect("Failed to load catalog");
    if let Some(variant) = config.default_variant.as_deref() {
        catalog
            .require_variant(variant)
            .expect("DEFAULT_VARIANT must name a catalog variant");
    }
    tracing::info!(
        path = %config.catalog_path,
        items = catalog.len(),
        variants = catalog.variants().len(),
        "Catalog loaded"
    );
    let engine = Arc::new(DressUpEngine::new(Arc::new(catalog)));

    // --- Sessions ---
    let sessions = Arc::new(SessionManager::new(config.max_sessions));

    // --- WebSocket manager ---
    let ws_manager = Arc::new(ws::WsManager::new());
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager));

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());
    let notification_router = NotificationRouter::new(Arc::clone(&ws_manager));
    let router_handle = tokio::spawn(notification_router.run(event_bus.subscribe()));

    // --- Session reaper ---
    let reaper_cancel = CancellationToken::new();
    let reaper_handle = tokio::spawn(session_reaper::run(
        Arc::clone(&sessions),
        Arc::clone(&ws_manager),
        Duration::from_secs(config.session_idle_timeout_secs),
        Duration::from_secs(config.session_reap_interval_secs),
        reaper_cancel.clone(),
    ));

    tracing::info!("Background services started (heartbeat, notification router, session reaper)");

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        engine,
        sessions,
        ws_manager: Arc::clone(&ws_manager),
        event_bus: Arc::clone(&event_bus),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");
    let shutdown_timeout = Duration::from_secs(config.shutdown_timeout_secs);

    reaper_cancel.cancel();
    let _ = tokio::time::timeout(shutdown_timeout, reaper_handle).await;
    tracing::info!("Session reaper stopped");

    // The router exits once the last bus sender is gone; handlers holding
    // state clones were dropped with the server.
    drop(event_bus);
    let _ = tokio::time::timeout(shutdown_timeout, router_handle).await;
    tracing::info!("Notification router stopped");

    ws_manager.shutdown_all().await;

    heartbeat_handle.abort();
    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
