//! Scoreboard backend entrypoint wiring the controller, persistence, SSE and REST layers.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scoreboard_back::{
    config::AppConfig,
    dao::{
        kv_store::{JsonFileStore, MemoryStore, ScoreboardStore},
        models::SavedSession,
    },
    routes,
    services::{
        buzzer_service::{self, BuzzerSound, LogBuzzer},
        sse_events,
    },
    state::{AppState, ScoreboardController, SharedState},
    timer::TokioClock,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let store = open_store(&config).await?;

    let saved = SavedSession::load(store.as_ref(), config.fresh_session()).await;
    let controller = ScoreboardController::init(
        saved,
        Arc::clone(&store),
        Arc::new(TokioClock::new()),
        config.tick_interval,
    )
    .await;

    let sound: Arc<dyn BuzzerSound> = Arc::new(LogBuzzer);
    let auto_dispatch = config.auto_dispatch_buzzer;
    let app_state = AppState::new(config, controller, store);

    let mut background = vec![tokio::spawn(sse_events::run_publisher(app_state.clone()))];
    if auto_dispatch {
        background.push(tokio::spawn(buzzer_service::run_dispatcher(
            app_state.clone(),
            Arc::clone(&sound),
        )));
    } else {
        info!("automatic buzzer dispatch disabled; clients acknowledge buzzers");
    }

    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state.clone());

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, session_id = %app_state.session_id(), "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    for task in background {
        task.abort();
    }
    app_state.controller().dispose().await;
    sound.release();
    info!("server stopped");

    Ok(())
}

/// Open the configured session store, or an in-memory one when no path is set.
async fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn ScoreboardStore>> {
    match &config.store_path {
        Some(path) => {
            let store = JsonFileStore::open(path)
                .await
                .with_context(|| format!("opening session file `{}`", path.display()))?;
            Ok(Arc::new(store))
        }
        None => {
            info!("no store_path configured; session will not survive restarts");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "cannot install SIGTERM handler; waiting for Ctrl+C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
