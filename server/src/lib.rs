//! Documentation of a CPF prize draw for walk-in members.
//!
//!
//!
//! # General Flow
//! - Staff log in and authorize a member's CPF
//! - Member types their CPF on the draw page
//! - Server checks the CPF is authorized, spins once, stores the prize
//! - Typing the same CPF again shows the stored prize, never a new spin
//!
//!
//!
//! # Data
//!
//! Flat JSON files in `DATA_DIR`, see the `registry` crate. The prize catalog
//! `premios.json` is edited by hand; weights are relative, they do not need
//! to add up to anything.
//!
//! Every write inside this process goes through one lock, so two requests
//! cannot overwrite each other's record. Editing the files from elsewhere
//! while the server runs (including the `roster` CLI) is not coordinated.
//!
//!
//!
//! # Routes
//!
//! Public
//! - `GET /draw`: prize catalog for the wheel
//! - `POST /draw`: form `cpf`, returns the prize
//! - `POST /login`, `/logout`
//!
//! Staff session
//! - `GET /panel`
//! - `POST /participants`: form `cpf`
//! - `GET /export/draws.json`, `/export/draws.xlsx`
//!
//! Admin session
//! - `POST /users`: form `username`, `password`, `role`
//! - `GET /export/users.json`
//!
//!
//!
//! # Setup
//!
//! First admin account.
//! ```sh
//! cargo run -p roster -- add-user admin <password> admin
//! ```
//!
//! Start.
//! ```sh
//! RUST_LOG=info cargo run
//! ```
//!
//! Environment
//! - `PORT`: default 8080
//! - `DATA_DIR`: default `atendente`
//! - `SESSION_TTL_MINUTES`: default 30
//! - `DEFAULT_PRIZE`: awarded when the catalog is empty, default `Prêmio Padrão`
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod export;
pub mod routes;
pub mod session;
pub mod state;
pub mod utils;

use config::Config;
use export::{draws_json_handler, draws_xlsx_handler, users_json_handler};
use routes::{
    draw_handler, home_handler, login_handler, logout_handler, panel_handler, prizes_handler,
    register_participant_handler, register_user_handler,
};
use state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(home_handler))
        .route("/draw", get(prizes_handler).post(draw_handler))
        .route("/login", post(login_handler))
        .route("/logout", get(logout_handler).post(logout_handler))
        .route("/panel", get(panel_handler))
        .route("/participants", post(register_participant_handler))
        .route("/users", post(register_user_handler))
        .route("/export/draws.json", get(draws_json_handler))
        .route("/export/draws.xlsx", get(draws_xlsx_handler))
        .route("/export/users.json", get(users_json_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new(Config::load()?);

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
