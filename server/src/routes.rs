use std::sync::Arc;

use axum::{
    Form, Json,
    extract::State,
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect},
};
use registry::{Prize, Records, Role, authenticate, draw_for, register_participant, register_user};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    error::AppError,
    session::{cleared_cookie, require_admin, require_staff, session_cookie, session_token},
    state::AppState,
};

#[derive(Deserialize)]
pub struct CpfForm {
    #[serde(default)]
    cpf: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Deserialize)]
pub struct UserForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    role: String,
}

#[derive(Serialize)]
pub struct DrawView {
    prize: String,
    drawn_at: String,
    repeat: bool,
}

#[derive(Serialize)]
pub struct DrawResponse {
    success: bool,
    result: DrawView,
}

#[derive(Serialize)]
pub struct StaffResponse {
    success: bool,
    username: String,
    role: Role,
}

#[derive(Serialize)]
pub struct MessageResponse {
    success: bool,
    message: &'static str,
}

impl MessageResponse {
    fn ok(message: &'static str) -> Json<Self> {
        Json(Self {
            success: true,
            message,
        })
    }
}

pub async fn home_handler() -> Redirect {
    Redirect::to("/draw")
}

pub async fn prizes_handler(State(state): State<Arc<AppState>>) -> Json<Records<Prize>> {
    Json(state.store.prizes())
}

pub async fn draw_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CpfForm>,
) -> Result<Json<DrawResponse>, AppError> {
    let _guard = state.write_lock.lock().await;

    let outcome = draw_for(
        &state.store,
        &form.cpf,
        &mut rand::thread_rng(),
        &state.config.default_prize,
    )?;

    Ok(Json(DrawResponse {
        success: true,
        result: DrawView {
            prize: outcome.record.prize,
            drawn_at: outcome.record.drawn_at,
            repeat: outcome.repeat,
        },
    }))
}

pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, AppError> {
    let role = authenticate(&state.store, &form.username, &form.password)
        .inspect_err(|_| warn!("Failed login for {:?}", form.username))?;

    let token = state.sessions.create(&form.username, role);
    info!("{} logged in as {role}", form.username);

    Ok((
        [(SET_COOKIE, session_cookie(&token, state.sessions.ttl()))],
        Json(StaffResponse {
            success: true,
            username: form.username,
            role,
        }),
    ))
}

pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(token) = session_token(&headers) {
        state.sessions.remove(token);
    }

    (
        [(SET_COOKIE, cleared_cookie())],
        MessageResponse::ok("Logged out."),
    )
}

pub async fn panel_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<StaffResponse>, AppError> {
    let session = require_staff(&state, &headers)?;

    Ok(Json(StaffResponse {
        success: true,
        username: session.username,
        role: session.role,
    }))
}

pub async fn register_participant_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<CpfForm>,
) -> Result<impl IntoResponse, AppError> {
    let session = require_staff(&state, &headers)?;

    let _guard = state.write_lock.lock().await;
    register_participant(&state.store, &form.cpf, &session.username)?;

    Ok((
        StatusCode::CREATED,
        MessageResponse::ok("CPF authorized for the draw."),
    ))
}

pub async fn register_user_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<UserForm>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers)?;

    let _guard = state.write_lock.lock().await;
    register_user(&state.store, &form.username, &form.password, &form.role)?;

    Ok((
        StatusCode::CREATED,
        MessageResponse::ok("User registered."),
    ))
}
