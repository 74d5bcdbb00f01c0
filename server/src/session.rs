//! # Sessions
//!
//! Staff log in once and carry a random token in an `HttpOnly` cookie.
//!
//! - Token: UUID v4, server side only maps it to (username, role, expiry)
//! - Lifetime: `SESSION_TTL_MINUTES`, 30 by default
//! - Table lives in memory, a restart logs everyone out
use std::time::{Duration, Instant};

use axum::http::HeaderMap;
use dashmap::DashMap;
use registry::Role;
use uuid::Uuid;

use crate::{error::AppError, state::AppState, utils::cookie_value};

pub const SESSION_COOKIE: &str = "raffle_session";

#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub role: Role,
    expires_at: Instant,
}

pub struct Sessions {
    table: DashMap<String, Session>,
    ttl: Duration,
}

impl Sessions {
    pub fn new(ttl: Duration) -> Self {
        Self {
            table: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn create(&self, username: &str, role: Role) -> String {
        let token = Uuid::new_v4().to_string();

        self.table.retain(|_, session| session.expires_at > Instant::now());
        self.table.insert(
            token.clone(),
            Session {
                username: username.to_string(),
                role,
                expires_at: Instant::now() + self.ttl,
            },
        );

        token
    }

    pub fn get(&self, token: &str) -> Option<Session> {
        let session = self.table.get(token).map(|s| s.clone())?;

        if session.expires_at <= Instant::now() {
            self.table.remove(token);
            return None;
        }

        Some(session)
    }

    pub fn remove(&self, token: &str) {
        self.table.remove(token);
    }
}

pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    cookie_value(headers, SESSION_COOKIE)
}

pub fn require_staff(state: &AppState, headers: &HeaderMap) -> Result<Session, AppError> {
    session_token(headers)
        .and_then(|token| state.sessions.get(token))
        .ok_or(AppError::Unauthenticated)
}

pub fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<Session, AppError> {
    let session = require_staff(state, headers)?;

    if session.role != Role::Admin {
        return Err(AppError::Forbidden);
    }

    Ok(session)
}

pub fn session_cookie(token: &str, ttl: Duration) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        ttl.as_secs()
    )
}

pub fn cleared_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
