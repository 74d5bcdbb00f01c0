use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use registry::{RegistryError, StoreError};
use rust_xlsxwriter::XlsxError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Log in to access the panel.")]
    Unauthenticated,

    #[error("Only administrators can access this function.")]
    Forbidden,

    #[error("Failed to build spreadsheet: {0}")]
    Spreadsheet(#[from] XlsxError),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Registry(e.into())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Registry(e) => match e {
                RegistryError::InvalidIdentifier | RegistryError::InvalidUser => {
                    StatusCode::BAD_REQUEST
                }
                RegistryError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                RegistryError::NotEligible => StatusCode::FORBIDDEN,
                RegistryError::DuplicateParticipant
                | RegistryError::DuplicateUser
                | RegistryError::UnreadableRecord => StatusCode::CONFLICT,
                RegistryError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Spreadsheet { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!("{self}");
        }

        let body = ErrorBody {
            success: false,
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
