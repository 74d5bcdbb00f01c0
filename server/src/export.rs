use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, response::Response};
use registry::DrawRecord;
use rust_xlsxwriter::{Workbook, XlsxError};
use tracing::{info, warn};

use crate::{
    error::AppError,
    session::{require_admin, require_staff},
    state::AppState,
    utils::{JSON_CONTENT, XLSX_CONTENT, attachment},
};

pub const DRAW_COLUMNS: [&str; 4] = ["cpf", "premio", "data_sorteio", "atendente_cadastro"];

pub async fn draws_json_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = require_staff(&state, &headers)?;

    // typed rows keep unknown fields, unreadable rows go out verbatim
    let draws = state.store.draws();
    let body = serde_json::to_vec_pretty(&draws).map_err(registry::StoreError::from)?;

    info!(
        "{} exported {} draw records as JSON",
        session.username,
        draws.len() + draws.unreadable().len()
    );

    Ok(attachment(JSON_CONTENT, "sorteios.json", body))
}

pub async fn draws_xlsx_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = require_staff(&state, &headers)?;

    let draws = state.store.draws();
    if !draws.unreadable().is_empty() {
        warn!(
            "{} unreadable draw rows left out of the spreadsheet",
            draws.unreadable().len()
        );
    }
    let body = draws_workbook(&draws)?;

    info!("{} exported {} draw records as Excel", session.username, draws.len());

    Ok(attachment(XLSX_CONTENT, "sorteios_exportados.xlsx", body))
}

pub async fn users_json_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = require_admin(&state, &headers)?;

    let users = state.store.users();
    let body = serde_json::to_vec_pretty(&users).map_err(registry::StoreError::from)?;

    info!(
        "{} exported {} accounts",
        session.username,
        users.len() + users.unreadable().len()
    );

    Ok(attachment(JSON_CONTENT, "usuarios.json", body))
}

/// One sheet, header row then one row per draw.
pub fn draws_workbook(draws: &[DrawRecord]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in DRAW_COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (index, draw) in draws.iter().enumerate() {
        let row = index as u32 + 1;

        worksheet.write_string(row, 0, draw.national_id.as_str())?;
        worksheet.write_string(row, 1, draw.prize.as_str())?;
        worksheet.write_string(row, 2, draw.drawn_at.as_str())?;
        worksheet.write_string(row, 3, draw.registered_by.as_str())?;
    }

    workbook.save_to_buffer()
}
