use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use casefile::Case;

use crate::pdf::render_pdf;
use crate::routes_cases::{api_error, map_err, ApiError};
use crate::state::SharedState;

async fn load(state: &SharedState, id: &str) -> Result<Case, ApiError> {
    state
        .investigator
        .case(id)
        .await
        .map_err(map_err)?
        .map(|env| env.case)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, forensics::memory::CASE_NOT_FOUND))
}

fn attachment(case: &Case, ext: &str) -> String {
    format!("attachment; filename=\"{}.{ext}\"", case.case_id)
}

pub async fn export_json(State(state): State<SharedState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let case = load(&state, &id).await?;
    let body = serde_json::to_string_pretty(&case).map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, attachment(&case, "json")),
        ],
        body,
    )
        .into_response())
}

pub async fn export_pdf(State(state): State<SharedState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let case = load(&state, &id).await?;
    let report = forensics::write_case_report(&case);

    // blocking render
    let bytes = tokio::task::spawn_blocking(move || render_pdf(&report))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, attachment(&case, "pdf")),
        ],
        bytes,
    )
        .into_response())
}
