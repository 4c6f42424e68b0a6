use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::routes_cases::{api_error, map_err, ApiError};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct AskReq {
    pub question: String,
}

#[derive(Serialize)]
pub struct AskResp {
    pub answer: String,
}

pub async fn ask_case(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(req): Json<AskReq>,
) -> Result<Json<AskResp>, ApiError> {
    if req.question.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "question must not be empty"));
    }

    match state.investigator.ask(&id, &req.question).await.map_err(map_err)? {
        Some(answer) => Ok(Json(AskResp { answer })),
        None => Err(api_error(StatusCode::NOT_FOUND, forensics::memory::CASE_NOT_FOUND)),
    }
}
