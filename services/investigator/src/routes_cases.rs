use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use bytes::Bytes;
use casefile::CaseEnvelope;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use crate::fallback::is_fallback_summary;
use crate::investigation::{ImageInput, InvestigationError, InvestigationOutcome, InvestigationRequest};
use crate::state::SharedState;

pub type ApiError = (StatusCode, Json<serde_json::Value>);

pub fn api_error(status: StatusCode, msg: impl std::fmt::Display) -> ApiError {
    (status, Json(json!({"error": msg.to_string()})))
}

pub fn map_err(e: InvestigationError) -> ApiError {
    let status = match &e {
        InvestigationError::NotFound(_) => StatusCode::NOT_FOUND,
        InvestigationError::InvalidCaseId(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %e, "request failed");
    }
    api_error(status, e)
}

#[derive(Debug, Serialize)]
pub struct CaseListing {
    pub case_id: String,
    pub primary_weapon: String,
    pub injury: String,
    pub num_evidence: usize,
    pub risk_score: u8,
    pub has_summary: bool,
    pub updated_at: DateTime<Utc>,
}

/// Text fields plus uploaded images from one multipart body.
#[derive(Default)]
struct CaseForm {
    case_id: Option<String>,
    text: Option<String>,
    images: Vec<ImageInput>,
}

async fn read_form(mut mp: Multipart, text_field: &str) -> Result<CaseForm, ApiError> {
    let mut form = CaseForm::default();
    let bad = |e: axum::extract::multipart::MultipartError| api_error(StatusCode::BAD_REQUEST, e);

    while let Some(field) = mp.next_field().await.map_err(bad)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "case_id" => form.case_id = Some(field.text().await.map_err(bad)?),
            "image" | "images" => {
                let file_name = field.file_name().unwrap_or("upload.jpg").to_string();
                let mime = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| guess_mime(&file_name).to_string());
                let bytes: Bytes = field.bytes().await.map_err(bad)?;
                if !bytes.is_empty() {
                    form.images.push(ImageInput { file_name, mime, bytes });
                }
            }
            n if n == text_field => form.text = Some(field.text().await.map_err(bad)?),
            _ => {}
        }
    }
    Ok(form)
}

fn guess_mime(file_name: &str) -> &'static str {
    let lower = file_name.to_lowercase();
    if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".webp") {
        "image/webp"
    } else {
        "image/jpeg"
    }
}

pub async fn health(State(state): State<SharedState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "model_configured": state.investigator.has_provider(),
    }))
}

pub async fn post_case(
    State(state): State<SharedState>,
    mp: Multipart,
) -> Result<(StatusCode, Json<InvestigationOutcome>), ApiError> {
    let form = read_form(mp, "scene_text").await?;
    let scene_text = form.text.unwrap_or_default();
    if scene_text.trim().is_empty() && form.images.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "scene_text or at least one image is required"));
    }

    let outcome = state
        .investigator
        .investigate(InvestigationRequest {
            case_id: form.case_id,
            scene_text,
            images: form.images,
        })
        .await
        .map_err(map_err)?;

    Ok((StatusCode::CREATED, Json(outcome)))
}

pub async fn post_update(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    mp: Multipart,
) -> Result<Json<InvestigationOutcome>, ApiError> {
    let form = read_form(mp, "notes").await?;
    let notes = form.text.unwrap_or_default();

    let outcome = state
        .investigator
        .reanalyze(&id, &notes, form.images)
        .await
        .map_err(map_err)?;
    Ok(Json(outcome))
}

pub async fn list_cases(State(state): State<SharedState>) -> Result<Json<Vec<CaseListing>>, ApiError> {
    let rows = state.investigator.list().await.map_err(map_err)?;

    let listing = rows
        .into_iter()
        .map(|row| {
            let memory = &row.envelope.memory;
            CaseListing {
                case_id: row.envelope.case.case_id.clone(),
                primary_weapon: memory.primary_weapon.clone(),
                injury: memory.injury.clone(),
                num_evidence: row.envelope.case.evidence_items.len(),
                risk_score: memory.risk_score,
                has_summary: !is_fallback_summary(&memory.summary),
                updated_at: row.updated_at,
            }
        })
        .collect();

    Ok(Json(listing))
}

pub async fn get_case(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<CaseEnvelope>, ApiError> {
    state
        .investigator
        .case(&id)
        .await
        .map_err(map_err)?
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, forensics::memory::CASE_NOT_FOUND))
}

pub async fn delete_case(State(state): State<SharedState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    state.investigator.delete(&id).await.map_err(map_err)?;
    Ok(StatusCode::NO_CONTENT)
}
