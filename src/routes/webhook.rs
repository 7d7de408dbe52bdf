use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use subtle::ConstantTimeEq;

use crate::db;
use crate::error::AppError;
use crate::geocode;
use crate::models::submission::DEFAULT_STATUS;
use crate::models::NewSubmission;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub type_of_place: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub retention_days: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
}

/// `POST /webhook`: secret check, validate, best-effort geocode, insert.
/// The body is taken as raw bytes so the secret check runs before any
/// parsing.
pub async fn receive(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    if let Some(secret) = &state.config.webhook_secret {
        let provided = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        let expected = format!("Bearer {secret}");
        if !bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
            return Err(AppError::Unauthorized("Unauthorized".to_string()));
        }
    }

    let payload: WebhookPayload = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))?;

    let name = payload.name.as_deref().unwrap_or("").trim().to_string();
    let address = payload.address.as_deref().unwrap_or("").trim().to_string();
    if name.is_empty() || address.is_empty() {
        return Err(AppError::BadRequest(
            "Missing required fields: name, address".to_string(),
        ));
    }

    let coordinates = match &state.geocoder {
        Some(geocoder) => {
            let full_address = geocode::assemble_address(
                &address,
                payload.city.as_deref(),
                payload.state.as_deref(),
                payload.zip_code.as_deref(),
            );
            match geocoder.lookup(&full_address).await {
                Ok(coords) => coords,
                Err(e) => {
                    // Coordinates can be filled in later; the
                    // submission proceeds without them.
                    tracing::warn!("Geocoding failed: {e}");
                    None
                }
            }
        }
        None => None,
    };

    let status = payload
        .status
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_STATUS.to_string());

    let new = NewSubmission {
        name,
        phone: payload.phone,
        address,
        city: payload.city,
        state: payload.state,
        zip_code: payload.zip_code,
        type_of_place: payload.type_of_place.unwrap_or_default(),
        retention_days: payload.retention_days.unwrap_or_default(),
        status,
        notes: payload.notes,
        latitude: coordinates.map(|c| c.lat),
        longitude: coordinates.map(|c| c.lng),
    };

    let submission = db::submissions::create(&state.pool, &new).await.map_err(|e| {
        tracing::error!("Submission insert failed: {e}");
        AppError::Internal("Failed to store submission".to_string())
    })?;

    tracing::info!(id = %submission.id, "Form submission stored");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Form submission received and stored",
            "id": submission.id,
        })),
    ))
}

/// `GET /webhook`: static liveness indicator.
pub async fn liveness() -> Json<serde_json::Value> {
    Json(json!({ "message": "Webhook endpoint is active" }))
}
