use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::model::{Example, Id, NewAnnotation};
use crate::store::traits::Store;

pub type AppState<S> = Arc<S>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct AnnotationCreatedResponse {
    pub message: String,
    pub id: Id,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

pub async fn list_examples<S: Store>(
    State(store): State<AppState<S>>,
) -> Result<Json<Vec<Example>>, ApiError> {
    match store.list_examples().await {
        Ok(examples) => Ok(Json(examples)),
        Err(e) => {
            log::error!("Error loading examples: {:#}", e);
            Err(ApiError::LoadExamples)
        }
    }
}

pub async fn create_annotation<S: Store>(
    State(store): State<AppState<S>>,
    payload: Result<Json<NewAnnotation>, JsonRejection>,
) -> Result<(StatusCode, Json<AnnotationCreatedResponse>), ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;
    request.validate()?;

    let annotation = request.into_annotation(Utc::now());

    if let Err(e) = store.append_annotation(&annotation).await {
        log::error!("Error saving annotation {}: {:#}", annotation.id, e);
        return Err(ApiError::SaveAnnotation);
    }

    log::info!(
        "Saved annotation for example {} with {} label(s)",
        annotation.id,
        annotation.labels.len()
    );

    Ok((
        StatusCode::CREATED,
        Json(AnnotationCreatedResponse {
            message: "Annotation saved successfully".to_string(),
            id: annotation.id,
        }),
    ))
}

/// Download every recorded annotation as the raw CSV file
pub async fn export_annotations<S: Store>(
    State(store): State<AppState<S>>,
) -> Result<Response, ApiError> {
    match store.export_annotations().await {
        Ok(Some(bytes)) => Ok((
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"annotations.csv\"",
                ),
            ],
            bytes,
        )
            .into_response()),
        Ok(None) => Err(ApiError::NoAnnotations),
        Err(e) => {
            log::error!("Error exporting annotations: {:#}", e);
            Err(ApiError::ExportAnnotations)
        }
    }
}
