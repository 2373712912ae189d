//! Modification catalog HTTP handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::application::booking::BookingService;
use crate::interfaces::http::common::{reject, ApiResponse};

use super::dto::*;

/// Application state for catalog handlers.
#[derive(Clone)]
pub struct CatalogAppState {
    pub booking: Arc<BookingService>,
}

type HandlerResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

#[utoipa::path(
    get,
    path = "/api/modifications",
    tag = "Catalog",
    responses(
        (status = 200, description = "Modification catalog, ordered by name", body = ApiResponse<Vec<ModificationItemDto>>)
    )
)]
pub async fn list_modifications(
    State(state): State<CatalogAppState>,
) -> HandlerResult<Vec<ModificationItemDto>> {
    let items = state
        .booking
        .modification_catalog()
        .await
        .map_err(reject)?;
    Ok(Json(ApiResponse::success(
        items.into_iter().map(Into::into).collect(),
    )))
}
