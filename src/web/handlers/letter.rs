//! Letter handlers for the Web API.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::letter::{LetterService, SignatureBinder};
use crate::web::dto::{ApiResponse, CreateLetterRequest, LetterResponse, SignLetterRequest};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// POST /api/letters - Create a letter request for the authenticated account.
pub async fn create_letter(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(req): Json<CreateLetterRequest>,
) -> Result<Json<ApiResponse<LetterResponse>>, ApiError> {
    let letter = LetterService::new(state.db.pool())
        .create(claims.sub, &req.name, req.letter_type, req.form)
        .await?;

    Ok(Json(ApiResponse::new(LetterResponse::from(letter))))
}

/// GET /api/letters - List the authenticated account's letters.
pub async fn list_letters(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<Vec<LetterResponse>>>, ApiError> {
    let letters = LetterService::new(state.db.pool())
        .list_by_owner(claims.sub)
        .await?;

    Ok(Json(ApiResponse::new(
        letters.into_iter().map(LetterResponse::from).collect(),
    )))
}

/// GET /api/letters/:id - Get a letter for export/download.
///
/// Accepts the token as a query parameter as well, because downloads open
/// outside the API client.
pub async fn get_letter(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    Path(letter_id): Path<i64>,
) -> Result<Json<ApiResponse<LetterResponse>>, ApiError> {
    let letter = LetterService::new(state.db.pool()).get_by_id(letter_id).await?;

    Ok(Json(ApiResponse::new(LetterResponse::from(letter))))
}

/// POST /api/letters/:id/sign - Sign a letter as the authenticated account.
pub async fn sign_letter(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(letter_id): Path<i64>,
    Json(req): Json<SignLetterRequest>,
) -> Result<Json<ApiResponse<LetterResponse>>, ApiError> {
    let binder = SignatureBinder::new(state.db.pool(), state.sign_policy.as_ref());
    let letter = binder.sign(letter_id, claims.sub, &req.image).await?;

    Ok(Json(ApiResponse::new(LetterResponse::from(letter))))
}
