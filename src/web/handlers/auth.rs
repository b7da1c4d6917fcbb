//! Authentication handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::account::{AccountService, Directory, RegistrationRequest};
use crate::web::dto::{
    AccountResponse, ApiResponse, LoginRequest, LoginResponse, RegisterRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// POST /api/auth/register - Register a new account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let service = AccountService::new(state.db.pool());

    let account = service
        .register(&RegistrationRequest {
            name: req.name,
            address: req.address,
            password: req.password,
            roles: req.roles,
            department: req.department,
            section: req.section,
            hostel: req.hostel,
            roll_number: req.roll_number,
        })
        .await?;

    let access_token = state.generate_access_token(&account)?;

    Ok(Json(ApiResponse::new(LoginResponse {
        access_token,
        expires_in: state.access_token_expiry,
        account: AccountResponse::from(account),
    })))
}

/// POST /api/auth/login - Check credentials and issue a token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    if req.address.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Address and password are required"));
    }

    let account = AccountService::new(state.db.pool())
        .login(&req.address, &req.password)
        .await?;

    let access_token = state.generate_access_token(&account)?;

    Ok(Json(ApiResponse::new(LoginResponse {
        access_token,
        expires_in: state.access_token_expiry,
        account: AccountResponse::from(account),
    })))
}

/// GET /api/auth/me - Current account.
pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let account = Directory::new(state.db.pool()).find_by_id(claims.sub).await?;

    Ok(Json(ApiResponse::new(AccountResponse::from(account))))
}
