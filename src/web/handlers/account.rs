//! Account handlers for the Web API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::str::FromStr;
use std::sync::Arc;

use crate::account::{AccountService, AccountUpdate, Directory, RoleTag};
use crate::web::dto::{AccountResponse, ApiResponse, ListAccountsQuery, UpdateAccountRequest};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// GET /api/accounts - List accounts, optionally excluding a role tag.
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    Query(query): Query<ListAccountsQuery>,
) -> Result<Json<ApiResponse<Vec<AccountResponse>>>, ApiError> {
    let exclude_role = query
        .exclude_role
        .as_deref()
        .map(RoleTag::from_str)
        .transpose()
        .map_err(ApiError::bad_request)?;

    let accounts = Directory::new(state.db.pool()).list(exclude_role).await?;

    Ok(Json(ApiResponse::new(
        accounts.into_iter().map(AccountResponse::from).collect(),
    )))
}

/// GET /api/accounts/:id - Get an account by ID.
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    Path(account_id): Path<i64>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let account = Directory::new(state.db.pool()).find_by_id(account_id).await?;

    Ok(Json(ApiResponse::new(AccountResponse::from(account))))
}

/// GET /api/accounts/by-address/:address - Get an account by mail address.
pub async fn get_account_by_address(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    Path(address): Path<String>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let account = Directory::new(state.db.pool())
        .find_by_address(&address)
        .await?;

    Ok(Json(ApiResponse::new(AccountResponse::from(account))))
}

/// PUT /api/accounts/:id - Update the authenticated account's profile.
pub async fn update_account(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(account_id): Path<i64>,
    Json(req): Json<UpdateAccountRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    if claims.sub != account_id {
        return Err(ApiError::forbidden("Accounts can only update themselves"));
    }

    let mut update = AccountUpdate::new();
    if let Some(name) = req.name {
        update = update.name(name);
    }
    if let Some(roles) = req.roles {
        update = update.roles(roles);
    }
    if let Some(department) = req.department {
        update = update.department(Some(department));
    }
    if let Some(section) = req.section {
        update = update.section(Some(section));
    }
    if let Some(hostel) = req.hostel {
        update = update.hostel(Some(hostel));
    }
    if let Some(roll_number) = req.roll_number {
        update = update.roll_number(Some(roll_number));
    }

    let account = AccountService::new(state.db.pool())
        .update_profile(account_id, &update)
        .await?;

    Ok(Json(ApiResponse::new(AccountResponse::from(account))))
}
