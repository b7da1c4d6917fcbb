//! Router configuration for the Web API.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::message::MAX_ATTACHMENT_BYTES;

use super::handlers::{
    create_letter, get_account, get_account_by_address, get_letter, list_accounts, list_letters,
    list_messages, login, me, register, send_message, sign_letter, update_account, AppState,
};
use super::middleware::{create_cors_layer, jwt_auth, JwtState};

/// Request body ceiling. Set above the attachment limit so an oversize
/// upload reaches the codec and gets the codec's own rejection, not a
/// generic transport error.
const BODY_LIMIT_BYTES: usize = MAX_ATTACHMENT_BYTES * 2;

/// Create the main API router.
pub fn create_router(
    app_state: Arc<AppState>,
    jwt_state: Arc<JwtState>,
    cors_origins: &[String],
) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me));

    let account_routes = Router::new()
        .route("/", get(list_accounts))
        .route("/:id", get(get_account).put(update_account))
        .route("/by-address/:address", get(get_account_by_address));

    let letter_routes = Router::new()
        .route("/", post(create_letter).get(list_letters))
        .route("/:id", get(get_letter))
        .route("/:id/sign", post(sign_letter));

    let message_routes = Router::new().route("/", post(send_message).get(list_messages));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/accounts", account_routes)
        .nest("/letters", letter_routes)
        .nest("/messages", message_routes);

    let jwt_state_for_middleware = jwt_state.clone();

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let state = jwt_state_for_middleware.clone();
                    jwt_auth(state, req, next)
                })),
        )
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(app_state)
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
