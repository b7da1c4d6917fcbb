//! API handlers for the Web surface.

pub mod account;
pub mod auth;
pub mod letter;
pub mod message;

pub use account::*;
pub use auth::*;
pub use letter::*;
pub use message::*;

use std::sync::Arc;

use jsonwebtoken::{encode, EncodingKey, Header};

use crate::db::Database;
use crate::letter::{SignPolicy, StaffSignPolicy};
use crate::web::error::ApiError;
use crate::web::middleware::JwtClaims;
use crate::Account;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: Arc<Database>,
    /// JWT encoding key.
    pub encoding_key: EncodingKey,
    /// Access token expiry in seconds.
    pub access_token_expiry: u64,
    /// Policy deciding which roles may sign which letter types.
    pub sign_policy: Arc<dyn SignPolicy + Send + Sync>,
}

impl AppState {
    /// Create a new application state with the default signing policy.
    pub fn new(db: Arc<Database>, jwt_secret: &str, access_expiry: u64) -> Self {
        Self {
            db,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            access_token_expiry: access_expiry,
            sign_policy: Arc::new(StaffSignPolicy),
        }
    }

    /// Replace the signing policy.
    pub fn with_sign_policy(mut self, policy: Arc<dyn SignPolicy + Send + Sync>) -> Self {
        self.sign_policy = policy;
        self
    }

    /// Generate an access token for an account.
    pub fn generate_access_token(&self, account: &Account) -> Result<String, ApiError> {
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = JwtClaims {
            sub: account.id,
            address: account.address.clone(),
            name: account.name.clone(),
            iat: now,
            exp: now + self.access_token_expiry,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode JWT: {}", e);
            ApiError::internal("Failed to generate token")
        })
    }
}
