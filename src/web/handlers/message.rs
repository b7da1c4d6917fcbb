//! Message handlers for the Web API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;

use crate::message::{AttachmentUpload, DeliveryService, SendMessageRequest};
use crate::web::dto::{ApiResponse, MessageResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// POST /api/messages - Send a message with an optional PDF attachment.
///
/// Request body: multipart/form-data with "from", "to", "subject", "body",
/// optional "digital_signature"/"public_key", and an optional "file" part.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let mut from = String::new();
    let mut to = String::new();
    let mut subject = String::new();
    let mut body = String::new();
    let mut digital_signature: Option<String> = None;
    let mut public_key: Option<String> = None;
    let mut attachment: Option<AttachmentUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {}", e);
        ApiError::bad_request("Invalid multipart data")
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("attachment.pdf").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to read attachment content: {}", e);
                        ApiError::bad_request("Failed to read attachment")
                    })?
                    .to_vec();

                attachment = Some(AttachmentUpload {
                    data,
                    content_type,
                    filename,
                });
            }
            "from" | "to" | "subject" | "body" | "digital_signature" | "public_key" => {
                let value = field.text().await.map_err(|e| {
                    tracing::error!("Failed to read field {}: {}", name, e);
                    ApiError::bad_request("Invalid multipart data")
                })?;

                match name.as_str() {
                    "from" => from = value,
                    "to" => to = value,
                    "subject" => subject = value,
                    "body" => body = value,
                    "digital_signature" => digital_signature = Some(value),
                    "public_key" => public_key = Some(value),
                    _ => {}
                }
            }
            _ => {}
        }
    }

    let mut request = SendMessageRequest::new(claims.sub, from, to, subject, body)
        .with_attestation(digital_signature, public_key);
    if let Some(upload) = attachment {
        request = request.with_attachment(upload);
    }

    let message = DeliveryService::new(state.db.pool()).send(&request).await?;

    Ok(Json(ApiResponse::new(MessageResponse::from(message))))
}

/// GET /api/messages - Combined inbox and outbox for the authenticated
/// account, most recent first, capped.
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<Vec<MessageResponse>>>, ApiError> {
    let messages = DeliveryService::new(state.db.pool())
        .list_for_account(claims.sub)
        .await?;

    Ok(Json(ApiResponse::new(
        messages.into_iter().map(MessageResponse::from).collect(),
    )))
}
