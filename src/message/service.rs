//! Delivery service for Letterdesk.
//!
//! Turns a letter's rendered document (or a plain note) into a delivered
//! message record, and answers the combined inbox/outbox query. Each send
//! walks Validating -> Encoding -> Resolving -> Persisted; any gate failure
//! aborts with nothing persisted.

use sqlx::SqlitePool;

use crate::account::Directory;
use crate::{LetterdeskError, Result};

use super::attachment;
use super::repository::MessageRepository;
use super::types::{Message, NewMessage};

/// An uploaded attachment before encoding.
#[derive(Debug, Clone)]
pub struct AttachmentUpload {
    /// Raw document bytes.
    pub data: Vec<u8>,
    /// Declared content type.
    pub content_type: String,
    /// Original filename.
    pub filename: String,
}

/// Request to send a message.
#[derive(Debug, Clone)]
pub struct SendMessageRequest {
    /// Initiating account ID (sender or a proxy).
    pub account_id: i64,
    /// Sender address string.
    pub sender: String,
    /// Recipient address string. Taken as given; it does not have to
    /// resolve to a known account.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Body text.
    pub body: String,
    /// Optional attachment to encode and embed.
    pub attachment: Option<AttachmentUpload>,
    /// Opaque attestation: digital signature, copied through verbatim.
    pub digital_signature: Option<String>,
    /// Opaque attestation: public key, copied through verbatim.
    pub public_key: Option<String>,
}

impl SendMessageRequest {
    /// Create a request with the required fields.
    pub fn new(
        account_id: i64,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            account_id,
            sender: sender.into(),
            recipient: recipient.into(),
            subject: subject.into(),
            body: body.into(),
            attachment: None,
            digital_signature: None,
            public_key: None,
        }
    }

    /// Set the attachment upload.
    pub fn with_attachment(mut self, upload: AttachmentUpload) -> Self {
        self.attachment = Some(upload);
        self
    }

    /// Set the attestation fields.
    pub fn with_attestation(
        mut self,
        digital_signature: Option<String>,
        public_key: Option<String>,
    ) -> Self {
        self.digital_signature = digital_signature;
        self.public_key = public_key;
        self
    }
}

/// Service for message delivery and retrieval.
pub struct DeliveryService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> DeliveryService<'a> {
    /// Create a new DeliveryService with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Send a message.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when sender, recipient, subject, or body is
    /// empty or the initiating account id is not positive, and the codec's
    /// `InvalidAttachment`/`AttachmentTooLarge` when the attachment is
    /// rejected. No message record exists after any failure.
    pub async fn send(&self, request: &SendMessageRequest) -> Result<Message> {
        // Validating
        for (value, field) in [
            (&request.sender, "sender"),
            (&request.recipient, "recipient"),
            (&request.subject, "subject"),
            (&request.body, "body"),
        ] {
            if value.trim().is_empty() {
                return Err(LetterdeskError::Validation(format!("{field} is required")));
            }
        }
        if request.account_id <= 0 {
            return Err(LetterdeskError::Validation(
                "initiating account id is required".to_string(),
            ));
        }

        // Encoding; a codec rejection aborts the whole send
        let encoded = match &request.attachment {
            Some(upload) => Some(attachment::encode(
                &upload.data,
                &upload.content_type,
                &upload.filename,
            )?),
            None => None,
        };

        // Resolving: the recipient address is taken as given; deliveries to
        // identities outside the directory are supported.

        // Persisted
        let mut new_message = NewMessage::new(
            request.account_id,
            request.sender.clone(),
            request.recipient.clone(),
            request.subject.clone(),
            request.body.clone(),
        )
        .with_attestation(
            request.digital_signature.clone(),
            request.public_key.clone(),
        );
        if let Some(encoded) = encoded {
            new_message = new_message.with_attachment(encoded);
        }

        MessageRepository::new(self.pool).create(&new_message).await
    }

    /// List the combined inbox and outbox for an account, most recent
    /// first, capped.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the account does not resolve; the query
    /// never silently degrades to the initiator-match branch alone.
    pub async fn list_for_account(&self, account_id: i64) -> Result<Vec<Message>> {
        let account = Directory::new(self.pool).find_by_id(account_id).await?;

        MessageRepository::new(self.pool)
            .list_for_account(account.id, &account.address)
            .await
    }
}
