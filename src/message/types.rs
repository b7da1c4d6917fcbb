//! Message types for Letterdesk.

use chrono::{DateTime, Utc};

use super::attachment::EncodedAttachment;

/// How many entries a combined inbox/outbox listing returns at most.
pub const MESSAGE_LIST_LIMIT: usize = 10;

/// A delivered message record.
///
/// Created once at send time, immutable, retained indefinitely. The
/// attestation fields are opaque and carried verbatim; no verification
/// happens here.
#[derive(Debug, Clone)]
pub struct Message {
    /// Message ID.
    pub id: i64,
    /// Initiating account (storage owner; sender or a proxy).
    pub account_id: i64,
    /// Sender address string.
    pub sender: String,
    /// Recipient address string (free-form, may be outside the directory).
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Body text.
    pub body: String,
    /// Server-assigned send timestamp.
    pub sent_at: DateTime<Utc>,
    /// Opaque attestation: digital signature.
    pub digital_signature: Option<String>,
    /// Opaque attestation: public key.
    pub public_key: Option<String>,
    /// Encoded attachment, when one was sent.
    pub attachment: Option<EncodedAttachment>,
}

/// New message for creation.
#[derive(Debug, Clone)]
pub struct NewMessage {
    /// Initiating account.
    pub account_id: i64,
    /// Sender address string.
    pub sender: String,
    /// Recipient address string.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Body text.
    pub body: String,
    /// Opaque attestation: digital signature.
    pub digital_signature: Option<String>,
    /// Opaque attestation: public key.
    pub public_key: Option<String>,
    /// Encoded attachment.
    pub attachment: Option<EncodedAttachment>,
}

impl NewMessage {
    /// Create a new message with the required fields.
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
            digital_signature: None,
            public_key: None,
            attachment: None,
        }
    }

    /// Attach attestation fields.
    pub fn with_attestation(
        mut self,
        digital_signature: Option<String>,
        public_key: Option<String>,
    ) -> Self {
        self.digital_signature = digital_signature;
        self.public_key = public_key;
        self
    }

    /// Attach an encoded attachment.
    pub fn with_attachment(mut self, attachment: EncodedAttachment) -> Self {
        self.attachment = Some(attachment);
        self
    }
}
