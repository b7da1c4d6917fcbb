//! Attachment codec for Letterdesk.
//!
//! Converts an uploaded PDF to a transport-safe base64 form and back.
//! Single in-memory buffer semantics; no streaming variant.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::{LetterdeskError, Result};

/// Maximum accepted attachment size in bytes (5 MiB).
pub const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

/// The only accepted attachment content type.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A transport-safe encoded attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedAttachment {
    /// Base64-encoded document bytes.
    pub content: String,
    /// Original filename as uploaded.
    pub filename: String,
}

/// Encode an uploaded document for transport.
///
/// # Errors
///
/// Returns `InvalidAttachment` for any declared content type other than
/// `application/pdf` and `AttachmentTooLarge` for payloads over 5 MiB.
pub fn encode(data: &[u8], content_type: &str, filename: &str) -> Result<EncodedAttachment> {
    if content_type != PDF_CONTENT_TYPE {
        return Err(LetterdeskError::InvalidAttachment(format!(
            "only {PDF_CONTENT_TYPE} is accepted, got {content_type}"
        )));
    }

    if data.len() > MAX_ATTACHMENT_BYTES {
        return Err(LetterdeskError::AttachmentTooLarge {
            size: data.len() as u64,
            limit: MAX_ATTACHMENT_BYTES as u64,
        });
    }

    Ok(EncodedAttachment {
        content: STANDARD.encode(data),
        filename: filename.to_string(),
    })
}

/// Decode an encoded attachment back to its original bytes.
///
/// Exact inverse of [`encode`]: the round-trip reproduces the input.
pub fn decode(attachment: &EncodedAttachment) -> Result<Vec<u8>> {
    STANDARD
        .decode(&attachment.content)
        .map_err(|e| LetterdeskError::InvalidAttachment(format!("undecodable content: {e}")))
}
