//! Message delivery for Letterdesk.
//!
//! The attachment codec, the delivery record, and the send/retrieve logic.

pub mod attachment;

mod repository;
mod service;
mod types;

pub use attachment::{EncodedAttachment, MAX_ATTACHMENT_BYTES, PDF_CONTENT_TYPE};
pub use repository::MessageRepository;
pub use service::{AttachmentUpload, DeliveryService, SendMessageRequest};
pub use types::{Message, NewMessage, MESSAGE_LIST_LIMIT};
