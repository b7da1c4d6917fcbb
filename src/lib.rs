//! Letterdesk - campus letter request, signing, and delivery service.
//!
//! Members of a campus organization request formal letters, an authorized
//! signatory attaches a digital signature, and the rendered document is
//! delivered as a PDF attachment through an internal message record.

pub mod account;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod letter;
pub mod logging;
pub mod message;
pub mod web;

pub use account::{
    Account, AccountRepository, AccountService, AccountUpdate, Directory, NewAccount,
    RegistrationRequest, RoleTag,
};
pub use auth::{hash_password, validate_password, verify_password, PasswordError};
pub use config::Config;
pub use db::Database;
pub use error::{LetterdeskError, Result};
pub use letter::{
    Letter, LetterForm, LetterRepository, LetterService, LetterType, NewLetter, SignPolicy,
    SignatureBinder, SignatureData, StaffSignPolicy,
};
pub use message::{
    AttachmentUpload, DeliveryService, EncodedAttachment, Message, MessageRepository, NewMessage,
    SendMessageRequest, MAX_ATTACHMENT_BYTES, MESSAGE_LIST_LIMIT,
};
