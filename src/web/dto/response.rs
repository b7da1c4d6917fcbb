//! Response DTOs for the Web API.

use serde::Serialize;

use crate::account::Account;
use crate::letter::{Letter, LetterForm, SignatureData};
use crate::message::Message;

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Account information in responses. Never carries the password hash.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Mail address.
    pub address: String,
    /// Role tags.
    pub roles: Vec<String>,
    /// Department.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Section including year.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Hostel affiliation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostel: Option<String>,
    /// Roll number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_number: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            address: account.address,
            roles: account.roles.iter().map(|r| r.as_str().to_string()).collect(),
            department: account.department,
            section: account.section,
            hostel: account.hostel,
            roll_number: account.roll_number,
            created_at: account.created_at,
        }
    }
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Access token (JWT).
    pub access_token: String,
    /// Access token expiry in seconds.
    pub expires_in: u64,
    /// Account information.
    pub account: AccountResponse,
}

/// Signature metadata in responses.
#[derive(Debug, Serialize)]
pub struct SignatureResponse {
    /// Rendered signature image.
    pub image: String,
    /// Signer display name snapshot.
    pub signed_by: String,
    /// Signer account ID.
    pub signed_by_id: i64,
    /// Signing timestamp.
    pub signed_at: String,
}

impl From<SignatureData> for SignatureResponse {
    fn from(signature: SignatureData) -> Self {
        Self {
            image: signature.image,
            signed_by: signature.signed_by,
            signed_by_id: signature.signed_by_id,
            signed_at: signature.signed_at,
        }
    }
}

/// Letter response.
#[derive(Debug, Serialize)]
pub struct LetterResponse {
    /// Letter ID.
    pub id: i64,
    /// Owning account ID.
    pub owner_id: i64,
    /// Display name of the letter.
    pub name: String,
    /// Letter type.
    pub letter_type: String,
    /// Per-type form data.
    pub form: LetterForm,
    /// Signature metadata, present once signed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<SignatureResponse>,
    /// Creation timestamp.
    pub created_at: String,
}

impl From<Letter> for LetterResponse {
    fn from(letter: Letter) -> Self {
        Self {
            id: letter.id,
            owner_id: letter.owner_id,
            name: letter.name,
            letter_type: letter.letter_type.as_str().to_string(),
            form: letter.form,
            signature: letter.signature.map(SignatureResponse::from),
            created_at: letter.created_at,
        }
    }
}

/// Attachment in message responses.
#[derive(Debug, Serialize)]
pub struct AttachmentResponse {
    /// Original filename.
    pub filename: String,
    /// Base64-encoded content.
    pub content: String,
}

/// Message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Message ID.
    pub id: i64,
    /// Initiating account ID.
    pub account_id: i64,
    /// Sender address string.
    pub sender: String,
    /// Recipient address string.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Body text.
    pub body: String,
    /// Send timestamp.
    pub sent_at: String,
    /// Opaque attestation: digital signature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digital_signature: Option<String>,
    /// Opaque attestation: public key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    /// Attachment, when one was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<AttachmentResponse>,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            account_id: message.account_id,
            sender: message.sender,
            recipient: message.recipient,
            subject: message.subject,
            body: message.body,
            sent_at: message.sent_at.to_rfc3339(),
            digital_signature: message.digital_signature,
            public_key: message.public_key,
            attachment: message.attachment.map(|a| AttachmentResponse {
                filename: a.filename,
                content: a.content,
            }),
        }
    }
}
