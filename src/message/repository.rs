//! Message repository for Letterdesk.
//!
//! Messages are created once with a server-assigned timestamp and never
//! updated. The feed query spans two identity spaces in one statement:
//! a message belongs in an account's combined listing either because that
//! account initiated it, or because the free-form recipient string matches
//! the account's own address.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::attachment::EncodedAttachment;
use super::types::{Message, NewMessage, MESSAGE_LIST_LIMIT};
use crate::{LetterdeskError, Result};

/// Repository for message operations.
pub struct MessageRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MessageRepository<'a> {
    /// Create a new MessageRepository with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a message.
    ///
    /// The send timestamp is assigned here, never taken from the caller.
    pub async fn create(&self, message: &NewMessage) -> Result<Message> {
        let sent_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let (attachment_content, attachment_name) = match &message.attachment {
            Some(a) => (Some(a.content.clone()), Some(a.filename.clone())),
            None => (None, None),
        };

        let result = sqlx::query(
            "INSERT INTO messages (account_id, sender, recipient, subject, body, sent_at,
                                   digital_signature, public_key, attachment_content, attachment_name)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(message.account_id)
        .bind(&message.sender)
        .bind(&message.recipient)
        .bind(&message.subject)
        .bind(&message.body)
        .bind(&sent_at)
        .bind(&message.digital_signature)
        .bind(&message.public_key)
        .bind(attachment_content)
        .bind(attachment_name)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| LetterdeskError::NotFound("message".to_string()))
    }

    /// Get a message by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Message>> {
        let row = sqlx::query(
            "SELECT id, account_id, sender, recipient, subject, body, sent_at,
                    digital_signature, public_key, attachment_content, attachment_name
             FROM messages WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| Self::map_row(&r)).transpose()
    }

    /// List the combined inbox and outbox for an account.
    ///
    /// One query across both key spaces: messages the account initiated OR
    /// messages whose recipient string equals the account's own address.
    /// Most recent first, capped at [`MESSAGE_LIST_LIMIT`].
    pub async fn list_for_account(&self, account_id: i64, address: &str) -> Result<Vec<Message>> {
        let rows = sqlx::query(
            "SELECT id, account_id, sender, recipient, subject, body, sent_at,
                    digital_signature, public_key, attachment_content, attachment_name
             FROM messages
             WHERE account_id = ? OR recipient = ?
             ORDER BY sent_at DESC, id DESC
             LIMIT ?",
        )
        .bind(account_id)
        .bind(address)
        .bind(MESSAGE_LIST_LIMIT as i64)
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    /// Count all messages.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Map a database row to a Message.
    fn map_row(row: &SqliteRow) -> Result<Message> {
        let sent_at_str: String = row.try_get("sent_at")?;
        let sent_at = DateTime::parse_from_rfc3339(&sent_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| LetterdeskError::Database(format!("invalid sent_at column: {e}")))?;

        let attachment_content: Option<String> = row.try_get("attachment_content")?;
        let attachment_name: Option<String> = row.try_get("attachment_name")?;
        let attachment = match (attachment_content, attachment_name) {
            (Some(content), Some(filename)) => Some(EncodedAttachment { content, filename }),
            _ => None,
        };

        Ok(Message {
            id: row.try_get("id")?,
            account_id: row.try_get("account_id")?,
            sender: row.try_get("sender")?,
            recipient: row.try_get("recipient")?,
            subject: row.try_get("subject")?,
            body: row.try_get("body")?,
            sent_at,
            digital_signature: row.try_get("digital_signature")?,
            public_key: row.try_get("public_key")?,
            attachment,
        })
    }
}
