//! Letter repository for Letterdesk.
//!
//! Letters persist their form and signature sub-records as embedded JSON
//! columns. Listing by owner keeps insertion order (most recent last).

use std::str::FromStr;

use chrono::{SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::types::{Letter, LetterType, NewLetter, SignatureData};
use crate::{LetterdeskError, Result};

/// Repository for letter operations.
pub struct LetterRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> LetterRepository<'a> {
    /// Create a new LetterRepository with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new letter.
    pub async fn create(&self, letter: &NewLetter) -> Result<Letter> {
        let form_json = serde_json::to_string(&letter.form)
            .map_err(|e| LetterdeskError::Database(e.to_string()))?;
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        let result = sqlx::query(
            "INSERT INTO letters (owner_id, name, letter_type, form_data, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(letter.owner_id)
        .bind(&letter.name)
        .bind(letter.letter_type.as_str())
        .bind(&form_json)
        .bind(&created_at)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| LetterdeskError::NotFound("letter".to_string()))
    }

    /// Get a letter by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Letter>> {
        let row = sqlx::query(
            "SELECT id, owner_id, name, letter_type, form_data, signature_data, created_at
             FROM letters WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| Self::map_row(&r)).transpose()
    }

    /// List letters owned by an account, in insertion order.
    pub async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Letter>> {
        let rows = sqlx::query(
            "SELECT id, owner_id, name, letter_type, form_data, signature_data, created_at
             FROM letters
             WHERE owner_id = ?
             ORDER BY created_at ASC, id ASC",
        )
        .bind(owner_id)
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    /// Attach signature data to an unsigned letter.
    ///
    /// The update is guarded by `signature_data IS NULL`, so a letter can
    /// only ever be signed once; a lost race reports as not updated.
    pub async fn set_signature(&self, id: i64, signature: &SignatureData) -> Result<bool> {
        let signature_json = serde_json::to_string(signature)
            .map_err(|e| LetterdeskError::Database(e.to_string()))?;

        let result = sqlx::query(
            "UPDATE letters SET signature_data = ? WHERE id = ? AND signature_data IS NULL",
        )
        .bind(&signature_json)
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all letters.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM letters")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Map a database row to a Letter.
    fn map_row(row: &SqliteRow) -> Result<Letter> {
        let type_str: String = row.try_get("letter_type")?;
        let letter_type = LetterType::from_str(&type_str)
            .map_err(|e| LetterdeskError::Database(format!("invalid letter_type column: {e}")))?;

        let form_json: String = row.try_get("form_data")?;
        let form = serde_json::from_str(&form_json)
            .map_err(|e| LetterdeskError::Database(format!("invalid form_data column: {e}")))?;

        let signature_json: Option<String> = row.try_get("signature_data")?;
        let signature = signature_json
            .map(|s| {
                serde_json::from_str(&s).map_err(|e| {
                    LetterdeskError::Database(format!("invalid signature_data column: {e}"))
                })
            })
            .transpose()?;

        Ok(Letter {
            id: row.try_get("id")?,
            owner_id: row.try_get("owner_id")?,
            name: row.try_get("name")?,
            letter_type,
            form,
            signature,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AccountRepository, NewAccount};
    use crate::db::Database;
    use crate::letter::types::LetterForm;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    async fn create_owner(db: &Database) -> i64 {
        AccountRepository::new(db.pool())
            .create(&NewAccount::new("Ravi", "ravi@campus.example", "hash"))
            .await
            .unwrap()
            .id
    }

    fn leave_form() -> LetterForm {
        LetterForm {
            start_date: Some("2026-08-10".to_string()),
            end_date: Some("2026-08-12".to_string()),
            reason: Some("family function".to_string()),
            ..LetterForm::default()
        }
    }

    fn sample_signature() -> SignatureData {
        SignatureData {
            image: "data:image/png;base64,iVBORw0KGgo=".to_string(),
            signed_by: "Asha".to_string(),
            signed_by_id: 2,
            signed_at: "2026-08-07T10:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_letter() {
        let db = setup_db().await;
        let owner_id = create_owner(&db).await;
        let repo = LetterRepository::new(db.pool());

        let letter = repo
            .create(&NewLetter::new(
                owner_id,
                "Leave letter",
                LetterType::Leave,
                leave_form(),
            ))
            .await
            .unwrap();

        assert!(letter.id > 0);
        assert_eq!(letter.owner_id, owner_id);
        assert_eq!(letter.letter_type, LetterType::Leave);
        assert_eq!(letter.form, leave_form());
        assert!(letter.signature.is_none());
    }

    #[tokio::test]
    async fn test_create_letter_unknown_owner_rejected() {
        let db = setup_db().await;
        let repo = LetterRepository::new(db.pool());

        // owner_id has a foreign key; an unknown owner fails at the database
        let result = repo
            .create(&NewLetter::new(999, "Letter", LetterType::Bonafide, LetterForm::default()))
            .await;
        assert!(matches!(result, Err(LetterdeskError::Database(_))));
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = setup_db().await;
        let repo = LetterRepository::new(db.pool());
        assert!(repo.get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_owner_insertion_order() {
        let db = setup_db().await;
        let owner_id = create_owner(&db).await;
        let repo = LetterRepository::new(db.pool());

        for name in ["First", "Second", "Third"] {
            repo.create(&NewLetter::new(owner_id, name, LetterType::Leave, leave_form()))
                .await
                .unwrap();
        }

        let letters = repo.list_by_owner(owner_id).await.unwrap();
        assert_eq!(letters.len(), 3);
        // Most recent last
        assert_eq!(letters[0].name, "First");
        assert_eq!(letters[2].name, "Third");
    }

    #[tokio::test]
    async fn test_list_by_owner_only_own_letters() {
        let db = setup_db().await;
        let owner_id = create_owner(&db).await;
        let other_id = AccountRepository::new(db.pool())
            .create(&NewAccount::new("Meena", "meena@campus.example", "hash"))
            .await
            .unwrap()
            .id;
        let repo = LetterRepository::new(db.pool());

        repo.create(&NewLetter::new(owner_id, "Mine", LetterType::Leave, leave_form()))
            .await
            .unwrap();
        repo.create(&NewLetter::new(other_id, "Theirs", LetterType::Leave, leave_form()))
            .await
            .unwrap();

        let letters = repo.list_by_owner(owner_id).await.unwrap();
        assert_eq!(letters.len(), 1);
        assert_eq!(letters[0].name, "Mine");
    }

    #[tokio::test]
    async fn test_set_signature_round_trip() {
        let db = setup_db().await;
        let owner_id = create_owner(&db).await;
        let repo = LetterRepository::new(db.pool());

        let letter = repo
            .create(&NewLetter::new(owner_id, "Leave", LetterType::Leave, leave_form()))
            .await
            .unwrap();

        let updated = repo.set_signature(letter.id, &sample_signature()).await.unwrap();
        assert!(updated);

        let signed = repo.get_by_id(letter.id).await.unwrap().unwrap();
        assert_eq!(signed.signature, Some(sample_signature()));
        // Form data is untouched by signing
        assert_eq!(signed.form, leave_form());
    }

    #[tokio::test]
    async fn test_set_signature_only_once() {
        let db = setup_db().await;
        let owner_id = create_owner(&db).await;
        let repo = LetterRepository::new(db.pool());

        let letter = repo
            .create(&NewLetter::new(owner_id, "Leave", LetterType::Leave, leave_form()))
            .await
            .unwrap();

        assert!(repo.set_signature(letter.id, &sample_signature()).await.unwrap());

        // Second attempt loses against the NULL guard
        let second = SignatureData {
            signed_by: "Someone Else".to_string(),
            ..sample_signature()
        };
        assert!(!repo.set_signature(letter.id, &second).await.unwrap());

        let signed = repo.get_by_id(letter.id).await.unwrap().unwrap();
        assert_eq!(signed.signature.unwrap().signed_by, "Asha");
    }
}
