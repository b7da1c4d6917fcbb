//! Letter service for Letterdesk.
//!
//! Creation with per-type validation, owner listing, and export lookup.

use sqlx::SqlitePool;

use crate::account::Directory;
use crate::{LetterdeskError, Result};

use super::repository::LetterRepository;
use super::types::{Letter, LetterForm, LetterType, NewLetter};

/// Service for letter operations.
pub struct LetterService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> LetterService<'a> {
    /// Create a new LetterService with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a letter request.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when the owner does not resolve through the
    /// Directory, the name is empty, or required per-type form fields are
    /// missing.
    pub async fn create(
        &self,
        owner_id: i64,
        name: &str,
        letter_type: LetterType,
        form: LetterForm,
    ) -> Result<Letter> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LetterdeskError::Validation(
                "letter name is required".to_string(),
            ));
        }

        let directory = Directory::new(self.pool);
        if directory.find_by_id(owner_id).await.is_err() {
            return Err(LetterdeskError::Validation(format!(
                "owner account {owner_id} does not exist"
            )));
        }

        let missing = form.missing_fields(letter_type);
        if !missing.is_empty() {
            return Err(LetterdeskError::Validation(format!(
                "missing required fields for {letter_type} letter: {}",
                missing.join(", ")
            )));
        }

        LetterRepository::new(self.pool)
            .create(&NewLetter::new(owner_id, name, letter_type, form))
            .await
    }

    /// List letters owned by an account, in insertion order.
    pub async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Letter>> {
        LetterRepository::new(self.pool).list_by_owner(owner_id).await
    }

    /// Get a letter by ID, e.g. for export/download.
    pub async fn get_by_id(&self, id: i64) -> Result<Letter> {
        LetterRepository::new(self.pool)
            .get_by_id(id)
            .await?
            .ok_or_else(|| LetterdeskError::NotFound("letter".to_string()))
    }
}
