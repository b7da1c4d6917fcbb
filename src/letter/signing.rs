//! Signature binding for Letterdesk.
//!
//! Attaches a signer's identity, rendered signature image, and timestamp to
//! an unsigned letter. Which roles may sign which letter types is not core
//! policy: the binder calls a pluggable [`SignPolicy`] predicate and fails
//! when it refuses.

use chrono::{SecondsFormat, Utc};
use sqlx::SqlitePool;

use crate::account::{Directory, RoleTag};
use crate::{LetterdeskError, Result};

use super::repository::LetterRepository;
use super::types::{Letter, LetterType, SignatureData};

/// Authorization predicate deciding which role sets may sign which letter
/// types.
pub trait SignPolicy {
    /// Whether an account holding `roles` may sign a letter of `letter_type`.
    fn can_sign(&self, roles: &[RoleTag], letter_type: LetterType) -> bool;
}

impl<F> SignPolicy for F
where
    F: Fn(&[RoleTag], LetterType) -> bool,
{
    fn can_sign(&self, roles: &[RoleTag], letter_type: LetterType) -> bool {
        self(roles, letter_type)
    }
}

/// Default signing policy.
///
/// Staff advisors, heads of department, and the principal sign any letter
/// type; sub-wardens sign leave letters (hostel scope); students sign
/// nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaffSignPolicy;

impl SignPolicy for StaffSignPolicy {
    fn can_sign(&self, roles: &[RoleTag], letter_type: LetterType) -> bool {
        if roles.iter().any(|r| {
            matches!(r, RoleTag::StaffAdvisor | RoleTag::Hod | RoleTag::Principal)
        }) {
            return true;
        }

        matches!(letter_type, LetterType::Leave) && roles.contains(&RoleTag::SubWarden)
    }
}

/// Binds signatures to letters.
pub struct SignatureBinder<'a> {
    pool: &'a SqlitePool,
    policy: &'a (dyn SignPolicy + Send + Sync),
}

impl<'a> SignatureBinder<'a> {
    /// Create a new SignatureBinder with the given pool and policy.
    pub fn new(pool: &'a SqlitePool, policy: &'a (dyn SignPolicy + Send + Sync)) -> Self {
        Self { pool, policy }
    }

    /// Sign a letter.
    ///
    /// Stamps the signer's id, a display-name snapshot, the signature image,
    /// and the current timestamp. The letter is immutable afterwards; its
    /// form data is never touched.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the letter or the signer does not exist
    /// - `AlreadySigned` when the letter carries a signature, regardless of
    ///   who signed it
    /// - `Permission` when the policy refuses the signer's roles for this
    ///   letter type
    /// - `Validation` when the signature image is empty
    pub async fn sign(&self, letter_id: i64, signer_id: i64, image: &str) -> Result<Letter> {
        if image.trim().is_empty() {
            return Err(LetterdeskError::Validation(
                "signature image is required".to_string(),
            ));
        }

        let repo = LetterRepository::new(self.pool);
        let letter = repo
            .get_by_id(letter_id)
            .await?
            .ok_or_else(|| LetterdeskError::NotFound("letter".to_string()))?;

        if letter.is_signed() {
            return Err(LetterdeskError::AlreadySigned(letter_id));
        }

        let signer = Directory::new(self.pool).find_by_id(signer_id).await?;

        if !self.policy.can_sign(&signer.roles, letter.letter_type) {
            return Err(LetterdeskError::Permission(format!(
                "account {} may not sign {} letters",
                signer.id, letter.letter_type
            )));
        }

        let signature = SignatureData {
            image: image.to_string(),
            signed_by: signer.name.clone(),
            signed_by_id: signer.id,
            signed_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        };

        // The guarded update loses when someone signed in between
        if !repo.set_signature(letter_id, &signature).await? {
            return Err(LetterdeskError::AlreadySigned(letter_id));
        }

        repo.get_by_id(letter_id)
            .await?
            .ok_or_else(|| LetterdeskError::NotFound("letter".to_string()))
    }
}
