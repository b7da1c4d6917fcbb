//! Directory lookups for Letterdesk.
//!
//! Read-only identity resolution over the account store. The rest of the
//! core (letter creation, signing, message retrieval) resolves accounts
//! through here rather than touching the repository directly.

use sqlx::SqlitePool;

use super::repository::AccountRepository;
use super::types::{Account, RoleTag};
use crate::{LetterdeskError, Result};

/// Read-only account lookup service.
pub struct Directory<'a> {
    pool: &'a SqlitePool,
}

impl<'a> Directory<'a> {
    /// Create a new Directory with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Resolve an account by its internal ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Account> {
        AccountRepository::new(self.pool)
            .get_by_id(id)
            .await?
            .ok_or_else(|| LetterdeskError::NotFound("account".to_string()))
    }

    /// Resolve an account by its mail address.
    pub async fn find_by_address(&self, address: &str) -> Result<Account> {
        AccountRepository::new(self.pool)
            .get_by_address(address)
            .await?
            .ok_or_else(|| LetterdeskError::NotFound("account".to_string()))
    }

    /// List accounts, optionally excluding every account that carries the
    /// given role tag.
    ///
    /// Used to build candidate-recipient pools, e.g. "everyone who is not a
    /// student". The listing is unpaginated and ordered by address.
    pub async fn list(&self, exclude_role: Option<RoleTag>) -> Result<Vec<Account>> {
        let accounts = AccountRepository::new(self.pool).list_all().await?;

        Ok(match exclude_role {
            Some(tag) => accounts.into_iter().filter(|a| !a.has_role(tag)).collect(),
            None => accounts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::types::NewAccount;
    use crate::db::Database;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    async fn seed(db: &Database) -> (i64, i64, i64) {
        let repo = AccountRepository::new(db.pool());
        let student = repo
            .create(
                &NewAccount::new("Ravi", "ravi@campus.example", "hash")
                    .with_roles(vec![RoleTag::Student]),
            )
            .await
            .unwrap();
        let advisor = repo
            .create(
                &NewAccount::new("Asha", "asha@campus.example", "hash")
                    .with_roles(vec![RoleTag::StaffAdvisor, RoleTag::SubWarden]),
            )
            .await
            .unwrap();
        let hod = repo
            .create(
                &NewAccount::new("Meena", "meena@campus.example", "hash")
                    .with_roles(vec![RoleTag::Hod]),
            )
            .await
            .unwrap();
        (student.id, advisor.id, hod.id)
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let db = setup_db().await;
        let (student_id, _, _) = seed(&db).await;
        let directory = Directory::new(db.pool());

        let account = directory.find_by_id(student_id).await.unwrap();
        assert_eq!(account.name, "Ravi");

        let result = directory.find_by_id(999).await;
        assert!(matches!(result, Err(LetterdeskError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_find_by_address() {
        let db = setup_db().await;
        seed(&db).await;
        let directory = Directory::new(db.pool());

        let account = directory.find_by_address("asha@campus.example").await.unwrap();
        assert_eq!(account.name, "Asha");

        let result = directory.find_by_address("missing@campus.example").await;
        assert!(matches!(result, Err(LetterdeskError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_without_filter_returns_all() {
        let db = setup_db().await;
        seed(&db).await;
        let directory = Directory::new(db.pool());

        let all = directory.list(None).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_list_excludes_tagged_accounts_and_keeps_the_rest() {
        let db = setup_db().await;
        seed(&db).await;
        let directory = Directory::new(db.pool());

        let non_students = directory.list(Some(RoleTag::Student)).await.unwrap();
        assert_eq!(non_students.len(), 2);
        assert!(non_students.iter().all(|a| !a.has_role(RoleTag::Student)));

        // Exclusion matches any tag in the set, not just the first
        let non_subwardens = directory.list(Some(RoleTag::SubWarden)).await.unwrap();
        assert_eq!(non_subwardens.len(), 2);
        assert!(non_subwardens.iter().all(|a| a.name != "Asha"));
    }
}
