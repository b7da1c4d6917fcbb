//! Account service for Letterdesk.
//!
//! Registration, credential check, and profile updates over the repository.
//! Passwords are hashed here; nothing below this layer sees plaintext.

use sqlx::SqlitePool;

use super::repository::AccountRepository;
use super::types::{Account, AccountUpdate, NewAccount, RoleTag};
use crate::auth::{hash_password, verify_password};
use crate::{LetterdeskError, Result};

/// Request to register a new account.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// Display name.
    pub name: String,
    /// Organization mail address.
    pub address: String,
    /// Plaintext password (hashed before storage).
    pub password: String,
    /// Role tags.
    pub roles: Vec<RoleTag>,
    /// Department.
    pub department: Option<String>,
    /// Section including year.
    pub section: Option<String>,
    /// Hostel affiliation.
    pub hostel: Option<String>,
    /// Roll number.
    pub roll_number: Option<String>,
}

/// Service for account operations.
pub struct AccountService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AccountService<'a> {
    /// Create a new AccountService with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an empty name, a malformed address, or a
    /// password outside the length bounds, and `Conflict` when the address
    /// is already registered.
    pub async fn register(&self, request: &RegistrationRequest) -> Result<Account> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(LetterdeskError::Validation("name is required".to_string()));
        }

        let address = request.address.trim();
        if address.is_empty() || !address.contains('@') {
            return Err(LetterdeskError::Validation(
                "a valid mail address is required".to_string(),
            ));
        }

        if request.roles.is_empty() {
            return Err(LetterdeskError::Validation(
                "at least one role is required".to_string(),
            ));
        }

        let password = hash_password(&request.password)
            .map_err(|e| LetterdeskError::Validation(e.to_string()))?;

        let mut new_account =
            NewAccount::new(name, address, password).with_roles(request.roles.clone());
        new_account.department = request.department.clone();
        new_account.section = request.section.clone();
        new_account.hostel = request.hostel.clone();
        new_account.roll_number = request.roll_number.clone();

        AccountRepository::new(self.pool).create(&new_account).await
    }

    /// Check credentials and return the account.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown address and `Auth` for a wrong
    /// password.
    pub async fn login(&self, address: &str, password: &str) -> Result<Account> {
        let account = AccountRepository::new(self.pool)
            .get_by_address(address)
            .await?
            .ok_or_else(|| LetterdeskError::NotFound("account".to_string()))?;

        verify_password(password, &account.password)
            .map_err(|_| LetterdeskError::Auth("invalid credentials".to_string()))?;

        Ok(account)
    }

    /// Update profile fields of an account.
    ///
    /// Returns `NotFound` when the account does not exist. Credential
    /// changes do not go through here.
    pub async fn update_profile(&self, id: i64, update: &AccountUpdate) -> Result<Account> {
        AccountRepository::new(self.pool)
            .update(id, update)
            .await?
            .ok_or_else(|| LetterdeskError::NotFound("account".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    fn student_request(address: &str) -> RegistrationRequest {
        RegistrationRequest {
            name: "Ravi".to_string(),
            address: address.to_string(),
            password: "password123".to_string(),
            roles: vec![RoleTag::Student],
            department: Some("CSE".to_string()),
            section: None,
            hostel: None,
            roll_number: Some("20CS117".to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let db = setup_db().await;
        let service = AccountService::new(db.pool());

        let account = service
            .register(&student_request("ravi@campus.example"))
            .await
            .unwrap();

        assert_ne!(account.password, "password123");
        assert!(account.password.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_register_duplicate_address() {
        let db = setup_db().await;
        let service = AccountService::new(db.pool());

        service
            .register(&student_request("ravi@campus.example"))
            .await
            .unwrap();
        let result = service.register(&student_request("ravi@campus.example")).await;

        assert!(matches!(result, Err(LetterdeskError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_bad_input() {
        let db = setup_db().await;
        let service = AccountService::new(db.pool());

        let mut request = student_request("ravi@campus.example");
        request.name = "  ".to_string();
        assert!(matches!(
            service.register(&request).await,
            Err(LetterdeskError::Validation(_))
        ));

        let mut request = student_request("not-an-address");
        request.name = "Ravi".to_string();
        assert!(matches!(
            service.register(&request).await,
            Err(LetterdeskError::Validation(_))
        ));

        let mut request = student_request("ravi@campus.example");
        request.password = "short".to_string();
        assert!(matches!(
            service.register(&request).await,
            Err(LetterdeskError::Validation(_))
        ));

        let mut request = student_request("ravi@campus.example");
        request.roles = vec![];
        assert!(matches!(
            service.register(&request).await,
            Err(LetterdeskError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_login_success() {
        let db = setup_db().await;
        let service = AccountService::new(db.pool());

        service
            .register(&student_request("ravi@campus.example"))
            .await
            .unwrap();

        let account = service
            .login("ravi@campus.example", "password123")
            .await
            .unwrap();
        assert_eq!(account.name, "Ravi");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let db = setup_db().await;
        let service = AccountService::new(db.pool());

        service
            .register(&student_request("ravi@campus.example"))
            .await
            .unwrap();

        let result = service.login("ravi@campus.example", "wrong_password").await;
        assert!(matches!(result, Err(LetterdeskError::Auth(_))));
    }

    #[tokio::test]
    async fn test_login_unknown_address() {
        let db = setup_db().await;
        let service = AccountService::new(db.pool());

        let result = service.login("missing@campus.example", "password123").await;
        assert!(matches!(result, Err(LetterdeskError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_profile() {
        let db = setup_db().await;
        let service = AccountService::new(db.pool());

        let account = service
            .register(&student_request("ravi@campus.example"))
            .await
            .unwrap();

        let updated = service
            .update_profile(
                account.id,
                &AccountUpdate::new().hostel(Some("North Block".to_string())),
            )
            .await
            .unwrap();
        assert_eq!(updated.hostel, Some("North Block".to_string()));

        let result = service.update_profile(999, &AccountUpdate::new().name("X")).await;
        assert!(matches!(result, Err(LetterdeskError::NotFound(_))));
    }
}
