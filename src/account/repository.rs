//! Account repository for Letterdesk.
//!
//! CRUD operations for accounts. The role set is stored as a JSON array in
//! a single column; corrupt role data is reported as a database error rather
//! than silently dropped.

use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, SqlitePool};

use super::types::{Account, AccountUpdate, NewAccount, RoleTag};
use crate::{LetterdeskError, Result};

/// Repository for account CRUD operations.
pub struct AccountRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new AccountRepository with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new account.
    ///
    /// Fails with `Conflict` when the address is already registered.
    pub async fn create(&self, new_account: &NewAccount) -> Result<Account> {
        if self.address_exists(&new_account.address).await? {
            return Err(LetterdeskError::Conflict(format!(
                "address {} is already registered",
                new_account.address
            )));
        }

        let roles_json = serde_json::to_string(&new_account.roles)
            .map_err(|e| LetterdeskError::Database(e.to_string()))?;

        let result = sqlx::query(
            "INSERT INTO accounts (name, address, password, roles, department, section, hostel, roll_number)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new_account.name)
        .bind(&new_account.address)
        .bind(&new_account.password)
        .bind(&roles_json)
        .bind(&new_account.department)
        .bind(&new_account.section)
        .bind(&new_account.hostel)
        .bind(&new_account.roll_number)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| LetterdeskError::NotFound("account".to_string()))
    }

    /// Get an account by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Account>> {
        let row = sqlx::query(
            "SELECT id, name, address, password, roles, department, section, hostel, roll_number, created_at
             FROM accounts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| Self::map_row(&r)).transpose()
    }

    /// Get an account by address (case-insensitive).
    pub async fn get_by_address(&self, address: &str) -> Result<Option<Account>> {
        let row = sqlx::query(
            "SELECT id, name, address, password, roles, department, section, hostel, roll_number, created_at
             FROM accounts WHERE address = ? COLLATE NOCASE",
        )
        .bind(address)
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| Self::map_row(&r)).transpose()
    }

    /// Update an account by ID.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated account, or None if not found.
    pub async fn update(&self, id: i64, update: &AccountUpdate) -> Result<Option<Account>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE accounts SET ");
        let mut separated = query.separated(", ");

        if let Some(ref password) = update.password {
            separated.push("password = ");
            separated.push_bind_unseparated(password);
        }
        if let Some(ref name) = update.name {
            separated.push("name = ");
            separated.push_bind_unseparated(name);
        }
        if let Some(ref roles) = update.roles {
            let roles_json = serde_json::to_string(roles)
                .map_err(|e| LetterdeskError::Database(e.to_string()))?;
            separated.push("roles = ");
            separated.push_bind_unseparated(roles_json);
        }
        if let Some(ref department) = update.department {
            separated.push("department = ");
            separated.push_bind_unseparated(department.clone());
        }
        if let Some(ref section) = update.section {
            separated.push("section = ");
            separated.push_bind_unseparated(section.clone());
        }
        if let Some(ref hostel) = update.hostel {
            separated.push("hostel = ");
            separated.push_bind_unseparated(hostel.clone());
        }
        if let Some(ref roll_number) = update.roll_number {
            separated.push("roll_number = ");
            separated.push_bind_unseparated(roll_number.clone());
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query.build().execute(self.pool).await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// List all accounts, ordered by address for stable iteration.
    pub async fn list_all(&self) -> Result<Vec<Account>> {
        let rows = sqlx::query(
            "SELECT id, name, address, password, roles, department, section, hostel, roll_number, created_at
             FROM accounts ORDER BY address",
        )
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    /// Check if an address is already registered (case-insensitive).
    pub async fn address_exists(&self, address: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE address = ? COLLATE NOCASE)",
        )
        .bind(address)
        .fetch_one(self.pool)
        .await?;
        Ok(exists)
    }

    /// Count all accounts.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Map a database row to an Account.
    fn map_row(row: &SqliteRow) -> Result<Account> {
        let roles_json: String = row.try_get("roles")?;
        let roles: Vec<RoleTag> = serde_json::from_str(&roles_json)
            .map_err(|e| LetterdeskError::Database(format!("invalid roles column: {e}")))?;

        Ok(Account {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            address: row.try_get("address")?,
            password: row.try_get("password")?,
            roles,
            department: row.try_get("department")?,
            section: row.try_get("section")?,
            hostel: row.try_get("hostel")?,
            roll_number: row.try_get("roll_number")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
