//! Database schema and migrations for Letterdesk.
//!
//! Migrations are applied sequentially when the database is opened; the
//! schema_version table tracks which ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: Accounts table for identity and profile data
    r#"
-- Accounts table for registration, login, and the directory
CREATE TABLE accounts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    address     TEXT NOT NULL UNIQUE,    -- organization mail address
    password    TEXT NOT NULL,           -- Argon2 hash
    roles       TEXT NOT NULL DEFAULT '[]',  -- JSON array of role tags
    department  TEXT,
    section     TEXT,                    -- dept/section incl. year
    hostel      TEXT,
    roll_number TEXT,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_accounts_address ON accounts(address);
"#,
    // v2: Letters table with embedded form and signature sub-records
    r#"
-- Letters table; form_data and signature_data are embedded JSON records
CREATE TABLE letters (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id        INTEGER NOT NULL REFERENCES accounts(id),
    name            TEXT NOT NULL,
    letter_type     TEXT NOT NULL,       -- 'leave', 'bonafide', 'internship', 'industrial-visit'
    form_data       TEXT NOT NULL,       -- JSON
    signature_data  TEXT,                -- JSON, NULL while unsigned
    created_at      TEXT NOT NULL
);

CREATE INDEX idx_letters_owner_id ON letters(owner_id);
CREATE INDEX idx_letters_created_at ON letters(created_at);
"#,
    // v3: Messages table; account_id is intentionally not a foreign key,
    // the delivery record is a detached snapshot
    r#"
CREATE TABLE messages (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    account_id          INTEGER NOT NULL,    -- initiating account
    sender              TEXT NOT NULL,
    recipient           TEXT NOT NULL,       -- free-form address string
    subject             TEXT NOT NULL,
    body                TEXT NOT NULL,
    sent_at             TEXT NOT NULL,       -- server-assigned
    digital_signature   TEXT,
    public_key          TEXT,
    attachment_content  TEXT,                -- base64
    attachment_name     TEXT
);

CREATE INDEX idx_messages_account_id ON messages(account_id);
CREATE INDEX idx_messages_recipient ON messages(recipient);
CREATE INDEX idx_messages_sent_at ON messages(sent_at);
"#,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_not_empty() {
        assert!(!MIGRATIONS.is_empty());
    }

    #[test]
    fn test_first_migration_contains_accounts_table() {
        let first = MIGRATIONS[0];
        assert!(first.contains("CREATE TABLE accounts"));
        assert!(first.contains("address"));
        assert!(first.contains("password"));
        assert!(first.contains("roles"));
    }

    #[test]
    fn test_letters_migration_embeds_sub_records() {
        let letters = MIGRATIONS[1];
        assert!(letters.contains("form_data"));
        assert!(letters.contains("signature_data"));
    }

    #[test]
    fn test_messages_migration_has_attachment_columns() {
        let messages = MIGRATIONS[2];
        assert!(messages.contains("attachment_content"));
        assert!(messages.contains("attachment_name"));
        assert!(messages.contains("sent_at"));
    }
}
