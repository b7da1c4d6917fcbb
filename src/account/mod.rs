//! Account management for Letterdesk.
//!
//! Identity records, registration and credential check, and the read-only
//! Directory used by the letter and message pipelines.

mod directory;
mod repository;
mod service;
mod types;

pub use directory::Directory;
pub use repository::AccountRepository;
pub use service::{AccountService, RegistrationRequest};
pub use types::{Account, AccountUpdate, NewAccount, RoleTag};
