//! Letter management for Letterdesk.
//!
//! Letter records with per-type form data, creation and export, and the
//! signature binding step.

mod repository;
mod service;
mod signing;
mod types;

pub use repository::LetterRepository;
pub use service::LetterService;
pub use signing::{SignPolicy, SignatureBinder, StaffSignPolicy};
pub use types::{Letter, LetterForm, LetterType, NewLetter, SignatureData};
