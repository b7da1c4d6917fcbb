//! Request DTOs for the Web API.

use serde::Deserialize;
use validator::Validate;

use crate::account::RoleTag;
use crate::letter::{LetterForm, LetterType};

/// Account registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Organization mail address.
    #[validate(email(message = "A valid mail address is required"))]
    pub address: String,
    /// Password.
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
    /// Role tags.
    #[serde(default)]
    pub roles: Vec<RoleTag>,
    /// Department.
    #[serde(default)]
    pub department: Option<String>,
    /// Section including year.
    #[serde(default)]
    pub section: Option<String>,
    /// Hostel affiliation.
    #[serde(default)]
    pub hostel: Option<String>,
    /// Roll number.
    #[serde(default)]
    pub roll_number: Option<String>,
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Mail address.
    pub address: String,
    /// Password.
    pub password: String,
}

/// Profile update request. Absent fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New role tags.
    #[serde(default)]
    pub roles: Option<Vec<RoleTag>>,
    /// New department.
    #[serde(default)]
    pub department: Option<String>,
    /// New section.
    #[serde(default)]
    pub section: Option<String>,
    /// New hostel affiliation.
    #[serde(default)]
    pub hostel: Option<String>,
    /// New roll number.
    #[serde(default)]
    pub roll_number: Option<String>,
}

/// Letter creation request.
#[derive(Debug, Deserialize)]
pub struct CreateLetterRequest {
    /// Display name of the letter.
    pub name: String,
    /// Letter type.
    pub letter_type: LetterType,
    /// Per-type form data.
    #[serde(default)]
    pub form: LetterForm,
}

/// Letter signing request.
#[derive(Debug, Deserialize)]
pub struct SignLetterRequest {
    /// Rendered signature image.
    pub image: String,
}

/// Query parameters for the account listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListAccountsQuery {
    /// Role tag to exclude from the listing.
    #[serde(default)]
    pub exclude_role: Option<String>,
}
