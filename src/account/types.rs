//! Account model for Letterdesk.
//!
//! Accounts carry a SET of role tags, not a hierarchy: one account may be
//! both a staff advisor and a sub-warden. Authorization elsewhere is always
//! a predicate over that set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role tag carried by an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleTag {
    /// Student requesting letters.
    Student,
    /// Staff advisor of a class section.
    StaffAdvisor,
    /// Head of department.
    Hod,
    /// Hostel sub-warden.
    SubWarden,
    /// Principal of the institution.
    Principal,
}

impl RoleTag {
    /// Convert the tag to its stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleTag::Student => "student",
            RoleTag::StaffAdvisor => "staff-advisor",
            RoleTag::Hod => "hod",
            RoleTag::SubWarden => "sub-warden",
            RoleTag::Principal => "principal",
        }
    }
}

impl fmt::Display for RoleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RoleTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(RoleTag::Student),
            "staff-advisor" => Ok(RoleTag::StaffAdvisor),
            "hod" => Ok(RoleTag::Hod),
            "sub-warden" => Ok(RoleTag::SubWarden),
            "principal" => Ok(RoleTag::Principal),
            _ => Err(format!("unknown role tag: {s}")),
        }
    }
}

/// Account entity.
#[derive(Debug, Clone)]
pub struct Account {
    /// Unique account ID (opaque, stable).
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Organization mail address (unique secondary key).
    pub address: String,
    /// Password hash (Argon2).
    pub password: String,
    /// Role tags held by this account.
    pub roles: Vec<RoleTag>,
    /// Department (descriptive form-fill data only).
    pub department: Option<String>,
    /// Department section including year.
    pub section: Option<String>,
    /// Hostel affiliation.
    pub hostel: Option<String>,
    /// Roll number (students).
    pub roll_number: Option<String>,
    /// Account creation timestamp.
    pub created_at: String,
}

impl Account {
    /// Check if this account carries the given role tag.
    pub fn has_role(&self, tag: RoleTag) -> bool {
        self.roles.contains(&tag)
    }
}

/// Data for creating a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Display name.
    pub name: String,
    /// Organization mail address.
    pub address: String,
    /// Password hash (pre-hashed with Argon2).
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

impl NewAccount {
    /// Create a new account with the minimal required fields.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            password: password.into(),
            roles: vec![RoleTag::Student],
            department: None,
            section: None,
            hostel: None,
            roll_number: None,
        }
    }

    /// Set the role tags.
    pub fn with_roles(mut self, roles: Vec<RoleTag>) -> Self {
        self.roles = roles;
        self
    }

    /// Set the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Set the section.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Set the hostel affiliation.
    pub fn with_hostel(mut self, hostel: impl Into<String>) -> Self {
        self.hostel = Some(hostel.into());
        self
    }

    /// Set the roll number.
    pub fn with_roll_number(mut self, roll_number: impl Into<String>) -> Self {
        self.roll_number = Some(roll_number.into());
        self
    }
}

/// Data for updating an existing account.
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    /// New password hash (if changing password).
    pub password: Option<String>,
    /// New display name.
    pub name: Option<String>,
    /// New role tags.
    pub roles: Option<Vec<RoleTag>>,
    /// New department.
    pub department: Option<Option<String>>,
    /// New section.
    pub section: Option<Option<String>>,
    /// New hostel affiliation.
    pub hostel: Option<Option<String>>,
    /// New roll number.
    pub roll_number: Option<Option<String>>,
}

impl AccountUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a new password hash.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set a new display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set new role tags.
    pub fn roles(mut self, roles: Vec<RoleTag>) -> Self {
        self.roles = Some(roles);
        self
    }

    /// Set a new department.
    pub fn department(mut self, department: Option<String>) -> Self {
        self.department = Some(department);
        self
    }

    /// Set a new section.
    pub fn section(mut self, section: Option<String>) -> Self {
        self.section = Some(section);
        self
    }

    /// Set a new hostel affiliation.
    pub fn hostel(mut self, hostel: Option<String>) -> Self {
        self.hostel = Some(hostel);
        self
    }

    /// Set a new roll number.
    pub fn roll_number(mut self, roll_number: Option<String>) -> Self {
        self.roll_number = Some(roll_number);
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.password.is_none()
            && self.name.is_none()
            && self.roles.is_none()
            && self.department.is_none()
            && self.section.is_none()
            && self.hostel.is_none()
            && self.roll_number.is_none()
    }
}
