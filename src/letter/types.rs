//! Letter types for Letterdesk.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of formal letter being requested.
///
/// The type decides which form fields are required at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LetterType {
    /// Leave letter with a date range.
    Leave,
    /// Bonafide certificate.
    Bonafide,
    /// Internship permission letter.
    Internship,
    /// Industrial visit permission letter.
    IndustrialVisit,
}

impl LetterType {
    /// Convert the type to its stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            LetterType::Leave => "leave",
            LetterType::Bonafide => "bonafide",
            LetterType::Internship => "internship",
            LetterType::IndustrialVisit => "industrial-visit",
        }
    }
}

impl fmt::Display for LetterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LetterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "leave" => Ok(LetterType::Leave),
            "bonafide" => Ok(LetterType::Bonafide),
            "internship" => Ok(LetterType::Internship),
            "industrial-visit" => Ok(LetterType::IndustrialVisit),
            _ => Err(format!("unknown letter type: {s}")),
        }
    }
}

/// Form data for a letter request.
///
/// The populated subset depends on the letter type; everything is optional
/// at the struct level and the required subset is checked at creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LetterForm {
    /// Intended recipient account, when addressed to a known signatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<i64>,
    /// Leave start date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Leave end date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Reason or purpose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Company name (internship, industrial visit).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// Company location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_location: Option<String>,
    /// College name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub college_name: Option<String>,
    /// College location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub college_location: Option<String>,
    /// Single date (industrial visit).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Number of students covered by the letter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_students: Option<u32>,
    /// Visit location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Free-form edited body text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_content: Option<String>,
}

impl LetterForm {
    /// Names of required fields that are missing for the given letter type.
    pub fn missing_fields(&self, letter_type: LetterType) -> Vec<&'static str> {
        let mut missing = Vec::new();

        let mut require = |present: bool, name: &'static str| {
            if !present {
                missing.push(name);
            }
        };

        match letter_type {
            LetterType::Leave => {
                require(self.start_date.is_some(), "start_date");
                require(self.end_date.is_some(), "end_date");
                require(self.reason.is_some(), "reason");
            }
            LetterType::Bonafide => {
                require(self.reason.is_some(), "reason");
            }
            LetterType::Internship => {
                require(self.company_name.is_some(), "company_name");
                require(self.company_location.is_some(), "company_location");
            }
            LetterType::IndustrialVisit => {
                require(self.company_name.is_some(), "company_name");
                require(self.date.is_some(), "date");
                require(self.number_of_students.is_some(), "number_of_students");
            }
        }

        missing
    }
}

/// Signature metadata embedded in a signed letter.
///
/// Either the whole record is present (signed) or the letter carries none
/// of it; there is no partial signature state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureData {
    /// Rendered signature image (data URL or similar opaque text).
    pub image: String,
    /// Display name snapshot of the signer at signing time.
    pub signed_by: String,
    /// Signer account ID.
    pub signed_by_id: i64,
    /// Signing timestamp.
    pub signed_at: String,
}

/// A letter record.
#[derive(Debug, Clone)]
pub struct Letter {
    /// Letter ID.
    pub id: i64,
    /// Owning (requesting) account ID.
    pub owner_id: i64,
    /// Display name of the letter.
    pub name: String,
    /// Letter type.
    pub letter_type: LetterType,
    /// Per-type form data.
    pub form: LetterForm,
    /// Signature metadata, present once signed.
    pub signature: Option<SignatureData>,
    /// Creation timestamp.
    pub created_at: String,
}

impl Letter {
    /// Check whether the letter has been signed.
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }
}

/// New letter for creation.
#[derive(Debug, Clone)]
pub struct NewLetter {
    /// Owning account ID.
    pub owner_id: i64,
    /// Display name of the letter.
    pub name: String,
    /// Letter type.
    pub letter_type: LetterType,
    /// Per-type form data.
    pub form: LetterForm,
}

impl NewLetter {
    /// Create a new letter request.
    pub fn new(
        owner_id: i64,
        name: impl Into<String>,
        letter_type: LetterType,
        form: LetterForm,
    ) -> Self {
        Self {
            owner_id,
            name: name.into(),
            letter_type,
            form,
        }
    }
}
