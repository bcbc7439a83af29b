//! Domain models for members and their family records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Relationship status of a member. The spouse record's lifecycle is tied to
/// this: a spouse exists only while the status is `Married`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

impl Default for RelationshipStatus {
    fn default() -> Self {
        RelationshipStatus::Single
    }
}

impl RelationshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipStatus::Single => "Single",
            RelationshipStatus::Married => "Married",
            RelationshipStatus::Divorced => "Divorced",
            RelationshipStatus::Widowed => "Widowed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Single" => Some(RelationshipStatus::Single),
            "Married" => Some(RelationshipStatus::Married),
            "Divorced" => Some(RelationshipStatus::Divorced),
            "Widowed" => Some(RelationshipStatus::Widowed),
            _ => None,
        }
    }
}

/// Domain model representing a member of the associate program, with the
/// spouse and children records joined in. Absent dates are `None`; there is
/// no other "missing" representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub full_name: String,
    /// Immutable once set
    pub date_of_birth: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub nationality: Option<String>,
    pub relationship_status: RelationshipStatus,
    pub currently_employed: bool,
    pub completed_tertiary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub spouse: Option<Spouse>,
    /// Kept sorted by `child_order`
    pub children: Vec<Child>,
}

impl Member {
    /// Generate a unique member ID
    pub fn generate_id() -> String {
        format!("member::{}", Uuid::new_v4())
    }
}

/// Spouse record, one-to-one with the owning member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spouse {
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub marriage_anniversary_date: Option<NaiveDate>,
}

/// Child record, one-to-many with the owning member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    /// 1-based position within the member's children list
    pub child_order: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum MemberValidationError {
    #[error("Member name cannot be empty")]
    EmptyName,
    #[error("Member name cannot exceed 100 characters")]
    NameTooLong,
    #[error("Invalid date format. Use YYYY-MM-DD.")]
    InvalidDateFormat,
    #[error("Year must be between 1900 and 2100")]
    YearOutOfRange,
    #[error("Month must be between 1 and 12")]
    MonthOutOfRange,
    #[error("Day must be between 1 and 31")]
    DayOutOfRange,
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("Date of birth is already set and cannot be changed")]
    BirthDateImmutable,
    #[error("Member has no spouse record")]
    NoSpouse,
}
