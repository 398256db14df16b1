//! Public API surface for the Rust backend.
//!
//! This file consolidates the domain types shared by the persistence and
//! HTTP layers. All types derive Serialize/Deserialize for JSON
//! serialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Program type identifier (database primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProgramTypeId(pub i64);

/// User identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl ProgramTypeId {
    pub fn new(value: i64) -> Self {
        ProgramTypeId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl UserId {
    pub fn new(value: i64) -> Self {
        UserId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ProgramTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account role stored on each user record.
///
/// Authorization is role-based: mutating program-type endpoints require
/// `Admin`. The role is always read from storage, never from the token.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Admin,
    Mentor,
    Student,
}

impl AccountType {
    pub fn is_admin(&self) -> bool {
        matches!(self, AccountType::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Admin => "admin",
            AccountType::Mentor => "mentor",
            AccountType::Student => "student",
        }
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(AccountType::Admin),
            "mentor" => Ok(AccountType::Mentor),
            "student" => Ok(AccountType::Student),
            other => Err(format!("Unknown account type: {}", other)),
        }
    }
}

/// An account in the surrounding scheduling application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub account_type: AccountType,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a user (provisioning and tests).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub account_type: AccountType,
}

/// A program type record: course/program metadata plus scheduling limits.
///
/// The `type` wire name is a Rust keyword, hence the serde rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramType {
    pub id: ProgramTypeId,
    /// Course this program type is attached to, if any.
    pub course_id: Option<i64>,
    #[serde(rename = "type")]
    pub type_name: String,
    pub description: Option<String>,
    /// Appointment duration in minutes.
    pub duration: Option<i32>,
    pub physical_location: Option<String>,
    pub virtual_link: Option<String>,
    pub auto_approve_appointments: Option<bool>,
    pub max_daily_meetings: Option<i32>,
    pub max_weekly_meetings: Option<i32>,
    pub max_monthly_meetings: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a program type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProgramType {
    #[serde(rename = "type")]
    pub type_name: String,
    pub description: Option<String>,
    pub duration: Option<i32>,
}

/// Partial update of a program type. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgramTypeChanges {
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
}

impl ProgramTypeChanges {
    pub fn is_empty(&self) -> bool {
        self.type_name.is_none() && self.description.is_none() && self.duration.is_none()
    }
}

/// Full detail set written by the bulk set-details operation.
///
/// Unlike [`ProgramTypeChanges`], every field is written: `None` clears the
/// stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgramDetails {
    pub course_id: Option<i64>,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub physical_location: Option<String>,
    pub virtual_link: Option<String>,
    pub auto_approve_appointments: Option<bool>,
    pub max_daily_meetings: Option<i32>,
    pub max_weekly_meetings: Option<i32>,
    pub max_monthly_meetings: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_type_id_value() {
        let id = ProgramTypeId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(format!("{}", id), "42");
    }

    #[test]
    fn test_account_type_roundtrip() {
        for (s, variant) in [
            ("admin", AccountType::Admin),
            ("mentor", AccountType::Mentor),
            ("student", AccountType::Student),
        ] {
            assert_eq!(s.parse::<AccountType>().unwrap(), variant);
            assert_eq!(variant.as_str(), s);
        }
        assert!("superuser".parse::<AccountType>().is_err());
    }

    #[test]
    fn test_only_admin_is_admin() {
        assert!(AccountType::Admin.is_admin());
        assert!(!AccountType::Mentor.is_admin());
        assert!(!AccountType::Student.is_admin());
    }

    #[test]
    fn test_program_type_serializes_type_field() {
        let program = ProgramType {
            id: ProgramTypeId::new(1),
            course_id: None,
            type_name: "Office Hours".to_string(),
            description: None,
            duration: Some(30),
            physical_location: None,
            virtual_link: None,
            auto_approve_appointments: None,
            max_daily_meetings: None,
            max_weekly_meetings: None,
            max_monthly_meetings: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&program).unwrap();
        assert_eq!(json["type"], "Office Hours");
        assert!(json.get("type_name").is_none());
    }

    #[test]
    fn test_changes_is_empty() {
        assert!(ProgramTypeChanges::default().is_empty());
        let changes = ProgramTypeChanges {
            duration: Some(60),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}
