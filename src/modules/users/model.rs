//! User data models.
//!
//! A user carries exactly one [`Role`], fixed when the account is registered.
//! Role changes are an administrative operation (the CLI `promote` command),
//! never a general field update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Closed role enumeration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
}

impl Role {
    pub fn is_student(self) -> bool {
        matches!(self, Role::Student)
    }

    pub fn is_teacher(self) -> bool {
        matches!(self, Role::Teacher)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// A user in the system. The password hash never leaves the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_predicates_are_exclusive() {
        assert!(Role::Student.is_student());
        assert!(!Role::Student.is_teacher());
        assert!(Role::Teacher.is_teacher());
        assert!(!Role::Teacher.is_student());
    }

    #[test]
    fn test_role_round_trips_through_str() {
        assert_eq!(Role::from_str("student").unwrap(), Role::Student);
        assert_eq!(Role::from_str("teacher").unwrap(), Role::Teacher);
        assert_eq!(Role::from_str(Role::Teacher.as_str()).unwrap(), Role::Teacher);
        assert!(Role::from_str("admin").is_err());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Student).unwrap(), r#""student""#);
        assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), r#""teacher""#);
    }
}
