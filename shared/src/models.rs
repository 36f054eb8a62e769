//! Domain models for the job board

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a user account
///
/// Roles are flat: an admin is not implicitly an applicant and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Applicant,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Applicant => "applicant",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    /// Parsing is exact: "Admin" or " admin" are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "applicant" => Ok(UserRole::Applicant),
            "admin" => Ok(UserRole::Admin),
            _ => Err(format!("Unknown user type: {}", s)),
        }
    }
}
