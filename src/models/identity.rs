//! Identity, roles and token claims

use serde::{Deserialize, Serialize};

/// Account roles, least to most privileged.
///
/// Authorization is membership-based: an operation names the set of roles
/// it admits and the current role is checked by inclusion, never by rank
/// comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Reader,
    Librarian,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Reader => "reader",
            Role::Librarian => "librarian",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    // No lossy fallback here: an unknown role in a token would make every
    // downstream authorization check unsound.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reader" => Ok(Role::Reader),
            "librarian" => Ok(Role::Librarian),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Claims carried by the bearer token issued at login.
///
/// The client decodes these locally (no extra round trip) to learn who is
/// logged in; the server remains the authority, every request still
/// presents the raw token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Standard JWT subject, set to the account email
    pub sub: String,
    pub user_id: i32,
    #[serde(default)]
    pub name: Option<String>,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl TokenClaims {
    /// Identity projected out of the claims; never independently persisted
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.user_id,
            name: self.name.clone(),
            email: self.sub.clone(),
            role: self.role,
        }
    }
}

/// The decoded "who is logged in" record, derived from the bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i32,
    pub name: Option<String>,
    pub email: String,
    pub role: Role,
}

impl Identity {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Reader, Role::Librarian, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!("superuser".parse::<Role>().is_err());
    }
}
