//! Person (borrower account) model and related types

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::identity::Role;

/// Full person record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Active loans held by this person
    pub nb_loans: Option<i64>,
    pub nb_overdue_loans: Option<i64>,
}

/// Short person reference embedded in loans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRef {
    pub id: i32,
    pub name: String,
}

/// Person query parameters
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PersonQuery {
    pub name: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Update person request (librarian or admin)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePerson {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub role: Option<Role>,
}
