//! Book (catalog) model and related types

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Full book record from the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub publisher: Option<String>,
    pub release_year: Option<i32>,
    /// Copies owned by the library
    pub copies: Option<i32>,
    /// Copies currently on the shelf
    pub available: Option<i32>,
}

/// Short book reference embedded in loans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRef {
    pub id: i32,
    pub title: String,
    pub author: Option<String>,
}

/// Book query parameters
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BookQuery {
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Create book request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub publisher: Option<String>,
    pub release_year: Option<i32>,
    pub copies: Option<i32>,
}

/// Update book request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub publisher: Option<String>,
    pub release_year: Option<i32>,
    pub copies: Option<i32>,
}
