//! Data models for the Armarium client

pub mod book;
pub mod identity;
pub mod loan;
pub mod person;
pub mod summary;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use book::{Book, BookRef, CreateBook, UpdateBook};
pub use identity::{Identity, Role, TokenClaims};
pub use loan::{ExtendLoan, IssueLoan, Loan, LoanStatus};
pub use person::{Person, PersonRef, UpdatePerson};
pub use summary::Summary;

/// Paged list envelope used by every listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}
