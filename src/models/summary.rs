//! Library summary counters

use serde::{Deserialize, Serialize};

/// Aggregate counters served by `GET /summary`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub books: i64,
    pub people: i64,
    pub active_loans: i64,
    pub overdue_loans: i64,
}
