//! Loan endpoints
//!
//! The server stores only `start_date`, `duration_days` and `return_date`;
//! the displayed status is derived client-side from those fields (see
//! [`crate::models::loan`]). Returning and extending therefore need no
//! status field in any payload.

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::loan::{ExtendLoan, IssueLoan, Loan, LoanQuery};
use crate::models::Page;

#[derive(Clone)]
pub struct LoansApi {
    client: ApiClient,
}

impl LoansApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &LoanQuery) -> ApiResult<Page<Loan>> {
        self.client.get_with_query("/loan", query).await
    }

    /// Issue a loan to a person
    pub async fn issue(&self, request: &IssueLoan) -> ApiResult<Loan> {
        self.client.post("/loan", request).await
    }

    /// Record the return of a loan; the server sets `return_date`
    pub async fn return_loan(&self, id: i32) -> ApiResult<Loan> {
        self.client
            .patch_no_body(&format!("/loan/{}/return", id))
            .await
    }

    /// Extend an open loan's duration. The due date is recomputed from the
    /// updated duration on the next derivation; there is no stored status
    /// to transition.
    pub async fn extend(&self, id: i32, request: &ExtendLoan) -> ApiResult<Loan> {
        self.client
            .patch(&format!("/loan/{}/extend", id), request)
            .await
    }
}
