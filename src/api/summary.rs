//! Library summary endpoint

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::Summary;

#[derive(Clone)]
pub struct SummaryApi {
    client: ApiClient,
}

impl SummaryApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> ApiResult<Summary> {
        self.client.get("/summary").await
    }
}
