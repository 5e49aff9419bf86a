//! Authentication endpoints

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::ApiClient;
use crate::error::ApiResult;

/// Login request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Login response carrying the opaque bearer token
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Account creation request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a bearer token
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        self.client.post("/auth/login", request).await
    }

    /// Create a reader account
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<()> {
        self.client.post_discard("/auth/register", request).await
    }

    /// Create a librarian account (admin-gated server-side)
    pub async fn register_librarian(&self, request: &RegisterRequest) -> ApiResult<()> {
        self.client
            .post_discard("/auth/register/librarian", request)
            .await
    }
}
