//! Typed client for the Armarium REST API
//!
//! One HTTP core shared by per-concern endpoint groups. Every
//! authenticated request carries the session's bearer token; any
//! unauthorized response invalidates the session before the error is
//! surfaced, so all callers observe the logout uniformly.

pub mod auth;
pub mod books;
pub mod loans;
pub mod people;
pub mod sequence;
pub mod summary;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult, ErrorEnvelope};
use crate::session::Session;

/// Shared HTTP core. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    /// Normalized server root including the `/api/v1` base path
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// The session handle doubles as the unauthorized-response sink; it is
    /// injected here once, at construction, instead of living in a mutable
    /// module-level slot.
    pub fn new(config: &ApiConfig, session: Session) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        let base_url = format!("{}/api/v1", config.base_url.trim_end_matches('/'));
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(&self, request: RequestBuilder) -> ApiResult<Response> {
        let request = match self.session.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let envelope = response.json::<ErrorEnvelope>().await.ok();
        if status == StatusCode::UNAUTHORIZED {
            // Server-side session invalidation comes first; the error is
            // surfaced afterwards. Idempotent under concurrent 401s.
            self.session.invalidate();
        }
        Err(ApiError::from_response(status, envelope))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.execute(self.http.get(self.url(path))).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self
            .execute(self.http.get(self.url(path)).query(query))
            .await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(self.http.post(self.url(path)).json(body))
            .await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post_discard<B>(&self, path: &str, body: &B) -> ApiResult<()>
    where
        B: Serialize + ?Sized,
    {
        self.execute(self.http.post(self.url(path)).json(body))
            .await?;
        Ok(())
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(self.http.put(self.url(path)).json(body))
            .await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn patch<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(self.http.patch(self.url(path)).json(body))
            .await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn patch_no_body<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.execute(self.http.patch(self.url(path))).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        self.execute(self.http.delete(self.url(path))).await?;
        Ok(())
    }
}

/// Container for all endpoint groups
#[derive(Clone)]
pub struct LibraryApi {
    pub auth: auth::AuthApi,
    pub books: books::BooksApi,
    pub loans: loans::LoansApi,
    pub people: people::PeopleApi,
    pub summary: summary::SummaryApi,
}

impl LibraryApi {
    pub fn new(client: ApiClient) -> Self {
        Self {
            auth: auth::AuthApi::new(client.clone()),
            books: books::BooksApi::new(client.clone()),
            loans: loans::LoansApi::new(client.clone()),
            people: people::PeopleApi::new(client.clone()),
            summary: summary::SummaryApi::new(client),
        }
    }
}
