//! Armarium Library Management Client
//!
//! A Rust client for the Armarium library management REST API: typed
//! endpoint groups, a token-based session lifecycle with role-gated
//! operations, and derived loan statuses.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod lookup;
pub mod models;
pub mod scan;
pub mod session;

pub use config::AppConfig;
pub use error::{ApiError, ApiResult};

use api::{ApiClient, LibraryApi};
use lookup::CatalogLookup;
use session::{AuthService, FileTokenStore, Session};

/// Application context shared across all commands
#[derive(Clone)]
pub struct App {
    pub config: Arc<AppConfig>,
    pub session: Session,
    pub api: LibraryApi,
    pub auth: AuthService,
    pub lookup: CatalogLookup,
}

impl App {
    /// Wire the client together: restore the session from the persisted
    /// token, then hand the session to the API client so unauthorized
    /// responses invalidate it (constructor injection, no global hook).
    pub fn new(config: AppConfig) -> ApiResult<Self> {
        let store = FileTokenStore::new(&config.auth.token_path);
        let session = Session::restore(Box::new(store));
        let client = ApiClient::new(&config.api, session.clone())?;
        let api = LibraryApi::new(client);
        let auth = AuthService::new(api.auth.clone(), session.clone());
        let lookup = CatalogLookup::new(&config.lookup)?;

        Ok(Self {
            config: Arc::new(config),
            session,
            api,
            auth,
            lookup,
        })
    }
}
