//! Shared helpers for integration tests

use std::path::PathBuf;

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};

use armarium_client::models::{Role, TokenClaims};
use armarium_client::{App, AppConfig};

/// Mint a bearer token the way the server would
pub fn make_token(role: Role, offset_seconds: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = TokenClaims {
        sub: "anne@example.org".to_string(),
        user_id: 12,
        name: Some("Anne Martin".to_string()),
        role,
        exp: now + offset_seconds,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"server-side-secret"),
    )
    .expect("failed to encode test token")
}

/// Unique token slot per test
pub fn temp_token_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("armarium-it-{}-{}", std::process::id(), name))
        .join("token")
}

/// App wired against a mock server and an isolated token slot
pub fn test_app(server_uri: &str, token_path: PathBuf) -> App {
    let mut config = AppConfig::default();
    config.api.base_url = server_uri.trim_end_matches('/').to_string();
    config.auth.token_path = token_path;
    App::new(config).expect("failed to build test app")
}

/// Seed the persisted slot so `App::new` restores a live session
pub fn seed_token(path: &PathBuf, token: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create token dir");
    }
    std::fs::write(path, token).expect("failed to seed token");
}
