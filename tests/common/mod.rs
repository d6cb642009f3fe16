use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use tempfile::TempDir;

use meetlog::device::{Coordinates, FixedPositionSource, PositionSource};
use meetlog::session::{MemorySessionStore, SessionStore};
use meetlog::{App, Config};

/// Unsigned token whose payload carries `sub` and `name`.
#[allow(dead_code)]
pub fn token_for(sub: &str, name: &str) -> String {
    let claims = serde_json::json!({ "sub": sub, "name": name });
    format!("e30.{}.sig", URL_SAFE_NO_PAD.encode(claims.to_string()))
}

/// Defaults with every backend pointed at `uri`.
#[allow(dead_code)]
pub fn config_for(uri: &str) -> Config {
    let mut config = Config::default();
    config.auth.base_url = uri.to_string();
    config.meetings.base_url = uri.to_string();
    config.geocoding.base_url = uri.to_string();
    config.geocoding.api_key = None;
    config
}

#[allow(dead_code)]
pub fn bengaluru() -> Arc<dyn PositionSource> {
    Arc::new(FixedPositionSource(Coordinates {
        latitude: 12.9716,
        longitude: 77.5946,
    }))
}

/// App against `uri` with an in-memory store, signed in when `token` is set.
#[allow(dead_code)]
pub fn app_for(uri: &str, token: Option<&str>) -> (App, Arc<MemorySessionStore>) {
    let store = Arc::new(match token {
        Some(token) => MemorySessionStore::with_token(token),
        None => MemorySessionStore::default(),
    });
    let app = App::with_store(
        &config_for(uri),
        Arc::clone(&store) as Arc<dyn SessionStore>,
        bengaluru(),
    )
    .expect("failed to build app");
    (app, store)
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
