//! Durable storage for the session's bearer token
//!
//! Exactly one opaque token is persisted under the fixed key
//! [`TOKEN_KEY`]. Three backends implement [`SessionStore`]:
//!
//! - [`FileSessionStore`] -- a plain file in the per-user data directory
//!   (the default)
//! - [`KeyringSessionStore`] -- the OS native credential store (Keychain on
//!   macOS, Secret Service on Linux, Windows Credential Manager on Windows)
//! - [`MemorySessionStore`] -- process memory only, for tests and
//!   throwaway sessions
//!
//! There is no expiry tracking: a token stays until it is cleared
//! explicitly or fails to decode.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;

use crate::config::{SessionBackend, SessionConfig};
use crate::error::{MeetlogError, Result};

/// Fixed storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Keyring service name under which [`TOKEN_KEY`] is stored.
const KEYRING_SERVICE: &str = "meetlog-session";

/// Persistence contract for the bearer token.
pub trait SessionStore: Send + Sync {
    /// Returns the stored token, or `None` when nothing is stored.
    fn get(&self) -> Result<Option<String>>;

    /// Replaces the stored token.
    fn set(&self, token: &str) -> Result<()>;

    /// Removes the stored token. A no-op when nothing is stored.
    fn clear(&self) -> Result<()>;
}

/// Builds the store selected by the configuration.
///
/// # Errors
///
/// Returns [`MeetlogError::Storage`] if the default data directory cannot be
/// determined for the file backend.
pub fn from_config(config: &SessionConfig) -> Result<Box<dyn SessionStore>> {
    let store: Box<dyn SessionStore> = match config.backend {
        SessionBackend::File => match &config.path {
            Some(path) => Box::new(FileSessionStore::new(path.clone())),
            None => Box::new(FileSessionStore::default_location()?),
        },
        SessionBackend::Keyring => Box::new(KeyringSessionStore),
        SessionBackend::Memory => Box::new(MemorySessionStore::default()),
    };
    Ok(store)
}

// ---------------------------------------------------------------------------
// FileSessionStore
// ---------------------------------------------------------------------------

/// Token persisted as the sole contents of a file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Uses `path` as the token file. Nothing is touched until first write.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Places the token file in the user's data directory.
    ///
    /// # Errors
    ///
    /// Returns [`MeetlogError::Storage`] when no home directory is known.
    pub fn default_location() -> Result<Self> {
        let proj_dirs = ProjectDirs::from("com", "meetlog", "meetlog").ok_or_else(|| {
            MeetlogError::Storage("Could not determine data directory".to_string())
        })?;
        Ok(Self::new(proj_dirs.data_dir().join(TOKEN_KEY)))
    }

    /// Location of the token file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MeetlogError::Storage(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))
            .into()),
        }
    }

    fn set(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MeetlogError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(&self.path, token).map_err(|e| {
            MeetlogError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MeetlogError::Storage(format!(
                "Failed to remove {}: {}",
                self.path.display(),
                e
            ))
            .into()),
        }
    }
}

// ---------------------------------------------------------------------------
// KeyringSessionStore
// ---------------------------------------------------------------------------

/// Stateless accessor for the OS native keyring.
pub struct KeyringSessionStore;

impl KeyringSessionStore {
    fn entry() -> Result<keyring::Entry> {
        keyring::Entry::new(KEYRING_SERVICE, TOKEN_KEY).map_err(|e| MeetlogError::Keyring(e).into())
    }
}

impl SessionStore for KeyringSessionStore {
    fn get(&self) -> Result<Option<String>> {
        match Self::entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(MeetlogError::Keyring(e).into()),
        }
    }

    fn set(&self, token: &str) -> Result<()> {
        Self::entry()?
            .set_password(token)
            .map_err(MeetlogError::Keyring)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match Self::entry()?.delete_password() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(MeetlogError::Keyring(e).into()),
        }
    }
}

// ---------------------------------------------------------------------------
// MemorySessionStore
// ---------------------------------------------------------------------------

/// In-process store; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    /// Starts with `token` already stored.
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<String>> {
        let guard = self
            .token
            .lock()
            .map_err(|_| MeetlogError::Storage("session store lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn set(&self, token: &str) -> Result<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| MeetlogError::Storage("session store lock poisoned".to_string()))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| MeetlogError::Storage("session store lock poisoned".to_string()))?;
        *guard = None;
        Ok(())
    }
}
