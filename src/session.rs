//! Session token handling
//!
//! The bearer token lives in an explicit [`SessionContext`] handed to the
//! HTTP client. A [`TokenStore`] persists it between runs in the XDG data
//! directory (~/.local/share/fitspace/session.json).

use crate::config::defaults::APP_DIR_NAME;
use crate::constants::storage::{SESSION_FILE_NAME, TOKEN_KEY};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// A stored value with its write time
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredItem {
    value: String,
    updated_at: DateTime<Utc>,
}

/// File-backed key/value store for session data
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Store at the default data directory path
    pub fn new() -> Result<Self> {
        let path = dirs::data_dir()
            .map(|p| p.join(APP_DIR_NAME).join(SESSION_FILE_NAME))
            .ok_or_else(|| Error::Session("Could not determine data directory".to_string()))?;
        Ok(Self { path })
    }

    /// Store at a specific path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_items(&self) -> Result<BTreeMap<String, StoredItem>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| Error::Session(format!("Failed to read session file: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Session(format!("Failed to parse session file: {}", e)))
    }

    fn write_items(&self, items: &BTreeMap<String, StoredItem>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Session(format!("Failed to create session directory: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, content)
            .map_err(|e| Error::Session(format!("Failed to write session file: {}", e)))
    }

    /// Read the persisted token, if any
    pub fn load(&self) -> Result<Option<String>> {
        Ok(self.read_items()?.remove(TOKEN_KEY).map(|item| item.value))
    }

    /// Persist a token
    pub fn save(&self, token: &str) -> Result<()> {
        let mut items = self.read_items()?;
        items.insert(
            TOKEN_KEY.to_string(),
            StoredItem {
                value: token.to_string(),
                updated_at: Utc::now(),
            },
        );
        self.write_items(&items)
    }

    /// Remove the persisted token
    pub fn remove(&self) -> Result<()> {
        let mut items = self.read_items()?;
        if items.remove(TOKEN_KEY).is_some() {
            self.write_items(&items)?;
        }
        Ok(())
    }
}

/// Explicit session state shared with the HTTP client
///
/// Clones share the same token. An ephemeral session never touches disk;
/// a persistent one writes every change through to its [`TokenStore`].
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    token: Arc<RwLock<Option<String>>>,
    store: Option<Arc<TokenStore>>,
}

impl SessionContext {
    /// Session without persistence
    pub fn ephemeral() -> Self {
        Self::default()
    }

    /// Ephemeral session starting with a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token.into()))),
            store: None,
        }
    }

    /// Session backed by a store, seeded from whatever it holds
    pub fn persistent(store: TokenStore) -> Result<Self> {
        let token = store.load()?;
        debug!(
            path = %store.path().display(),
            has_token = token.is_some(),
            "Loaded session"
        );
        Ok(Self {
            token: Arc::new(RwLock::new(token)),
            store: Some(Arc::new(store)),
        })
    }

    /// Current token
    pub fn token(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Replace the token
    pub fn set_token(&self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        if let Some(store) = &self.store {
            store.save(&token)?;
        }
        self.replace(Some(token));
        Ok(())
    }

    /// Drop the token
    pub fn clear_token(&self) -> Result<()> {
        if let Some(store) = &self.store {
            store.remove()?;
        }
        self.replace(None);
        Ok(())
    }

    fn replace(&self, token: Option<String>) {
        match self.token.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }
}
