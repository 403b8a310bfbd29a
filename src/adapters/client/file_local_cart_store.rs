//! File-based Local Cart Store Adapter
//!
//! Keeps the guest cart as a single JSON document on disk, the way a
//! browser keeps it under one local-storage key.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::cart::MirrorEntry;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::LocalCartStore;

/// Default file name for the guest cart record.
pub const DEFAULT_CART_FILE: &str = "cartItems.json";

/// File-based storage for the guest cart.
#[derive(Debug, Clone)]
pub struct FileLocalCartStore {
    path: PathBuf,
}

impl FileLocalCartStore {
    /// Create a store backed by the given file.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileLocalCartStore::new("./data/cartItems.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store using `DEFAULT_CART_FILE` inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_CART_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn io_error(context: &str, err: std::io::Error) -> DomainError {
    DomainError::unavailable(format!("{}: {}", context, err))
}

#[async_trait]
impl LocalCartStore for FileLocalCartStore {
    async fn load(&self) -> Result<Vec<MirrorEntry>, DomainError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error("Failed to read cart file", e)),
        };

        // Unreadable content is treated like an absent record.
        match serde_json::from_slice(&bytes) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "discarding malformed guest cart");
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, entries: &[MirrorEntry]) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error("Failed to create cart directory", e))?;
        }

        let json = serde_json::to_vec(entries).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize cart: {}", e),
            )
        })?;

        // Write then rename so a crash never leaves a half-written record.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .await
            .map_err(|e| io_error("Failed to write cart file", e))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| io_error("Failed to replace cart file", e))
    }

    async fn remove(&self) -> Result<(), DomainError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error("Failed to remove cart file", e)),
        }
    }
}
