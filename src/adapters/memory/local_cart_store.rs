//! In-memory local cart store, for tests and headless clients.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::cart::MirrorEntry;
use crate::domain::foundation::DomainError;
use crate::ports::LocalCartStore;

#[derive(Debug, Clone, Default)]
pub struct InMemoryLocalCartStore {
    record: Arc<RwLock<Option<Vec<MirrorEntry>>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryLocalCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding a saved guest cart.
    pub fn with_entries(entries: Vec<MirrorEntry>) -> Self {
        Self {
            record: Arc::new(RwLock::new(Some(entries))),
            fail_writes: Arc::default(),
        }
    }

    /// Makes `save` and `remove` fail with `Unavailable`.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// True when a record is present.
    pub async fn has_record(&self) -> bool {
        self.record.read().await.is_some()
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::unavailable("local storage unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl LocalCartStore for InMemoryLocalCartStore {
    async fn load(&self) -> Result<Vec<MirrorEntry>, DomainError> {
        Ok(self.record.read().await.clone().unwrap_or_default())
    }

    async fn save(&self, entries: &[MirrorEntry]) -> Result<(), DomainError> {
        self.check_writable()?;
        *self.record.write().await = Some(entries.to_vec());
        Ok(())
    }

    async fn remove(&self) -> Result<(), DomainError> {
        self.check_writable()?;
        *self.record.write().await = None;
        Ok(())
    }
}
