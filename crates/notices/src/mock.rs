//! Mock Notice Service Implementation
//!
//! Wraps the in-memory store and adds:
//! - a switch that makes every save fail
//! - a record of every saved batch

use std::sync::{Arc, Mutex, RwLock};

use crate::memory::MemoryNoticeStore;
use crate::{Notice, NoticeError, NoticeService};

#[derive(Debug, Clone, Default)]
pub struct MockNoticeService {
    store: MemoryNoticeStore,
    fail_saves: Arc<RwLock<bool>>,
    saved: Arc<Mutex<Vec<Vec<Notice>>>>,
}

impl MockNoticeService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent save fail
    pub fn set_fail_saves(&self, fail: bool) {
        *self.fail_saves.write().unwrap() = fail;
    }

    /// Batches passed to `save`, including failed attempts
    pub fn saved_batches(&self) -> Vec<Vec<Notice>> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl NoticeService for MockNoticeService {
    async fn save(&self, notices: Vec<Notice>) -> Result<Option<String>, NoticeError> {
        self.saved.lock().unwrap().push(notices.clone());
        if *self.fail_saves.read().unwrap() {
            return Err(NoticeError::Storage("mock save failure".to_string()));
        }
        self.store.save(notices).await
    }

    async fn take(&self, token: &str) -> Result<Vec<Notice>, NoticeError> {
        self.store.take(token).await
    }
}
