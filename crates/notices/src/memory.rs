//! In-process notice store with expiry

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{Notice, NoticeError, NoticeService};

pub const DEFAULT_TTL_SECS: i64 = 3600;

#[derive(Debug, Clone)]
struct StoredBatch {
    notices: Vec<Notice>,
    expires_at: DateTime<Utc>,
}

/// Notice store kept in process memory.
///
/// Tokens only resolve on the instance that issued them.
#[derive(Debug, Clone)]
pub struct MemoryNoticeStore {
    ttl: Duration,
    batches: Arc<Mutex<HashMap<String, StoredBatch>>>,
}

impl Default for MemoryNoticeStore {
    fn default() -> Self {
        Self::with_ttl(Duration::seconds(DEFAULT_TTL_SECS))
    }
}

impl MemoryNoticeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            batches: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of batches currently held, expired ones included
    pub fn len(&self) -> usize {
        self.batches.lock().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> NoticeError {
    NoticeError::Storage("notice store lock poisoned".to_string())
}

#[async_trait::async_trait]
impl NoticeService for MemoryNoticeStore {
    async fn save(&self, notices: Vec<Notice>) -> Result<Option<String>, NoticeError> {
        if notices.is_empty() {
            return Ok(None);
        }

        let now = Utc::now();
        let token = Uuid::new_v4().simple().to_string();
        let mut batches = self.batches.lock().map_err(poisoned)?;
        batches.retain(|_, batch| batch.expires_at > now);
        batches.insert(
            token.clone(),
            StoredBatch {
                notices,
                expires_at: now + self.ttl,
            },
        );

        tracing::debug!(token = %token, "Notices saved");
        Ok(Some(token))
    }

    async fn take(&self, token: &str) -> Result<Vec<Notice>, NoticeError> {
        let mut batches = self.batches.lock().map_err(poisoned)?;
        match batches.remove(token) {
            Some(batch) if batch.expires_at > Utc::now() => Ok(batch.notices),
            _ => Ok(Vec::new()),
        }
    }
}
