//! In-memory clipboard with per-entry expiry.
//!
//! Reads never mutate: an expired entry is simply reported as missing until
//! the background sweeper physically removes it.

use chrono::{DateTime, TimeDelta, Utc};
use hub_types::ClipboardItem;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Ids are the UTC wall clock down to the millisecond, e.g. `150405.123`
const ID_FORMAT: &str = "%H%M%S%.3f";

pub struct ClipboardStore {
    items: RwLock<HashMap<String, ClipboardItem>>,
}

impl Default for ClipboardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardStore {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
        }
    }

    /// Store `content` for `ttl_secs` seconds and return its id.
    pub fn set(&self, content: &str, ttl_secs: i64) -> String {
        self.set_at(Utc::now(), content, ttl_secs)
    }

    fn set_at(&self, now: DateTime<Utc>, content: &str, ttl_secs: i64) -> String {
        let base = now.format(ID_FORMAT).to_string();
        let expires_at = expiry(now, ttl_secs);

        let mut items = self.items.write();

        // A live entry under the same millisecond keeps its id; the newcomer
        // gets a numeric suffix instead of overwriting it.
        let mut id = base.clone();
        let mut n = 1;
        while items.get(&id).is_some_and(|existing| !existing.is_expired_at(now)) {
            n += 1;
            id = format!("{}-{}", base, n);
        }

        items.insert(
            id.clone(),
            ClipboardItem {
                id: id.clone(),
                content: content.to_string(),
                expires_at,
            },
        );
        id
    }

    /// Look up a live entry. Expired and unknown ids are indistinguishable.
    pub fn get(&self, id: &str) -> Option<ClipboardItem> {
        self.get_at(id, Utc::now())
    }

    fn get_at(&self, id: &str, now: DateTime<Utc>) -> Option<ClipboardItem> {
        self.items
            .read()
            .get(id)
            .filter(|item| !item.is_expired_at(now))
            .cloned()
    }

    /// Remove every expired entry in one write-locked pass.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Utc::now())
    }

    fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let mut items = self.items.write();
        let before = items.len();
        items.retain(|_, item| !item.is_expired_at(now));
        before - items.len()
    }

    /// Entries physically held, expired or not
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Spawn the periodic sweeper. It runs until `shutdown` is cancelled.
    pub fn start_sweeper(
        self: &Arc<Self>,
        interval: Duration,
        shutdown: CancellationToken,
    ) -> tokio::task::JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await; // skip immediate tick
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        log::debug!("[CLIPBOARD] Sweeper stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        if store.is_empty() {
                            continue;
                        }
                        let removed = store.sweep();
                        if removed > 0 {
                            log::debug!("[CLIPBOARD] Swept {} expired entries", removed);
                        }
                    }
                }
            }
        })
    }
}

/// `now + ttl_secs`, saturating at the representable range
fn expiry(now: DateTime<Utc>, ttl_secs: i64) -> DateTime<Utc> {
    TimeDelta::try_seconds(ttl_secs)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or(if ttl_secs < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}
