use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

/// A single cached payload with its write time. An entry with no data is the
/// cleared state; it is never valid regardless of age.
#[derive(Debug)]
struct CacheEntry<T> {
    data: Option<T>,
    stored_at: Instant,
}

impl<T> CacheEntry<T> {
    fn empty() -> Self {
        Self {
            data: None,
            stored_at: Instant::now(),
        }
    }

    fn fresh(data: T) -> Self {
        Self {
            data: Some(data),
            stored_at: Instant::now(),
        }
    }

    fn is_valid(&self, ttl: Duration) -> bool {
        self.data.is_some() && self.stored_at.elapsed() < ttl
    }
}

/// In-memory, time-boxed cache keyed by resource name.
///
/// A slot is valid only while its payload is present and younger than the
/// configured TTL. There is no eviction beyond TTL expiry - expired slots are
/// simply ignored until overwritten. The lock is never held across an await.
#[derive(Debug)]
pub struct CacheStore<T> {
    ttl: Duration,
    slots: Mutex<HashMap<String, CacheEntry<T>>>,
}

impl<T: Clone> CacheStore<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// True iff the slot holds data younger than the TTL.
    pub fn is_valid(&self, key: &str) -> bool {
        self.lock()
            .get(key)
            .map(|entry| entry.is_valid(self.ttl))
            .unwrap_or(false)
    }

    /// Return a clone of the slot's payload, or `None` when absent or expired.
    pub fn get(&self, key: &str) -> Option<T> {
        let slots = self.lock();
        let entry = slots.get(key)?;
        if entry.is_valid(self.ttl) {
            entry.data.clone()
        } else {
            None
        }
    }

    /// Overwrite the slot with a fresh timestamp.
    pub fn set(&self, key: &str, data: T) {
        self.lock().insert(key.to_string(), CacheEntry::fresh(data));
    }

    /// Reset one slot, or every slot when no key is given.
    pub fn clear(&self, key: Option<&str>) {
        let mut slots = self.lock();
        match key {
            Some(key) => {
                slots.insert(key.to_string(), CacheEntry::empty());
            }
            None => {
                for entry in slots.values_mut() {
                    *entry = CacheEntry::empty();
                }
            }
        }
        debug!(key = key.unwrap_or("all"), "cache cleared");
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<T>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
