//! Single-slot cache for the default forwarder ID.
//!
//! # Invariants
//! - The slot is either empty or holds the ID of a forwarder last seen with the
//!   default display name; every read is re-verified against the API before use
//! - The lock is never held across an `.await`

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Last-known ID of the client's default forwarder.
#[derive(Debug, Default)]
pub struct ForwarderCache {
    slot: Mutex<Option<String>>,
}

impl ForwarderCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<String>> {
        // The slot is a plain Option, so a panic mid-write cannot leave it torn.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The cached forwarder ID, if any.
    pub fn get(&self) -> Option<String> {
        self.lock().clone()
    }

    /// Replace the cached forwarder ID.
    pub fn set(&self, forwarder_id: impl Into<String>) {
        *self.lock() = Some(forwarder_id.into());
    }

    /// Empty the slot, returning the ID it held.
    pub fn clear(&self) -> Option<String> {
        self.lock().take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_starts_empty() {
        assert_eq!(ForwarderCache::new().get(), None);
    }

    #[test]
    fn test_set_replaces_and_clear_empties() {
        let cache = ForwarderCache::new();
        cache.set("f-1");
        cache.set("f-2");
        assert_eq!(cache.get().as_deref(), Some("f-2"));
        assert_eq!(cache.clear().as_deref(), Some("f-2"));
        assert_eq!(cache.get(), None);
        assert_eq!(cache.clear(), None);
    }

    #[test]
    fn test_cache_survives_poisoned_lock() {
        let cache = std::sync::Arc::new(ForwarderCache::new());
        cache.set("f-1");
        let poisoner = std::sync::Arc::clone(&cache);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.slot.lock().unwrap();
            panic!("poison the slot");
        })
        .join();
        assert!(cache.slot.is_poisoned());
        assert_eq!(cache.get().as_deref(), Some("f-1"));
    }
}
