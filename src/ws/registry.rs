//! Per-connection subscription registry.

use crate::ws::OnReceive;
use std::collections::HashMap;
use std::sync::RwLock;

/// Thread-safe channel → callback map owned by one connection.
///
/// Entries exist only for channels currently believed active on the
/// owning connection; the set is replayed as SUBSCRIPTION frames after a
/// reconnect. Duplicate subscribes are last-writer-wins.
#[derive(Default)]
pub struct Subscriptions {
    inner: RwLock<HashMap<String, OnReceive>>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, channel: &str, listener: OnReceive) {
        self.inner
            .write()
            .expect("subscriptions lock poisoned")
            .insert(channel.to_string(), listener);
    }

    pub fn remove(&self, channel: &str) {
        self.inner
            .write()
            .expect("subscriptions lock poisoned")
            .remove(channel);
    }

    /// Fetch the callback for a channel, if registered.
    pub fn get(&self, channel: &str) -> Option<OnReceive> {
        self.inner
            .read()
            .expect("subscriptions lock poisoned")
            .get(channel)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("subscriptions lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all registered channel names.
    pub fn channels(&self) -> Vec<String> {
        self.inner
            .read()
            .expect("subscriptions lock poisoned")
            .keys()
            .cloned()
            .collect()
    }
}
