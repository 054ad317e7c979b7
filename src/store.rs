// src/store.rs
// Shared state between the cycle runner (single writer) and the HTTP layer
// (readers, plus the city update). Results are swapped wholesale so readers
// always see one cycle's complete output.

use std::sync::{Arc, RwLock};

use serde::Serialize;

/// One classified feed item. Immutable once created; owned by the snapshot
/// it was published in.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClassifiedItem {
    pub title: String,
    pub link: String,
    pub category: String,
    pub score: f32,
    pub time: String,
    pub is_important: bool,
}

/// The pair of result sequences published at the end of a cycle.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub news: Vec<ClassifiedItem>,
    pub important: Vec<ClassifiedItem>,
    pub cycle: u64,
}

/// Holds the latest snapshot behind an `Arc`; `publish` replaces the whole
/// snapshot and readers clone the `Arc`, so a reader never observes a
/// half-updated cycle.
#[derive(Debug)]
pub struct NewsStore {
    inner: RwLock<Arc<Snapshot>>,
}

impl NewsStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Arc::new(Snapshot::default())),
        }
    }

    pub fn publish(&self, snapshot: Snapshot) {
        let mut guard = self.inner.write().expect("rwlock poisoned");
        *guard = Arc::new(snapshot);
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.inner.read().expect("rwlock poisoned").clone()
    }
}

impl Default for NewsStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-writer-many-reader cell for the configured city. The poller reads
/// it once per cycle; a value written mid-cycle takes effect next cycle.
#[derive(Debug)]
pub struct CityCell {
    inner: RwLock<String>,
}

impl CityCell {
    pub fn new(initial: &str) -> Self {
        Self {
            inner: RwLock::new(initial.trim().to_string()),
        }
    }

    pub fn get(&self) -> String {
        self.inner.read().expect("rwlock poisoned").clone()
    }

    pub fn set(&self, city: &str) -> String {
        let value = city.trim().to_string();
        *self.inner.write().expect("rwlock poisoned") = value.clone();
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, important: bool) -> ClassifiedItem {
        ClassifiedItem {
            title: title.into(),
            link: String::new(),
            category: "general".into(),
            score: 0.0,
            time: "2026-01-01 00:00:00".into(),
            is_important: important,
        }
    }

    #[test]
    fn publish_replaces_snapshot_wholesale() {
        let store = NewsStore::new();
        assert!(store.snapshot().news.is_empty());

        store.publish(Snapshot {
            news: vec![item("a", false), item("b", true)],
            important: vec![item("b", true)],
            cycle: 1,
        });

        let old = store.snapshot();
        store.publish(Snapshot {
            news: vec![item("c", false)],
            important: vec![],
            cycle: 2,
        });

        // The earlier reader still holds a complete old snapshot.
        assert_eq!(old.cycle, 1);
        assert_eq!(old.news.len(), 2);
        let new = store.snapshot();
        assert_eq!(new.cycle, 2);
        assert_eq!(new.news.len(), 1);
    }

    #[test]
    fn city_cell_trims_and_replaces() {
        let cell = CityCell::new(" Delhi ");
        assert_eq!(cell.get(), "Delhi");
        assert_eq!(cell.set("  Mumbai "), "Mumbai");
        assert_eq!(cell.get(), "Mumbai");
    }
}
