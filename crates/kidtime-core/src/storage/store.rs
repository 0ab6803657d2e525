use std::collections::HashMap;

use crate::error::Result;

/// Durable key-value storage for session state.
///
/// The session reads its ledger once on open and writes it back after every
/// change.
pub trait HistoryStore {
    fn load(&self, key: &str) -> Result<Option<String>>;

    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Process-local store; contents vanish with the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }

    /// Number of successful `save` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

impl<S: HistoryStore + ?Sized> HistoryStore for Box<S> {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_counts_writes() {
        let mut store = MemoryStore::new();
        assert!(store.load("k").unwrap().is_none());
        store.save("k", "v").unwrap();
        store.save("k", "w").unwrap();
        assert_eq!(store.get("k"), Some("w"));
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn boxed_store_delegates() {
        let mut store: Box<dyn HistoryStore> = Box::new(MemoryStore::with_value("k", "v"));
        assert_eq!(store.load("k").unwrap().as_deref(), Some("v"));
        store.save("k", "x").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("x"));
    }
}
