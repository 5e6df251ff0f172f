//! FILENAME: core/engine/src/storage.rs
//! PURPOSE: Variable storage consulted during evaluation.
//! CONTEXT: The evaluator looks variables up by name, once per variable
//! node per evaluation. Storage is caller-supplied; the engine only needs
//! read access, so any read-safe implementation can be shared between
//! concurrent evaluations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use parser::Number;

/// Read-only name-to-value lookup used by the evaluator.
pub trait VariableStorage {
    fn value_of(&self, name: &str) -> Option<Number>;
}

/// HashMap-backed storage for the common case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleStorage {
    values: HashMap<String, Number>,
}

impl SimpleStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a value. Returns `&mut self` so bindings can be
    /// chained when setting up storage.
    pub fn put(&mut self, name: impl Into<String>, value: impl Into<Number>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<Number> {
        self.values.remove(name)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl VariableStorage for SimpleStorage {
    fn value_of(&self, name: &str) -> Option<Number> {
        self.values.get(name).copied()
    }
}

impl VariableStorage for HashMap<String, Number> {
    fn value_of(&self, name: &str) -> Option<Number> {
        self.get(name).copied()
    }
}

impl VariableStorage for HashMap<String, f64> {
    fn value_of(&self, name: &str) -> Option<Number> {
        self.get(name).copied().map(Number::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_and_lookup() {
        let mut storage = SimpleStorage::new();
        storage.put("x", 4).put("y", 2.5);

        assert_eq!(storage.value_of("x"), Some(Number::Int(4)));
        assert_eq!(storage.value_of("y"), Some(Number::Float(2.5)));
        assert_eq!(storage.value_of("z"), None);
    }

    #[test]
    fn put_replaces_existing_value() {
        let mut storage = SimpleStorage::new();
        storage.put("x", 1);
        storage.put("x", 2);

        assert_eq!(storage.value_of("x"), Some(Number::Int(2)));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn hashmap_is_usable_as_storage() {
        let mut values: HashMap<String, f64> = HashMap::new();
        values.insert("rate".to_string(), 0.2);

        assert_eq!(values.value_of("rate"), Some(Number::Float(0.2)));
    }

    #[test]
    fn storage_round_trips_through_json() {
        let mut storage = SimpleStorage::new();
        storage.put("x", 42);

        let json = serde_json::to_string(&storage).expect("serialize");
        let back: SimpleStorage = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(back, storage);
    }
}
