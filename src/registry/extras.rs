//! Registry of the extras keys to flatten

use super::RegistryEntry;

/// An ordered set of extras keys
#[derive(Debug, Clone, Default)]
pub struct ExtrasKeysRegistry {
    keys: Vec<String>,
}

impl ExtrasKeysRegistry {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::default();
        for key in keys {
            registry.add(key);
        }
        registry
    }

    /// Add a key; duplicates are ignored
    pub fn add(&mut self, key: impl Into<String>) {
        let key = key.into();
        if !self.keys.contains(&key) {
            self.keys.push(key);
        }
    }
}

impl RegistryEntry for ExtrasKeysRegistry {
    fn iter_records(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.keys.iter().map(String::as_str))
    }
}
