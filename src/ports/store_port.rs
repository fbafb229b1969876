//! Key-value persistence port trait.

/// Minimal string store, e.g. for recent searches. Chart logic never touches it.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}
