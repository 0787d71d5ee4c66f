use crate::errors::CoreError;

/// Durable string key-value store backing the coin data cache.
///
/// Values are stored and returned verbatim; callers own the encoding.
pub trait KeyValueStorage: Send {
    /// Read the value under `key`, or `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError>;

    /// Delete `key`. Returns `true` if something was removed.
    fn remove(&mut self, key: &str) -> Result<bool, CoreError>;
}
