use super::StateStore;
use crate::error::{BlogError, Result};
use std::collections::HashMap;

/// In-memory blob storage for tests.
#[derive(Default)]
pub struct InMemoryStore {
    blobs: HashMap<String, String>,
    simulate_write_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }
}

impl StateStore for InMemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error {
            return Err(BlogError::Store("Simulated write error".to_string()));
        }
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
