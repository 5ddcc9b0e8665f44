use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::ports::relay::{RelayError, RelayStore};

/// In-memory relay for testing purposes.
pub struct InMemoryRelay {
    entries: Mutex<HashMap<(String, String), String>>,
}

impl InMemoryRelay {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl RelayStore for InMemoryRelay {
    fn publish(&self, run_id: &str, key: &str, value: &str) -> Result<(), RelayError> {
        self.entries
            .lock()
            .map_err(|_| RelayError::WriteFailed("lock poisoned".into()))?
            .insert((run_id.to_string(), key.to_string()), value.to_string());
        Ok(())
    }

    fn fetch(&self, run_id: &str, key: &str) -> Result<String, RelayError> {
        self.entries
            .lock()
            .map_err(|_| RelayError::ReadFailed("lock poisoned".into()))?
            .get(&(run_id.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| RelayError::NotFound(format!("{run_id}/{key}")))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_and_overwrite() {
        let relay = InMemoryRelay::new();
        relay.publish("run-1", "reading", "v1").expect("publish");
        relay.publish("run-1", "reading", "v2").expect("republish");
        assert_eq!(relay.fetch("run-1", "reading").expect("fetch"), "v2");
    }

    #[test]
    fn missing_entry_is_not_found() {
        let relay = InMemoryRelay::new();
        let err = relay.fetch("run-1", "reading").expect_err("miss");
        assert!(matches!(err, RelayError::NotFound(_)));
    }
}
