//! Process-local token storage

use std::sync::{PoisonError, RwLock};

use dc_core::services::session::TokenStore;

/// In-memory [`TokenStore`].
///
/// The browser build of DataChat keeps the token in local storage; a
/// process-local slot is the equivalent for SDK consumers, who can provide
/// their own implementation for anything longer-lived.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) {
        *self
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    fn load(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn clear(&self) {
        *self
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_clear() {
        let store = MemoryTokenStore::new();
        assert!(store.load().is_none());

        store.save("abc");
        assert_eq!(store.load().as_deref(), Some("abc"));

        store.save("def");
        assert_eq!(store.load().as_deref(), Some("def"));

        store.clear();
        assert!(store.load().is_none());
    }
}
