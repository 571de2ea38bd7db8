//! Bearer-credential storage for PCForge
//!
//! The token store is a single durable key-value cell holding the raw
//! bearer token. It performs no validation; decoding and expiry checks
//! belong to the session manager.

use crate::error::{PcforgeError, Result};
use std::sync::Mutex;

/// Durable cell for the bearer credential
///
/// `load` returns `None` when no credential is stored. Writes are
/// synchronous; there is no batching or caching in front of the backing
/// store.
pub trait TokenStore: Send + Sync {
    /// Read the stored credential, if any
    fn load(&self) -> Result<Option<String>>;

    /// Replace the stored credential
    fn store(&self, token: &str) -> Result<()>;

    /// Remove the stored credential
    fn clear(&self) -> Result<()>;
}

/// Token store backed by the system keyring
///
/// Clearing writes an empty password rather than relying on a delete API
/// that may vary between environments; an empty stored value reads back as
/// absent.
pub struct KeyringTokenStore {
    service: String,
    account: String,
}

impl KeyringTokenStore {
    /// Create a store scoped to a keyring service/account pair
    pub fn new(service: &str, account: &str) -> Self {
        Self {
            service: service.to_string(),
            account: account.to_string(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry> {
        Ok(keyring::Entry::new(&self.service, &self.account)?)
    }
}

impl TokenStore for KeyringTokenStore {
    fn load(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(token) if token.is_empty() => Ok(None),
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(PcforgeError::Keyring(e).into()),
        }
    }

    fn store(&self, token: &str) -> Result<()> {
        self.entry()?.set_password(token)?;
        tracing::debug!("Stored credential in keyring service {}", self.service);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if let Err(e) = self.entry()?.set_password("") {
            tracing::warn!("Failed to clear stored credential: {}", e);
        }
        Ok(())
    }
}

/// In-memory token store
///
/// This is primarily useful for tests where the system keyring is not
/// desirable.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a credential
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.token.lock().expect("token lock poisoned").clone())
    }

    fn store(&self, token: &str) -> Result<()> {
        *self.token.lock().expect("token lock poisoned") = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.lock().expect("token lock poisoned") = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryTokenStore::new();
        assert!(store.load().unwrap().is_none());

        store.store("abc.def.ghi").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc.def.ghi"));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_memory_store_overwrite() {
        let store = MemoryTokenStore::with_token("old");
        store.store("new").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_store_is_object_safe() {
        let store: Box<dyn TokenStore> = Box::new(MemoryTokenStore::new());
        store.store("tok").unwrap();
        assert!(store.load().unwrap().is_some());
    }
}
