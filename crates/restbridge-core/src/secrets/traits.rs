//! Secret store trait

use thiserror::Error;

/// Errors that can occur during secret store operations
#[derive(Error, Debug)]
pub enum SecretStoreError {
    #[error("Store is read-only")]
    ReadOnly,

    #[error("Secret not found: {0}")]
    NotFound(String),
}

pub type SecretStoreResult<T> = Result<T, SecretStoreError>;

/// Source of API keys
///
/// Implementations:
/// - `EnvSecretStore`: environment variables (read-only)
/// - `MemorySecretStore`: in-memory, for tests
pub trait SecretStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Retrieve a secret by variable name or provider alias
    fn get(&self, key: &str) -> Option<String>;

    /// Store a secret
    fn store(&self, key: &str, value: &str) -> SecretStoreResult<()>;

    /// Check if a secret exists
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Retrieve a secret or fail with `NotFound`
    fn require(&self, key: &str) -> SecretStoreResult<String> {
        self.get(key)
            .ok_or_else(|| SecretStoreError::NotFound(key.to_string()))
    }
}
