//! API key lookup
//!
//! - `SecretStore` trait for lookups by variable name or provider alias
//! - `EnvSecretStore` reads the process environment
//! - `MemorySecretStore` for tests

mod env_store;
mod memory_store;
mod traits;

pub use env_store::EnvSecretStore;
pub use memory_store::MemorySecretStore;
pub use traits::{SecretStore, SecretStoreError, SecretStoreResult};
