//! Environment variable secret store

use std::collections::HashMap;
use std::env;

use once_cell::sync::Lazy;

use super::traits::{SecretStore, SecretStoreError, SecretStoreResult};

/// Provider aliases and the variables they resolve to, in priority order
static ENV_VAR_MAP: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("gemini", vec!["GEMINI_API_KEY", "GOOGLE_API_KEY"]);
    m.insert("google", vec!["GEMINI_API_KEY", "GOOGLE_API_KEY"]);
    m
});

/// Secret store that reads from environment variables
///
/// Keys are looked up as variable names first, then as provider aliases:
/// `gemini` → `GEMINI_API_KEY`, then `GOOGLE_API_KEY`. Empty values count as
/// unset.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSecretStore;

impl EnvSecretStore {
    pub fn new() -> Self {
        Self
    }

    /// Get the environment variable names for a provider alias
    pub fn env_vars_for_provider(provider: &str) -> Option<&'static [&'static str]> {
        ENV_VAR_MAP
            .get(provider.to_lowercase().as_str())
            .map(|v| v.as_slice())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl SecretStore for EnvSecretStore {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = non_empty_var(key) {
            return Some(value);
        }

        Self::env_vars_for_provider(key)?
            .iter()
            .find_map(|name| non_empty_var(name))
    }

    fn store(&self, _key: &str, _value: &str) -> SecretStoreResult<()> {
        Err(SecretStoreError::ReadOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_store_read_only() {
        let store = EnvSecretStore::new();
        assert_eq!(store.name(), "env");
        assert!(matches!(store.store("test", "value"), Err(SecretStoreError::ReadOnly)));
    }

    #[test]
    fn test_env_store_get_direct() {
        env::set_var("RESTBRIDGE_TEST_SECRET_DIRECT", "test_value");

        let store = EnvSecretStore::new();
        assert_eq!(
            store.get("RESTBRIDGE_TEST_SECRET_DIRECT"),
            Some("test_value".to_string())
        );

        env::remove_var("RESTBRIDGE_TEST_SECRET_DIRECT");
    }

    #[test]
    fn test_env_store_empty_value_is_unset() {
        env::set_var("RESTBRIDGE_TEST_SECRET_EMPTY", "  ");

        let store = EnvSecretStore::new();
        assert!(!store.has("RESTBRIDGE_TEST_SECRET_EMPTY"));
        assert!(matches!(
            store.require("RESTBRIDGE_TEST_SECRET_EMPTY"),
            Err(SecretStoreError::NotFound(_))
        ));

        env::remove_var("RESTBRIDGE_TEST_SECRET_EMPTY");
    }

    #[test]
    fn test_provider_aliases() {
        assert_eq!(
            EnvSecretStore::env_vars_for_provider("Gemini"),
            Some(&["GEMINI_API_KEY", "GOOGLE_API_KEY"][..])
        );
        assert!(EnvSecretStore::env_vars_for_provider("nonexistent_provider_xyz").is_none());
    }
}
