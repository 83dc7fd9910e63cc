//! Dashboard settings: typed values over a byte-level backend.

mod backend;
mod dashboard;
mod memory;

pub use backend::SettingsBackend;
pub use dashboard::DashboardSettings;
pub use memory::MemoryBackend;

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to encode setting: {0}")]
    Serialization(bincode::Error),
    #[error("stored setting is unreadable: {0}")]
    Deserialization(bincode::Error),
    #[error("unknown setting '{0}'")]
    UnknownKey(String),
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

impl SettingsError {
    pub fn invalid(key: &str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Typed access to settings, encoding values with bincode.
#[derive(Clone)]
pub struct SettingsProvider {
    backend: Arc<dyn SettingsBackend>,
}

impl SettingsProvider {
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// A provider over a fresh in-memory backend.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Decode the value stored under `key`, if any.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SettingsError> {
        self.backend
            .load(key)
            .await?
            .map(|bytes| bincode::deserialize(&bytes).map_err(SettingsError::Deserialization))
            .transpose()
    }

    /// Like [`get`](Self::get), with a fallback for missing keys.
    pub async fn get_or<T: DeserializeOwned>(
        &self,
        key: &str,
        default: T,
    ) -> Result<T, SettingsError> {
        Ok(self.get(key).await?.unwrap_or(default))
    }

    pub async fn set<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
        let bytes = bincode::serialize(value).map_err(SettingsError::Serialization)?;
        self.backend.store(key, bytes).await
    }

    pub async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        self.backend.remove(key).await
    }

    pub async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        self.backend.keys(prefix).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip_typed_values() {
        let settings = SettingsProvider::in_memory();
        settings.set("a.count", &7usize).await.unwrap();
        settings.set("a.name", &"clinic".to_string()).await.unwrap();

        assert_eq!(settings.get::<usize>("a.count").await.unwrap(), Some(7));
        assert_eq!(
            settings.get::<String>("a.name").await.unwrap().as_deref(),
            Some("clinic")
        );
        assert_eq!(settings.get_or("missing", 3u32).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_prefix_and_delete() {
        let settings = SettingsProvider::in_memory();
        settings.set("x.b", &1u8).await.unwrap();
        settings.set("x.a", &2u8).await.unwrap();
        settings.set("y.a", &3u8).await.unwrap();

        assert_eq!(settings.keys_with_prefix("x.").await.unwrap(), vec!["x.a", "x.b"]);

        settings.delete("x.a").await.unwrap();
        assert_eq!(settings.get::<u8>("x.a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_type_mismatch_is_an_error() {
        let settings = SettingsProvider::in_memory();
        settings.set("k", &1u8).await.unwrap();

        assert!(matches!(
            settings.get::<u64>("k").await,
            Err(SettingsError::Deserialization(_))
        ));
    }
}
