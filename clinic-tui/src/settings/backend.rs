//! Storage seam for settings.

use async_trait::async_trait;

use super::SettingsError;

/// Raw key/value storage behind [`SettingsProvider`](super::SettingsProvider).
///
/// Keys are dotted names such as `dashboard.page_size`. Values are the
/// bincode blobs the provider encodes and decodes.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError>;

    async fn store(&self, key: &str, bytes: Vec<u8>) -> Result<(), SettingsError>;

    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), SettingsError>;

    /// Keys starting with `prefix`, sorted.
    async fn keys(&self, prefix: &str) -> Result<Vec<String>, SettingsError>;
}
