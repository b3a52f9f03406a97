use crate::utils::error::Result;
use async_trait::async_trait;

/// Read-only access to remote archive files.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Whether `url` can be retrieved. Transport failures are errors, a
    /// non-success status is `Ok(false)`.
    async fn exists(&self, url: &str) -> Result<bool>;

    /// Raw body of `url`. A non-success status is an error.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
