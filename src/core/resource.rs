use crate::domain::ports::RemoteSource;
use crate::utils::error::{Result, StormError};
use flate2::read::GzDecoder;
use std::io::Read;

/// Fails with `InvalidResource` unless `url` is reachable.
pub async fn require<S: RemoteSource + ?Sized>(source: &S, url: &str) -> Result<()> {
    if source.exists(url).await? {
        Ok(())
    } else {
        tracing::warn!("Resource not available: {}", url);
        Err(StormError::InvalidResource {
            url: url.to_string(),
        })
    }
}

/// Downloads `url` as text, gunzipping `.gz` resources first.
pub async fn fetch_text<S: RemoteSource + ?Sized>(source: &S, url: &str) -> Result<String> {
    let body = source.fetch(url).await?;
    let bytes = if url.ends_with(".gz") {
        gunzip(url, &body)?
    } else {
        body
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn gunzip(url: &str, body: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(body);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| StormError::parse(url, format!("gzip decode failed: {}", e)))?;
    tracing::debug!("Decompressed {} -> {} bytes", body.len(), out.len());
    Ok(out)
}
