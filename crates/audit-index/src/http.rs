//! Shared HTTP response helpers for the cluster client.

use crate::error::IndexError;

/// Map a non-success status to [`IndexError::Api`] with the response body.
///
/// A 429 is reported like any other rejection; requests are never retried.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, IndexError> {
    if !resp.status().is_success() {
        return Err(IndexError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}
