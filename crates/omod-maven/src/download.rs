//! Artifact downloading from Maven repositories.

use std::time::Duration;

use omod_util::errors::OmodError;
use reqwest::Client;

use crate::auth;
use crate::repository::MavenRepository;

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Build a shared reqwest client; `timeout` bounds every request.
pub fn build_client(timeout: Duration) -> miette::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("omod/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| {
            OmodError::Network {
                message: format!("Failed to create HTTP client: {e}"),
            }
            .into()
        })
}

/// Download raw bytes from a URL, with authentication and retries.
///
/// Returns `Ok(None)` for 404 (artifact not in this repo). Server errors,
/// timeouts and connection failures are retried.
pub async fn download_bytes(
    client: &Client,
    repo: &MavenRepository,
    url: &str,
) -> miette::Result<Option<Vec<u8>>> {
    let mut last_err = String::new();

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            tokio::time::sleep(RETRY_DELAY * attempt).await;
        }

        let req = auth::apply_auth(client.get(url), repo);

        match req.send().await {
            Ok(resp) => {
                let status = resp.status();
                if status == reqwest::StatusCode::NOT_FOUND {
                    return Ok(None);
                }
                if status.is_server_error() {
                    last_err = format!("HTTP {status} from {url}");
                    continue;
                }
                if !status.is_success() {
                    return Err(OmodError::Network {
                        message: format!("HTTP {status} fetching {url}"),
                    }
                    .into());
                }

                let bytes = resp.bytes().await.map_err(|e| OmodError::Network {
                    message: format!("Failed to read response from {url}: {e}"),
                })?;
                return Ok(Some(bytes.to_vec()));
            }
            Err(e) if e.is_timeout() || e.is_connect() => {
                tracing::debug!("Attempt {} for {url} failed: {e}", attempt + 1);
                last_err = format!("{e}");
                continue;
            }
            Err(e) => {
                return Err(OmodError::Network {
                    message: format!("Request to {url} failed: {e}"),
                }
                .into());
            }
        }
    }

    Err(OmodError::Network {
        message: format!("Failed after {MAX_RETRIES} retries for {url}: {last_err}"),
    }
    .into())
}

/// Download a text file (checksum sidecar).
pub async fn download_text(
    client: &Client,
    repo: &MavenRepository,
    url: &str,
) -> miette::Result<Option<String>> {
    match download_bytes(client, repo, url).await? {
        Some(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).to_string())),
        None => Ok(None),
    }
}
