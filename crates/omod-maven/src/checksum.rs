//! Artifact checksum verification (SHA-1, MD5).

use md5::Md5;
use omod_util::errors::OmodError;
use reqwest::Client;
use sha1::{Digest, Sha1};

use crate::download;
use crate::repository::MavenRepository;

/// Verify downloaded data against the repository's sidecar files.
///
/// Tries SHA-1 first, then MD5. Logs a warning if neither is published.
pub async fn verify(
    client: &Client,
    repo: &MavenRepository,
    file_url: &str,
    data: &[u8],
) -> miette::Result<()> {
    let sha1_url = format!("{file_url}.sha1");
    if let Some(expected) = download::download_text(client, repo, &sha1_url).await? {
        return check(&hex_sha1(data), &extract_hash(&expected), "SHA-1", file_url);
    }

    let md5_url = format!("{file_url}.md5");
    if let Some(expected) = download::download_text(client, repo, &md5_url).await? {
        return check(&hex_md5(data), &extract_hash(&expected), "MD5", file_url);
    }

    tracing::warn!("No checksum sidecar found for {file_url}");
    Ok(())
}

fn check(actual: &str, expected: &str, algo: &str, url: &str) -> miette::Result<()> {
    if actual.eq_ignore_ascii_case(expected) {
        tracing::debug!("{algo} ok for {url}");
        Ok(())
    } else {
        Err(OmodError::Network {
            message: format!("{algo} mismatch for {url}: expected {expected}, got {actual}"),
        }
        .into())
    }
}

/// Maven checksum files hold either the bare hash or `hash  filename`.
fn extract_hash(content: &str) -> String {
    content.split_whitespace().next().unwrap_or("").to_string()
}

pub fn hex_sha1(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

fn hex_md5(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
