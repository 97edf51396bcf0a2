use std::collections::HashMap;
use std::time::Duration;

use omod_core::coordinate::{Coordinate, FileType};
use omod_maven::checksum::hex_sha1;
use omod_maven::download::build_client;
use omod_maven::fetcher::{ArtifactFetcher, FetchError, MavenFetcher};
use omod_maven::repository::MavenRepository;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve `routes` over plain HTTP; every other path answers 404.
async fn serve(routes: HashMap<String, Vec<u8>>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut sock, _)) = listener.accept().await {
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let n = sock.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).to_string();
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                let response = match routes.get(&path) {
                    Some(body) => {
                        let mut head = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                            body.len()
                        )
                        .into_bytes();
                        head.extend_from_slice(body);
                        head
                    }
                    None => b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                        .to_vec(),
                };
                let _ = sock.write_all(&response).await;
                let _ = sock.shutdown().await;
            });
        }
    });
    format!("http://{addr}")
}

fn fetcher(url: &str) -> MavenFetcher {
    let client = build_client(Duration::from_secs(10)).unwrap();
    MavenFetcher::new(client, vec![MavenRepository::from_url(url)])
}

const IDGEN_PATH: &str = "/org/openmrs/module/idgen-omod/4.14.0/idgen-omod-4.14.0.jar";

#[tokio::test]
async fn fetch_writes_artifact_named_after_module() {
    let url = serve(HashMap::from([(IDGEN_PATH.to_string(), b"jar-bytes".to_vec())])).await;
    let dest = tempfile::tempdir().unwrap();

    let coord = Coordinate::new("org.openmrs.module", "idgen-omod", "4.14.0")
        .with_file_type(FileType::Jar);
    let fetched = fetcher(&url).fetch(&coord, dest.path()).await.unwrap();

    assert_eq!(fetched.path, dest.path().join("idgen-4.14.0.jar"));
    assert_eq!(fetched.version, "4.14.0");
    assert_eq!(std::fs::read(&fetched.path).unwrap(), b"jar-bytes");
}

#[tokio::test]
async fn fetch_missing_artifact_is_not_found() {
    let url = serve(HashMap::new()).await;
    let dest = tempfile::tempdir().unwrap();

    let coord = Coordinate::new("org.openmrs.module", "idgen-omod", "4.0.0");
    let err = fetcher(&url).fetch(&coord, dest.path()).await.unwrap_err();

    assert!(matches!(err, FetchError::NotFound { .. }), "got: {err}");
    assert!(!dest.path().join("idgen-4.0.0.jar").exists());
}

#[tokio::test]
async fn fetch_falls_through_to_second_repository() {
    let empty = serve(HashMap::new()).await;
    let full = serve(HashMap::from([(IDGEN_PATH.to_string(), b"jar".to_vec())])).await;
    let dest = tempfile::tempdir().unwrap();

    let client = build_client(Duration::from_secs(10)).unwrap();
    let fetcher = MavenFetcher::new(
        client,
        vec![MavenRepository::from_url(&empty), MavenRepository::from_url(&full)],
    );
    let coord = Coordinate::new("org.openmrs.module", "idgen-omod", "4.14.0");
    assert!(fetcher.fetch(&coord, dest.path()).await.is_ok());
}

#[tokio::test]
async fn fetch_verifies_sha1_sidecar() {
    let body = b"jar-bytes".to_vec();
    let good = serve(HashMap::from([
        (IDGEN_PATH.to_string(), body.clone()),
        (format!("{IDGEN_PATH}.sha1"), hex_sha1(&body).into_bytes()),
    ]))
    .await;
    let bad = serve(HashMap::from([
        (IDGEN_PATH.to_string(), body),
        (format!("{IDGEN_PATH}.sha1"), b"0000".to_vec()),
    ]))
    .await;
    let dest = tempfile::tempdir().unwrap();
    let coord = Coordinate::new("org.openmrs.module", "idgen-omod", "4.14.0");

    let ok = fetcher(&good).with_checksums(true).fetch(&coord, dest.path()).await;
    assert!(ok.is_ok());

    let err = fetcher(&bad)
        .with_checksums(true)
        .fetch(&coord, dest.path())
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }), "got: {err}");
    assert!(err.to_string().contains("SHA-1 mismatch"), "got: {err}");
}
