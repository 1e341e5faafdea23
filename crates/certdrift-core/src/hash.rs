//! Artifact fingerprinting.
//!
//! Results and baseline are hashed over their exact bytes. Line endings,
//! record order and trailing blank records all change the fingerprint.

use ring::digest::{Context, Digest, SHA256};
use std::path::Path;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::{DriftError, Result};
use crate::types::Fingerprint;

/// Read chunk for streaming digests. Inventories of every store on a
/// machine run to several megabytes.
const CHUNK: usize = 64 * 1024;

/// Fingerprint an artifact on disk without loading it whole.
///
/// # Errors
///
/// Returns `DriftError::Filesystem` if the file cannot be opened or read.
pub async fn sha256_file(path: &Path) -> Result<Fingerprint> {
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|e| DriftError::fs(path, e))?;
    sha256_reader(file)
        .await
        .map_err(|e| DriftError::fs(path, e))
}

/// Fingerprint everything `reader` yields until EOF.
async fn sha256_reader<R: AsyncRead + Unpin>(mut reader: R) -> std::io::Result<Fingerprint> {
    let mut context = Context::new(&SHA256);
    let mut chunk = vec![0u8; CHUNK];
    loop {
        match reader.read(&mut chunk).await? {
            0 => return Ok(to_fingerprint(&context.finish())),
            n => context.update(&chunk[..n]),
        }
    }
}

/// Fingerprint an in-memory artifact.
#[must_use]
pub fn sha256_bytes(data: &[u8]) -> Fingerprint {
    to_fingerprint(&ring::digest::digest(&SHA256, data))
}

fn to_fingerprint(digest: &Digest) -> Fingerprint {
    let mut bytes = [0u8; crate::types::fingerprint::FINGERPRINT_LEN];
    bytes.copy_from_slice(digest.as_ref());
    Fingerprint::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InventorySnapshot;

    const EMPTY_DIGEST: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[tokio::test]
    async fn empty_results_has_the_empty_digest() {
        let dir = tempfile::tempdir().unwrap();
        let results = dir.path().join("results.csv");
        std::fs::write(&results, InventorySnapshot::from_bytes(b"").to_artifact_bytes()).unwrap();

        assert_eq!(sha256_file(&results).await.unwrap().to_hex(), EMPTY_DIGEST);
        assert_eq!(sha256_bytes(b"").to_hex(), EMPTY_DIGEST);
    }

    #[tokio::test]
    async fn baseline_on_disk_matches_rendered_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let baseline = dir.path().join("ref.csv");
        std::fs::write(&baseline, "CN=Example Root,SHA256:abc123\nCN=Other CA,SHA256:def456\n")
            .unwrap();

        let snapshot =
            InventorySnapshot::from_bytes(b"CN=Example Root,SHA256:abc123\r\nCN=Other CA,SHA256:def456");
        assert_eq!(
            sha256_file(&baseline).await.unwrap(),
            sha256_bytes(&snapshot.to_artifact_bytes())
        );
    }

    #[test]
    fn line_endings_change_the_fingerprint() {
        let lf = sha256_bytes(b"CN=Example Root,SHA256:abc123\n");
        let crlf = sha256_bytes(b"CN=Example Root,SHA256:abc123\r\n");
        assert_ne!(lf, crlf);
    }

    #[tokio::test]
    async fn multi_chunk_inventory_streams_to_the_same_digest() {
        let record = b"CN=Example Intermediate,SHA256:0123456789abcdef\n";
        let data: Vec<u8> = record.iter().copied().cycle().take(CHUNK * 3 + 17).collect();

        let streamed = sha256_reader(data.as_slice()).await.unwrap();
        assert_eq!(streamed, sha256_bytes(&data));
    }

    #[tokio::test]
    async fn missing_file_is_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = sha256_file(&dir.path().join("absent")).await.unwrap_err();
        assert!(matches!(err, DriftError::Filesystem { .. }));
    }
}
