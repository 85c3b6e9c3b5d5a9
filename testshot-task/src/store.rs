//! Screenshot store
//!
//! One-method seam over the file system, so the uploader can be tested
//! against an in-memory map. Existence check and binary read are a
//! single probe: a `NotFound` read is the "no screenshot" signal, not
//! an error.

use async_trait::async_trait;

/// Read access to captured screenshots
#[async_trait]
pub trait ScreenshotStore: Send + Sync {
    /// Reads the file at `path`.
    ///
    /// Returns `Ok(None)` when no file exists there; any other I/O
    /// problem is an error.
    async fn read(&self, path: &str) -> std::io::Result<Option<Vec<u8>>>;
}

/// Screenshots on the agent's local disk.
pub struct LocalScreenshots;

#[async_trait]
impl ScreenshotStore for LocalScreenshots {
    async fn read(&self, path: &str) -> std::io::Result<Option<Vec<u8>>> {
        match tokio::fs::read(path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_as_none() {
        let read = LocalScreenshots
            .read("./does/not/exist/anywhere.png")
            .await
            .unwrap();
        assert_eq!(read, None);
    }

    #[tokio::test]
    async fn test_existing_file_reads_content() {
        let path = std::env::temp_dir().join(format!("testshot-store-{}.png", std::process::id()));
        tokio::fs::write(&path, b"png-bytes").await.unwrap();

        let read = LocalScreenshots
            .read(path.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(read.as_deref(), Some(b"png-bytes".as_slice()));

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
