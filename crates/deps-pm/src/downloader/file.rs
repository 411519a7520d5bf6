//! Fetcher for Android archives.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::http::HttpClient;
use crate::package::ArtifactCoordinate;
use crate::util::Deadline;
use crate::Result;

/// Outcome of a completed download
#[derive(Debug, Clone)]
pub struct DownloadResult {
    pub path: PathBuf,
    pub url: String,
    pub bytes: u64,
    /// Time since the deadline was started, not just the transfer
    pub elapsed: Duration,
}

/// Downloads artifacts from a Maven 2 layout repository
pub struct FileDownloader {
    http_client: Arc<HttpClient>,
    repository_url: String,
}

impl FileDownloader {
    pub fn new(http_client: Arc<HttpClient>, repository_url: impl Into<String>) -> Self {
        Self {
            http_client,
            repository_url: repository_url.into(),
        }
    }

    pub fn url_for(&self, coordinate: &ArtifactCoordinate) -> String {
        coordinate.aar_url(&self.repository_url)
    }

    /// Download the Android archive of `coordinate` to `dest`, overwriting it.
    ///
    /// The transfer is cut off as soon as `deadline` expires, and the partial
    /// file is removed. A transfer that finishes past the budget still fails.
    /// When the request fails before any body arrives, an existing `dest` is
    /// left alone.
    pub fn download<F>(
        &self,
        coordinate: &ArtifactCoordinate,
        dest: &Path,
        deadline: &Deadline,
        progress: Option<F>,
    ) -> Result<DownloadResult>
    where
        F: Fn(u64, u64),
    {
        let url = self.url_for(coordinate);
        log::debug!("Downloading {} from {}", coordinate, url);

        let bytes = self
            .http_client
            .download(&url, dest, Some(deadline), progress)?;

        // The transfer finished but overran the budget; the file is ours to remove.
        if let Err(e) = deadline.check() {
            if let Err(remove_err) = std::fs::remove_file(dest) {
                log::warn!("Failed to remove late download {}: {}", dest.display(), remove_err);
            }
            return Err(e);
        }

        Ok(DownloadResult {
            path: dest.to_path_buf(),
            url,
            bytes,
            elapsed: deadline.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DepsError;
    use tempfile::TempDir;

    fn downloader(base: &str) -> FileDownloader {
        FileDownloader::new(Arc::new(HttpClient::new().unwrap()), base)
    }

    #[test]
    fn test_url_for() {
        let downloader = downloader("https://repo1.maven.org/maven2");
        let coordinate = ArtifactCoordinate::new("com.example", "foo", "1.2.3");
        assert_eq!(
            downloader.url_for(&coordinate),
            "https://repo1.maven.org/maven2/com/example/foo/1.2.3/foo-1.2.3.aar"
        );
    }

    #[test]
    fn test_expired_deadline_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("foo.aar");
        let downloader = downloader("http://127.0.0.1:9/maven2");
        let coordinate = ArtifactCoordinate::new("com.example", "foo", "1.2.3");

        let deadline = Deadline::start(Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(20));

        let result = downloader.download(&coordinate, &dest, &deadline, None::<fn(u64, u64)>);
        assert!(matches!(result, Err(DepsError::Timeout { .. })));
        assert!(!dest.exists());
    }

    #[test]
    fn test_failed_request_keeps_existing_file() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("foo.aar");
        std::fs::write(&dest, b"mine").unwrap();
        let downloader = downloader("http://127.0.0.1:9/maven2");
        let coordinate = ArtifactCoordinate::new("com.example", "foo", "1.2.3");

        let deadline = Deadline::start(Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(20));

        let result = downloader.download(&coordinate, &dest, &deadline, None::<fn(u64, u64)>);
        assert!(matches!(result, Err(DepsError::Timeout { .. })));
        assert_eq!(std::fs::read(&dest).unwrap(), b"mine");
    }
}
