//! Pipeline configuration.
//!
//! Endpoints, the wall-clock budget and the on-disk layout are carried in a
//! [`PipelineConfig`] that is handed to the pipeline, so tests can point the
//! resolver and fetcher at a local server.
//!
//! ```rust
//! use deps_pm::config::PipelineConfig;
//! use std::time::Duration;
//!
//! let config = PipelineConfig::new()
//!     .with_timeout(Duration::from_secs(30))
//!     .with_deps_dir("libs");
//! assert!(config.validate().is_ok());
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{DepsError, Result};

pub const DEFAULT_SEARCH_URL: &str = "https://search.maven.org/solrsearch/select";
pub const DEFAULT_REPOSITORY_URL: &str = "https://repo1.maven.org/maven2";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_ENTRY_NAME: &str = "classes.jar";
pub const DEFAULT_DEPS_DIR: &str = "deps";
pub const DEFAULT_USER_AGENT: &str = concat!("depsdownloader/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Search endpoint, queried with `q`, `rows` and `wt` parameters
    pub search_url: String,
    /// Base URL of a Maven 2 layout repository
    pub repository_url: String,
    /// Budget for the whole resolve + download sequence
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Entry extracted from the Android archive
    pub entry_name: String,
    /// Destination folder, relative to `work_dir` unless absolute
    pub deps_dir: PathBuf,
    /// Directory holding the transient `.aar`, `.zip` and `.jar` files
    pub work_dir: PathBuf,
    pub user_agent: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            repository_url: DEFAULT_REPOSITORY_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            entry_name: DEFAULT_ENTRY_NAME.to_string(),
            deps_dir: PathBuf::from(DEFAULT_DEPS_DIR),
            work_dir: PathBuf::from("."),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_url(mut self, search_url: impl Into<String>) -> Self {
        self.search_url = search_url.into();
        self
    }

    pub fn with_repository_url(mut self, repository_url: impl Into<String>) -> Self {
        self.repository_url = repository_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn with_entry_name(mut self, entry_name: impl Into<String>) -> Self {
        self.entry_name = entry_name.into();
        self
    }

    pub fn with_deps_dir(mut self, deps_dir: impl Into<PathBuf>) -> Self {
        self.deps_dir = deps_dir.into();
        self
    }

    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Destination folder resolved against the working directory.
    pub fn deps_path(&self) -> PathBuf {
        self.work_dir.join(&self.deps_dir)
    }

    /// Path of a transient file for `library` with the given extension.
    pub fn transient_path(&self, library: &str, extension: &str) -> PathBuf {
        self.work_dir.join(format!("{}.{}", library, extension))
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn validate(&self) -> Result<()> {
        for (label, value) in [
            ("search URL", &self.search_url),
            ("repository URL", &self.repository_url),
        ] {
            let parsed = url::Url::parse(value)
                .map_err(|e| DepsError::Config(format!("invalid {} {:?}: {}", label, value, e)))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(DepsError::Config(format!(
                    "{} must use http or https: {}",
                    label, value
                )));
            }
        }

        if self.entry_name.is_empty() {
            return Err(DepsError::Config("entry name must not be empty".to_string()));
        }

        if self.timeout.is_zero() {
            return Err(DepsError::Config("timeout must be greater than zero".to_string()));
        }

        Ok(())
    }
}
