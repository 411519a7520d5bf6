//! The search → download → rename → extract → move → cleanup sequence.
//!
//! Stages run strictly in order on the calling thread. Any failure aborts the
//! remaining stages; files produced by the failed run are removed again, while
//! the dependency folder is left as it was.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::config::PipelineConfig;
use crate::downloader::{ArchiveExtractor, FileDownloader};
use crate::http::{HttpClient, HttpClientConfig};
use crate::installer::Installer;
use crate::package::{validate_library_name, ArtifactCoordinate};
use crate::repository::MavenSearch;
use crate::util::Deadline;
use crate::{DepsError, Result};

/// Pipeline states, in the order they are reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Start,
    Searched,
    Downloaded,
    TimeChecked,
    Renamed,
    Extracted,
    FolderEnsured,
    Moved,
    Cleaned,
    Done,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Start => "start",
            Stage::Searched => "searched",
            Stage::Downloaded => "downloaded",
            Stage::TimeChecked => "time-checked",
            Stage::Renamed => "renamed",
            Stage::Extracted => "extracted",
            Stage::FolderEnsured => "folder-ensured",
            Stage::Moved => "moved",
            Stage::Cleaned => "cleaned",
            Stage::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observer for pipeline progress. All methods default to no-ops.
pub trait PipelineListener {
    /// A stage has been reached.
    fn stage(&self, _stage: Stage) {}

    /// The library name resolved to a coordinate.
    fn resolved(&self, _coordinate: &ArtifactCoordinate, _url: &str) {}

    /// Bytes written so far and the announced total (0 when unknown).
    fn download_progress(&self, _downloaded: u64, _total: u64) {}

    /// The pipeline failed after reaching `last_stage`.
    fn failed(&self, _last_stage: Stage, _error: &DepsError) {}
}

/// Summary of a successful run
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub library: String,
    pub coordinate: ArtifactCoordinate,
    pub url: String,
    pub installed_path: PathBuf,
    /// Size of the downloaded archive
    pub archive_bytes: u64,
    /// Size of the installed jar
    pub jar_bytes: u64,
    /// Resolve + download time
    pub elapsed: Duration,
}

/// Removes the files a run produced unless disarmed.
struct TransientFiles {
    paths: Vec<PathBuf>,
    armed: bool,
}

impl TransientFiles {
    fn new() -> Self {
        Self {
            paths: Vec::new(),
            armed: true,
        }
    }

    fn track(&mut self, path: &Path) {
        self.paths.push(path.to_path_buf());
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for TransientFiles {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        for path in &self.paths {
            if let Err(e) = Installer::remove_transient(path) {
                log::warn!("Failed to clean up {}: {}", path.display(), e);
            }
        }
    }
}

pub struct Pipeline {
    config: PipelineConfig,
    search: MavenSearch,
    downloader: FileDownloader,
    installer: Installer,
    listener: Option<Box<dyn PipelineListener>>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;

        let http_config = HttpClientConfig::new()
            .with_timeout(config.timeout)
            .with_connect_timeout(config.connect_timeout)
            .with_user_agent(config.user_agent.clone());
        let client = Arc::new(HttpClient::with_config(http_config)?);

        Ok(Self {
            search: MavenSearch::new(Arc::clone(&client), config.search_url.clone()),
            downloader: FileDownloader::new(client, config.repository_url.clone()),
            installer: Installer::new(config.deps_path()),
            config,
            listener: None,
        })
    }

    pub fn with_listener(mut self, listener: Box<dyn PipelineListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Resolve `library`, fetch its Android archive and install the extracted jar.
    pub fn run(&self, library: &str) -> Result<InstallReport> {
        validate_library_name(library)?;

        let mut stage = Stage::Start;
        let mut transients = TransientFiles::new();
        self.notify_stage(stage);

        match self.run_stages(library, &mut stage, &mut transients) {
            Ok(report) => {
                transients.disarm();
                Ok(report)
            }
            Err(e) => {
                log::debug!("Pipeline for {} failed after stage {}: {}", library, stage, e);
                if let Some(listener) = &self.listener {
                    listener.failed(stage, &e);
                }
                Err(e)
            }
        }
    }

    fn run_stages(
        &self,
        library: &str,
        stage: &mut Stage,
        transients: &mut TransientFiles,
    ) -> Result<InstallReport> {
        // The budget covers the search as well as the transfer.
        let deadline = Deadline::start(self.config.timeout);

        let coordinate = self.search.resolve(library, Some(&deadline))?;
        let url = self.downloader.url_for(&coordinate);
        log::info!("Resolved {} to {}", library, coordinate);
        if let Some(listener) = &self.listener {
            listener.resolved(&coordinate, &url);
        }
        self.advance(stage, Stage::Searched);

        let aar_path = self.config.transient_path(library, "aar");
        let progress = |downloaded: u64, total: u64| {
            if let Some(listener) = &self.listener {
                listener.download_progress(downloaded, total);
            }
        };
        let download = self
            .downloader
            .download(&coordinate, &aar_path, &deadline, Some(progress))?;
        transients.track(&aar_path);
        self.advance(stage, Stage::Downloaded);

        deadline.check()?;
        log::debug!(
            "Fetched {} bytes in {:?} (budget {:?})",
            download.bytes,
            download.elapsed,
            deadline.budget()
        );
        self.advance(stage, Stage::TimeChecked);

        let zip_path = self.config.transient_path(library, "zip");
        Installer::remove_transient(&zip_path)?;
        std::fs::rename(&aar_path, &zip_path).map_err(|e| DepsError::fs(&aar_path, e))?;
        transients.track(&zip_path);
        self.advance(stage, Stage::Renamed);

        let jar_path = self.config.transient_path(library, "jar");
        let entry = ArchiveExtractor::extract_entry(&zip_path, &self.config.entry_name, &jar_path)?;
        transients.track(&jar_path);
        self.advance(stage, Stage::Extracted);

        self.installer.ensure_deps_dir()?;
        self.advance(stage, Stage::FolderEnsured);

        let installed_path = self.installer.install(&jar_path)?;
        self.advance(stage, Stage::Moved);

        Installer::remove_transient(&zip_path)?;
        self.advance(stage, Stage::Cleaned);

        self.advance(stage, Stage::Done);
        log::info!("Installed {} as {}", coordinate, installed_path.display());

        Ok(InstallReport {
            library: library.to_string(),
            coordinate,
            url: download.url,
            installed_path,
            archive_bytes: download.bytes,
            jar_bytes: entry.bytes,
            elapsed: download.elapsed,
        })
    }

    fn advance(&self, stage: &mut Stage, next: Stage) {
        *stage = next;
        self.notify_stage(next);
    }

    fn notify_stage(&self, stage: Stage) {
        log::debug!("Stage: {}", stage);
        if let Some(listener) = &self.listener {
            listener.stage(stage);
        }
    }
}
