//! downloadSearch command - fetch a library's classes.jar into deps/.

use anyhow::{Context, Result};
use clap::Args;
use indicatif::ProgressBar;
use std::cell::OnceCell;
use std::path::PathBuf;
use std::time::Duration;

use deps_pm::config::{DEFAULT_DEPS_DIR, DEFAULT_ENTRY_NAME, DEFAULT_REPOSITORY_URL, DEFAULT_SEARCH_URL};
use deps_pm::util::format_bytes;
use deps_pm::{ArtifactCoordinate, DepsError, Pipeline, PipelineConfig, PipelineListener, Stage};

use crate::output::Output;
use crate::progress::ProgressManager;

#[derive(Args, Debug)]
pub struct DownloadSearchArgs {
    /// Library to search for, written as a flag (e.g. --okhttp).
    /// Names that collide with an option (--quiet, --entry, ...) need --library.
    #[arg(
        value_name = "--LIBRARY",
        allow_hyphen_values = true,
        value_parser = parse_library_flag,
        required_unless_present = "library",
        conflicts_with = "library"
    )]
    pub library_flag: Option<String>,

    /// Library to search for, given as a plain name
    #[arg(long, value_name = "NAME", value_parser = parse_library_name)]
    pub library: Option<String>,

    /// Search endpoint
    #[arg(long, value_name = "URL", default_value = DEFAULT_SEARCH_URL)]
    pub search_url: String,

    /// Maven repository base URL
    #[arg(long, value_name = "URL", default_value = DEFAULT_REPOSITORY_URL)]
    pub repository_url: String,

    /// Budget for search and download, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 5000)]
    pub timeout_ms: u64,

    /// Destination folder for the extracted jar
    #[arg(long, value_name = "DIR", default_value = DEFAULT_DEPS_DIR)]
    pub deps_dir: PathBuf,

    /// Archive entry to extract
    #[arg(long, value_name = "NAME", default_value = DEFAULT_ENTRY_NAME)]
    pub entry: String,

    /// Hide the download progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Working directory
    #[arg(short = 'd', long, default_value = ".")]
    pub working_dir: PathBuf,
}

/// Strip the leading `--` from the library argument.
pub fn parse_library_flag(value: &str) -> Result<String, String> {
    let name = value
        .strip_prefix("--")
        .ok_or_else(|| format!("expected --<library_name>, got {:?}", value))?;

    parse_library_name(name)
}

pub fn parse_library_name(value: &str) -> Result<String, String> {
    deps_pm::package::validate_library_name(value).map_err(|e| e.to_string())?;
    Ok(value.to_string())
}

impl DownloadSearchArgs {
    /// The requested library, from `--library` or the flag-shaped argument.
    pub fn library_name(&self) -> Option<&str> {
        self.library.as_deref().or(self.library_flag.as_deref())
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new()
            .with_search_url(&self.search_url)
            .with_repository_url(&self.repository_url)
            .with_timeout(Duration::from_millis(self.timeout_ms))
            .with_deps_dir(&self.deps_dir)
            .with_entry_name(&self.entry)
            .with_work_dir(&self.working_dir)
    }
}

/// Reports pipeline progress on the terminal.
struct TerminalListener {
    output: Output,
    progress: ProgressManager,
    archive_name: String,
    // Created once the search has resolved the library.
    bar: OnceCell<ProgressBar>,
}

impl TerminalListener {
    fn new(output: &Output, progress: ProgressManager, library: &str) -> Self {
        Self {
            output: output.clone(),
            progress,
            archive_name: format!("{}.aar", library),
            bar: OnceCell::new(),
        }
    }

    fn clear_bar(&self) {
        if let Some(bar) = self.bar.get() {
            bar.finish_and_clear();
        }
    }
}

impl PipelineListener for TerminalListener {
    fn stage(&self, stage: Stage) {
        if stage == Stage::Downloaded {
            self.clear_bar();
        }
        self.output.verbose(&format!("  [{}]", stage));
    }

    fn resolved(&self, coordinate: &ArtifactCoordinate, url: &str) {
        self.output.info(&format!("Found {}", coordinate));
        self.output.verbose(&format!("  Downloading {}", url));
        self.bar
            .get_or_init(|| self.progress.create_download_bar(&self.archive_name));
    }

    fn download_progress(&self, downloaded: u64, total: u64) {
        let Some(bar) = self.bar.get() else {
            return;
        };
        if total > 0 && bar.length() != Some(total) {
            bar.set_length(total);
        }
        bar.set_position(downloaded);
    }

    fn failed(&self, last_stage: Stage, _error: &DepsError) {
        self.clear_bar();
        self.output.verbose(&format!("  [failed after {}]", last_stage));
    }
}

pub fn execute(args: DownloadSearchArgs, output: &Output) -> Result<i32> {
    let library = args
        .library_name()
        .map(str::to_string)
        .context("No library given")?;
    let config = args.pipeline_config();

    let progress = ProgressManager::new(!args.no_progress && !output.is_quiet());
    let listener = TerminalListener::new(output, progress, &library);

    let pipeline = Pipeline::new(config)
        .context("Invalid configuration")?
        .with_listener(Box::new(listener));

    output.info(&format!("Searching Maven Central for {}...", library));

    match pipeline.run(&library) {
        Ok(report) => {
            output.verbose(&format!(
                "  {} archive, {} jar, {:?}",
                format_bytes(report.archive_bytes),
                format_bytes(report.jar_bytes),
                report.elapsed
            ));
            output.success("Dependency downloaded and processed successfully!");
            output.writeln(&format!("  {}", report.installed_path.display()));
            Ok(0)
        }
        Err(DepsError::NotFound { .. }) => {
            output.warning("Library not found in Maven Central.");
            Ok(1)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to fetch {}", library)),
    }
}
