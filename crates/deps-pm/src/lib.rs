//! Fetch the compiled classes of an Android library from Maven Central.
//!
//! A [`Pipeline`] resolves a library name through the search API, downloads
//! the `.aar`, pulls `classes.jar` out of it and installs it as
//! `deps/<name>.jar`.

pub mod config;
pub mod downloader;
pub mod error;
pub mod http;
pub mod installer;
pub mod package;
pub mod pipeline;
pub mod repository;
pub mod util;

pub use config::PipelineConfig;
pub use downloader::{ArchiveExtractor, DownloadResult, ExtractedEntry, FileDownloader};
pub use error::{DepsError, ErrorKind, Result};
pub use installer::Installer;
pub use package::ArtifactCoordinate;
pub use pipeline::{InstallReport, Pipeline, PipelineListener, Stage};
pub use repository::MavenSearch;
