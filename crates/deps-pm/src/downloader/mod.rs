//! Artifact downloading and extraction.
//!
//! The fetcher streams an Android archive to disk; the extractor pulls a
//! single named entry out of it.

mod archive;
mod file;

pub use archive::{ArchiveExtractor, ExtractedEntry};
pub use file::{DownloadResult, FileDownloader};
