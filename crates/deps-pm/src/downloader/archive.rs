//! Single-entry extraction from zip containers.
//!
//! Android archives are zip files; the compiled classes live in one entry
//! (`classes.jar`) that is copied out verbatim.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::{DepsError, Result};

const COPY_BUFFER_SIZE: usize = 8 * 1024;

/// An entry written out of an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEntry {
    pub name: String,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Archive extractor
pub struct ArchiveExtractor;

impl ArchiveExtractor {
    fn open(archive_path: &Path) -> Result<zip::ZipArchive<BufReader<File>>> {
        let file = File::open(archive_path).map_err(|e| DepsError::fs(archive_path, e))?;
        zip::ZipArchive::new(BufReader::new(file)).map_err(|e| DepsError::InvalidArchive {
            path: archive_path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Entry names in container order
    pub fn list_entries(archive_path: &Path) -> Result<Vec<String>> {
        let archive = Self::open(archive_path)?;
        Ok(entry_names(&archive))
    }

    /// Copy the first entry named exactly `entry_name` to `dest`.
    ///
    /// Entries are scanned in container order. When none matches, no output
    /// file is created and [`DepsError::ArchiveEntryMissing`] is returned.
    pub fn extract_entry(archive_path: &Path, entry_name: &str, dest: &Path) -> Result<ExtractedEntry> {
        let mut archive = Self::open(archive_path)?;

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).map_err(|e| DepsError::InvalidArchive {
                path: archive_path.to_path_buf(),
                reason: format!("failed to read entry {}: {}", i, e),
            })?;

            if entry.is_dir() || entry.name() != entry_name {
                continue;
            }

            let bytes = Self::copy_entry(&mut entry, dest).map_err(|e| {
                // Do not leave a truncated jar behind.
                let _ = std::fs::remove_file(dest);
                e
            })?;
            log::debug!(
                "Extracted {} ({} bytes) from {} to {}",
                entry_name,
                bytes,
                archive_path.display(),
                dest.display()
            );

            return Ok(ExtractedEntry {
                name: entry_name.to_string(),
                path: dest.to_path_buf(),
                bytes,
            });
        }

        log::debug!(
            "No {} in {} (entries: {:?})",
            entry_name,
            archive_path.display(),
            entry_names(&archive)
        );

        Err(DepsError::ArchiveEntryMissing {
            entry: entry_name.to_string(),
            archive: archive_path.to_path_buf(),
        })
    }

    fn copy_entry<R: Read>(reader: &mut R, dest: &Path) -> Result<u64> {
        let file = File::create(dest).map_err(|e| DepsError::fs(dest, e))?;
        let mut writer = BufWriter::new(file);
        let mut buffer = [0u8; COPY_BUFFER_SIZE];
        let mut written: u64 = 0;

        loop {
            let read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            writer.write_all(&buffer[..read]).map_err(|e| DepsError::fs(dest, e))?;
            written += read as u64;
        }

        writer.flush().map_err(|e| DepsError::fs(dest, e))?;
        Ok(written)
    }
}

fn entry_names<R: Read + std::io::Seek>(archive: &zip::ZipArchive<R>) -> Vec<String> {
    (0..archive.len())
        .filter_map(|i| archive.name_for_index(i).map(str::to_string))
        .collect()
}
