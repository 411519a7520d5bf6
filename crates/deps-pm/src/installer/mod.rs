//! Installs extracted jars into the dependency folder.

use std::io;
use std::path::{Path, PathBuf};

use crate::{DepsError, Result};

/// Library installer for extracted jars
pub struct Installer {
    deps_dir: PathBuf,
}

impl Installer {
    pub fn new(deps_dir: impl Into<PathBuf>) -> Self {
        Self {
            deps_dir: deps_dir.into(),
        }
    }

    /// Get the install path for a jar
    pub fn install_path(&self, jar: &Path) -> Result<PathBuf> {
        let file_name = jar.file_name().ok_or_else(|| {
            DepsError::fs(jar, io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))
        })?;
        Ok(self.deps_dir.join(file_name))
    }

    /// Create the dependency directory if it does not exist.
    ///
    /// Only the directory itself is created; a missing parent is an error.
    pub fn ensure_deps_dir(&self) -> Result<()> {
        if self.deps_dir.is_dir() {
            return Ok(());
        }

        match std::fs::create_dir(&self.deps_dir) {
            Ok(()) => {
                log::debug!("Created {}", self.deps_dir.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && self.deps_dir.is_dir() => Ok(()),
            Err(e) => Err(DepsError::fs(&self.deps_dir, e)),
        }
    }

    /// Move `jar` into the dependency directory, replacing any file of the same name.
    pub fn install(&self, jar: &Path) -> Result<PathBuf> {
        let target = self.install_path(jar)?;

        if let Err(e) = std::fs::rename(jar, &target) {
            // rename(2) cannot cross filesystems, and on Windows it refuses to replace.
            if !jar.is_file() {
                return Err(DepsError::fs(jar, e));
            }
            log::debug!("Rename {} failed ({}), copying instead", jar.display(), e);
            std::fs::copy(jar, &target).map_err(|e| DepsError::fs(&target, e))?;
            std::fs::remove_file(jar).map_err(|e| DepsError::fs(jar, e))?;
        }

        log::debug!("Installed {}", target.display());
        Ok(target)
    }

    /// Delete a transient file. A file that is already gone is not an error.
    pub fn remove_transient(path: &Path) -> Result<()> {
        match std::fs::remove_file(path) {
            Ok(()) => {
                log::debug!("Removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DepsError::fs(path, e)),
        }
    }
}
