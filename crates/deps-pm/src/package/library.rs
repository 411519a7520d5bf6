use crate::{DepsError, Result};

/// Check that a library name can be used both as a search query and as the
/// stem of the transient file names in the working directory.
pub fn validate_library_name(name: &str) -> Result<()> {
    let reason = if name.trim().is_empty() {
        Some("name is empty")
    } else if name.contains('/') || name.contains('\\') {
        Some("name must not contain path separators")
    } else if name == "." || name.contains("..") {
        Some("name must not contain '..'")
    } else if name.chars().any(char::is_control) {
        Some("name must not contain control characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(DepsError::InvalidLibraryName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
