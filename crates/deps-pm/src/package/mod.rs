//! Artifact coordinates and library names.

mod coordinate;
mod library;

pub use coordinate::ArtifactCoordinate;
pub use library::validate_library_name;
