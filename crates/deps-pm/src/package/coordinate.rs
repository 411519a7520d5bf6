use std::fmt;

/// A published artifact, identified by its `(group, artifact, version)` triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactCoordinate {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl ArtifactCoordinate {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }

    /// Group id as a repository path (`com.example` -> `com/example`)
    pub fn group_path(&self) -> String {
        self.group.replace('.', "/")
    }

    /// File name of the Android archive (`foo-1.2.3.aar`)
    pub fn aar_file_name(&self) -> String {
        format!("{}-{}.aar", self.artifact, self.version)
    }

    /// Download URL of the Android archive in a Maven 2 layout repository.
    pub fn aar_url(&self, repository_url: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            repository_url.trim_end_matches('/'),
            self.group_path(),
            self.artifact,
            self.version,
            self.aar_file_name()
        )
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}
