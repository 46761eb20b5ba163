use crate::error::{NotebookError, NotebookResult};
use std::str::FromStr;

/// A dotted numeric version such as `2.90.0`.
///
/// Ordering is segment by segment; when one version is a prefix of the other
/// the shorter one sorts first, so `2.9 < 2.9.0`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionTuple(Vec<u64>);

impl VersionTuple {
    /// Parses `version`, rejecting any segment that is not an unsigned integer
    /// (pre-release suffixes like `2.90.0rc1` included).
    pub fn parse(version: &str) -> NotebookResult<Self> {
        let trimmed = version.trim();
        if trimmed.is_empty() {
            return Err(NotebookError::MalformedVersion(version.to_string()));
        }

        trimmed
            .split('.')
            .map(|segment| segment.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
            .map_err(|_| NotebookError::MalformedVersion(version.to_string()))
    }

    pub fn segments(&self) -> &[u64] {
        &self.0
    }
}

impl FromStr for VersionTuple {
    type Err = NotebookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for VersionTuple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self.0.iter().map(u64::to_string).collect::<Vec<_>>().join(".");
        f.write_str(&joined)
    }
}
