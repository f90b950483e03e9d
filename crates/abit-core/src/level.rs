//! Admission track selection.

use serde::{Deserialize, Serialize};

/// Admission track that scopes which knowledge index is searched.
///
/// Passed in by the caller on every invocation; the core never persists it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Bachelor,
    Master,
    /// Unrecognized or absent level: the shared default index.
    Default,
}

impl Level {
    /// Lenient parse of the caller-supplied level. Anything unrecognized
    /// falls back to [`Level::Default`].
    pub fn parse(level: Option<&str>) -> Self {
        match level.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("bachelor") => Level::Bachelor,
            Some("master") => Level::Master,
            _ => Level::Default,
        }
    }

    /// Directory name of this level's index under the configured index root.
    pub fn index_dir_name(&self) -> &'static str {
        match self {
            Level::Bachelor => "knowledge_index_bachelor",
            Level::Master => "knowledge_index_master",
            Level::Default => "knowledge_index",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Bachelor => "bachelor",
            Level::Master => "master",
            Level::Default => "default",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_lenient() {
        assert_eq!(Level::parse(Some("bachelor")), Level::Bachelor);
        assert_eq!(Level::parse(Some(" Master ")), Level::Master);
        assert_eq!(Level::parse(Some("phd")), Level::Default);
        assert_eq!(Level::parse(Some("")), Level::Default);
        assert_eq!(Level::parse(None), Level::Default);
    }

    #[test]
    fn each_level_has_its_own_directory() {
        assert_eq!(Level::Bachelor.index_dir_name(), "knowledge_index_bachelor");
        assert_eq!(Level::Master.index_dir_name(), "knowledge_index_master");
        assert_eq!(Level::Default.index_dir_name(), "knowledge_index");
    }
}
