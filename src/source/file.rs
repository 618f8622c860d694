use super::TaskSource;
use crate::error::SourceError;
use crate::tasks::GroupedTasks;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Grouped JSON snapshot on disk: `{ "owner": [task, ...], ... }`.
#[derive(Debug, Clone)]
pub struct FileTaskSource {
    path: PathBuf,
}

impl FileTaskSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Blank content and `null` both read as an empty mapping.
pub fn parse_grouped(content: &str, path: &Path) -> Result<GroupedTasks, SourceError> {
    if content.trim().is_empty() {
        return Ok(GroupedTasks::new());
    }
    let parsed: Option<GroupedTasks> =
        serde_json::from_str(content).map_err(|source| SourceError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(parsed.unwrap_or_default())
}

#[async_trait]
impl TaskSource for FileTaskSource {
    async fn load(&self) -> Result<GroupedTasks, SourceError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Read {
                path: self.path.clone(),
                source,
            })?;
        let grouped = parse_grouped(&content, &self.path)?;
        debug!(
            "Loaded {} owner groups from {}",
            grouped.len(),
            self.path.display()
        );
        Ok(grouped)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
