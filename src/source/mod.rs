//! Where task snapshots come from. Every `load` returns a fresh,
//! complete snapshot; nothing is cached between calls.

pub mod clickup;
pub mod file;

pub use self::clickup::ClickUpTaskSource;
pub use file::FileTaskSource;

use crate::error::SourceError;
use crate::tasks::GroupedTasks;
use async_trait::async_trait;

#[async_trait]
pub trait TaskSource: Send + Sync {
    async fn load(&self) -> Result<GroupedTasks, SourceError>;
    fn describe(&self) -> String;
}

/// Used when no data source is configured.
#[derive(Debug, Clone, Default)]
pub struct EmptyTaskSource;

#[async_trait]
impl TaskSource for EmptyTaskSource {
    async fn load(&self) -> Result<GroupedTasks, SourceError> {
        Ok(GroupedTasks::new())
    }

    fn describe(&self) -> String {
        "no task data configured".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_yields_empty_mapping() {
        let source = EmptyTaskSource;
        let grouped = tokio_test::block_on(source.load()).unwrap();
        assert!(grouped.is_empty());
        assert_eq!(source.describe(), "no task data configured");
    }
}
