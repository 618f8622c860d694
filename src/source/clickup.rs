use super::TaskSource;
use crate::clickup::ClickUpClient;
use crate::error::SourceError;
use crate::tasks::{organize_by_assignee, GroupedTasks};
use async_trait::async_trait;
use tracing::info;

/// Live snapshot of one upstream list, grouped by first assignee.
#[derive(Debug, Clone)]
pub struct ClickUpTaskSource {
    client: ClickUpClient,
    list_id: String,
}

impl ClickUpTaskSource {
    pub fn new(client: ClickUpClient, list_id: impl Into<String>) -> Self {
        Self {
            client,
            list_id: list_id.into(),
        }
    }
}

#[async_trait]
impl TaskSource for ClickUpTaskSource {
    async fn load(&self) -> Result<GroupedTasks, SourceError> {
        let tasks = self.client.list_tasks(&self.list_id).await?;
        info!("Fetched {} tasks from list {}", tasks.len(), self.list_id);
        Ok(organize_by_assignee(&tasks))
    }

    fn describe(&self) -> String {
        format!("ClickUp list {}", self.list_id)
    }
}
