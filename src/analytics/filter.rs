use crate::tasks::TaskRecord;
use serde::{Deserialize, Serialize};

/// One filter dimension: everything, or a single exact value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// `None`, empty and the literal `All` all mean no restriction.
    pub fn from_option(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some("All") => Selection::All,
            Some(value) => Selection::Only(value.to_string()),
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

/// Filter state for a task listing. Owned by the caller and passed in
/// explicitly on every query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskFilter {
    pub status: Selection,
    pub priority: Selection,
    pub employee: Selection,
}

/// Query-string form of [`TaskFilter`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskFilterParams {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub employee: Option<String>,
}

impl From<&TaskFilterParams> for TaskFilter {
    fn from(params: &TaskFilterParams) -> Self {
        Self {
            status: Selection::from_option(params.status.as_deref()),
            priority: Selection::from_option(params.priority.as_deref()),
            employee: Selection::from_option(params.employee.as_deref()),
        }
    }
}

impl TaskFilter {
    /// Absent priorities match `"None"`, absent owners match `"Unassigned"`.
    pub fn matches(&self, task: &TaskRecord) -> bool {
        self.status.matches(&task.status)
            && self.priority.matches(task.priority_or_none())
            && self.employee.matches(task.owner_or_unassigned())
    }

    pub fn apply<'a>(&self, tasks: &'a [TaskRecord]) -> Vec<&'a TaskRecord> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }
}
