pub mod filter;
pub mod statistics;

pub use filter::{Selection, TaskFilter, TaskFilterParams};
pub use statistics::{task_statistics, EmployeeStats, TaskStatistics};

use crate::tasks::TaskRecord;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub name: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerCount {
    pub employee: String,
    pub count: usize,
}

/// Distinct values offered by each filter dimension, first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub statuses: Vec<String>,
    pub priorities: Vec<String>,
    pub employees: Vec<String>,
}

fn count_by<'a>(tasks: &'a [TaskRecord], key: impl Fn(&'a TaskRecord) -> &'a str) -> IndexMap<&'a str, usize> {
    let mut counts = IndexMap::new();
    for task in tasks {
        *counts.entry(key(task)).or_insert(0) += 1;
    }
    counts
}

fn distinct<'a>(tasks: &'a [TaskRecord], key: impl Fn(&'a TaskRecord) -> &'a str) -> Vec<String> {
    tasks
        .iter()
        .map(key)
        .collect::<IndexSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Everything the dashboard's analytics panel shows for one task set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAnalytics {
    pub status_distribution: Vec<StatusCount>,
    pub tasks_by_owner: Vec<OwnerCount>,
    pub filter_options: FilterOptions,
}

impl TaskAnalytics {
    pub fn from_tasks(tasks: &[TaskRecord]) -> Self {
        Self {
            status_distribution: status_distribution(tasks),
            tasks_by_owner: tasks_by_owner(tasks),
            filter_options: filter_options(tasks),
        }
    }
}

pub fn status_distribution(tasks: &[TaskRecord]) -> Vec<StatusCount> {
    count_by(tasks, |task| task.status.as_str())
        .into_iter()
        .map(|(name, value)| StatusCount {
            name: name.to_string(),
            value,
        })
        .collect()
}

pub fn tasks_by_owner(tasks: &[TaskRecord]) -> Vec<OwnerCount> {
    count_by(tasks, TaskRecord::owner_or_unassigned)
        .into_iter()
        .map(|(employee, count)| OwnerCount {
            employee: employee.to_string(),
            count,
        })
        .collect()
}

pub fn filter_options(tasks: &[TaskRecord]) -> FilterOptions {
    FilterOptions {
        statuses: distinct(tasks, |task| task.status.as_str()),
        priorities: distinct(tasks, TaskRecord::priority_or_none),
        employees: distinct(tasks, TaskRecord::owner_or_unassigned),
    }
}
