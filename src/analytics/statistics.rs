use crate::tasks::{GroupedTasks, TaskRecord};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

const DONE_STATUSES: [&str; 3] = ["complete", "done", "closed"];
const DUE_SOON_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
    pub overdue_tasks: usize,
    pub due_soon_tasks: usize,
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatistics {
    pub total_employees: usize,
    pub total_tasks: usize,
    pub employee_stats: IndexMap<String, EmployeeStats>,
}

pub fn is_completed(task: &TaskRecord) -> bool {
    let status = task.status.to_lowercase();
    DONE_STATUSES.contains(&status.as_str())
}

/// Per-owner progress figures relative to `now`.
pub fn task_statistics(grouped: &GroupedTasks, now: DateTime<Utc>) -> TaskStatistics {
    let mut employee_stats = IndexMap::new();
    let mut total_tasks = 0;

    for (owner, raw_tasks) in grouped {
        let tasks: Vec<TaskRecord> = raw_tasks
            .iter()
            .map(|raw| TaskRecord::from_raw(owner, raw))
            .collect();
        let stats = employee_stats_for(&tasks, now);
        total_tasks += stats.total_tasks;
        employee_stats.insert(owner.clone(), stats);
    }

    TaskStatistics {
        total_employees: grouped.len(),
        total_tasks,
        employee_stats,
    }
}

fn employee_stats_for(tasks: &[TaskRecord], now: DateTime<Utc>) -> EmployeeStats {
    let total_tasks = tasks.len();
    let completed_tasks = tasks.iter().filter(|task| is_completed(task)).count();
    let mut overdue_tasks = 0;
    let mut due_soon_tasks = 0;

    for task in tasks.iter().filter(|task| !is_completed(task)) {
        let Some(due) = task.due_date.as_ref().and_then(|due| due.to_datetime()) else {
            continue;
        };
        if due < now {
            overdue_tasks += 1;
        } else if (due - now).num_days() <= DUE_SOON_DAYS {
            due_soon_tasks += 1;
        }
    }

    let completion_rate = if total_tasks > 0 {
        let rate = completed_tasks as f64 / total_tasks as f64 * 100.0;
        (rate * 100.0).round() / 100.0
    } else {
        0.0
    };

    EmployeeStats {
        total_tasks,
        completed_tasks,
        pending_tasks: total_tasks - completed_tasks,
        overdue_tasks,
        due_soon_tasks,
        completion_rate,
    }
}
