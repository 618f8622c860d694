//! Team workload summary: per-member load over a fixed roster plus a
//! single balancing suggestion.

pub mod advisor;
pub mod aggregator;
pub mod roster;
pub mod status;

pub use advisor::suggest;
pub use aggregator::{aggregate, WorkloadEntry};
pub use roster::Roster;
pub use status::{classify, StatusColor, WorkloadStatus};

use crate::tasks::TaskRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadReport {
    pub members: Vec<WorkloadEntry>,
    pub suggestion: String,
}

impl WorkloadReport {
    pub fn compute(tasks: &[TaskRecord], roster: &Roster) -> Self {
        let members = aggregate(tasks, roster);
        let suggestion = suggest(&members);
        Self { members, suggestion }
    }

    pub fn member(&self, name: &str) -> Option<&WorkloadEntry> {
        self.members.iter().find(|entry| entry.name == name)
    }

    /// Plain-text rendering used by the CLI.
    pub fn render(&self) -> String {
        let name_width = self
            .members
            .iter()
            .map(|entry| entry.name.chars().count())
            .max()
            .unwrap_or(0)
            .max(4);

        let mut lines = vec!["⚖️ Team Workload Balance".to_string(), String::new()];
        for entry in &self.members {
            let filled = (usize::from(entry.workload) / 5).min(20);
            lines.push(format!(
                "{:<width$}  [{}{}] {:>3}%  {} {} • {} tasks",
                entry.name,
                "#".repeat(filled),
                ".".repeat(20 - filled),
                entry.workload,
                entry.status.icon(),
                entry.status,
                entry.tasks,
                width = name_width
            ));
        }
        lines.push(String::new());
        lines.push(format!("💡 {}", self.suggestion));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::{normalize, GroupedTasks, UNASSIGNED};
    use serde_json::json;

    fn grouped(value: serde_json::Value) -> GroupedTasks {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_report_for_nine_to_one_split() {
        let roster = Roster::new(["A", "B", "C", "D", "E"]);
        let mut tasks: Vec<TaskRecord> = (0..9).map(|i| TaskRecord::new(format!("a{}", i), "A")).collect();
        tasks.push(TaskRecord::new("b0", "B"));

        let report = WorkloadReport::compute(&tasks, &roster);

        assert_eq!(report.member("A").map(|e| e.workload), Some(90));
        assert_eq!(report.member("B").map(|e| e.status), Some(WorkloadStatus::Available));
        assert_eq!(
            report.suggestion,
            "A has a high workload. Consider reassigning some tasks to B to balance the team."
        );
    }

    #[test]
    fn test_just_below_overloaded_suggests_available_member() {
        let roster = Roster::new(["A", "B", "C"]);
        let mut tasks: Vec<TaskRecord> = (0..43).map(|i| TaskRecord::new(format!("a{}", i), "A")).collect();
        tasks.extend((0..5).map(|i| TaskRecord::new(format!("b{}", i), "B")));

        let report = WorkloadReport::compute(&tasks, &roster);

        assert_eq!(report.member("A").map(|e| e.workload), Some(90));
        assert_eq!(report.member("A").map(|e| e.status), Some(WorkloadStatus::InFocus));
        assert_eq!(
            report.suggestion,
            "B is available and can take on more tasks to help balance the team workload."
        );
    }

    #[test]
    fn test_only_unassigned_tasks_reads_all_available() {
        let records = normalize(&grouped(json!({
            UNASSIGNED: [{"name": "triage"}, {"name": "cleanup"}]
        })));

        let report = WorkloadReport::compute(&records, &Roster::default());

        assert!(report.members.iter().all(|e| e.workload == 0 && e.status == WorkloadStatus::Available));
        assert_eq!(report.suggestion, advisor::ALL_AVAILABLE);
    }

    #[test]
    fn test_recompute_is_byte_identical() {
        let records = normalize(&grouped(json!({
            "User 1": [{"name": "a"}, {"name": "b"}, {"name": "c"}],
            "User 2": [{"name": "d"}],
            "Unassigned": [{"name": "e"}]
        })));
        let roster = Roster::default();

        let first = serde_json::to_string(&WorkloadReport::compute(&records, &roster)).unwrap();
        let second = serde_json::to_string(&WorkloadReport::compute(&records, &roster)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_serialized_shape() {
        let report = WorkloadReport::compute(&[TaskRecord::new("a", "User 3")], &Roster::default());
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["members"][2]["name"], "User 3");
        assert_eq!(value["members"][2]["workload"], 95);
        assert_eq!(value["members"][2]["status"], "Overloaded");
        assert_eq!(value["members"][2]["tasks"], 1);
        assert_eq!(value["members"][2]["color"], "red");
        assert_eq!(
            value["suggestion"],
            "User 3 has a high workload. Consider reassigning some tasks to User 1 to balance the team."
        );
    }

    #[test]
    fn test_render_lists_every_member() {
        let report = WorkloadReport::compute(&[], &Roster::new(["Ana", "Ben"]));
        let text = report.render();

        assert!(text.contains("Ana "));
        assert!(text.contains("Ben "));
        assert!(text.contains("Available • 0 tasks"));
        assert!(text.ends_with(advisor::ALL_AVAILABLE));
    }
}
