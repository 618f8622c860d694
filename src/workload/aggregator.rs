use super::roster::Roster;
use super::status::{classify, StatusColor, WorkloadStatus};
use crate::tasks::TaskRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// No member is ever reported above this share, so a single owner of all
/// assigned work still reads as rebalanceable.
pub const WORKLOAD_CEILING: f64 = 95.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadEntry {
    pub name: String,
    pub workload: u8,
    pub status: WorkloadStatus,
    pub tasks: usize,
    pub color: StatusColor,
}

impl WorkloadEntry {
    /// `share` is the capped, unrounded percentage. Status comes from the
    /// share; only the reported `workload` is rounded.
    pub fn from_share(name: impl Into<String>, share: f64, tasks: usize) -> Self {
        let status = classify(share);
        Self {
            name: name.into(),
            workload: share.round() as u8,
            status,
            tasks,
            color: status.color(),
        }
    }
}

/// Share of `total` held by `count`, in percent, capped at the ceiling.
pub fn workload_share(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 100.0 / total as f64).min(WORKLOAD_CEILING)
}

/// One entry per roster member, in roster order.
///
/// Only assigned tasks count toward the total; owners are matched to
/// members by exact, case-sensitive name.
pub fn aggregate(tasks: &[TaskRecord], roster: &Roster) -> Vec<WorkloadEntry> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut total = 0;
    for task in tasks.iter().filter(|task| task.is_assigned()) {
        *counts.entry(task.owner.as_str()).or_default() += 1;
        total += 1;
    }

    roster
        .members()
        .iter()
        .map(|member| {
            let count = counts.get(member.as_str()).copied().unwrap_or(0);
            WorkloadEntry::from_share(member.as_str(), workload_share(count, total), count)
        })
        .collect()
}
