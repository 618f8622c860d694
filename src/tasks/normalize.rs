use super::types::{GroupedTasks, TaskRecord};

/// Flattens owner-grouped raw tasks into task records.
///
/// Output order is the mapping order, then each owner's array order. The
/// mapping key is copied onto every record and wins over any owner-like
/// field already present on the raw object.
pub fn normalize(grouped: &GroupedTasks) -> Vec<TaskRecord> {
    grouped
        .iter()
        .flat_map(|(owner, raw_tasks)| {
            raw_tasks
                .iter()
                .map(move |raw| TaskRecord::from_raw(owner, raw))
        })
        .collect()
}
