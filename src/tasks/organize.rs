use super::types::{GroupedTasks, UNASSIGNED};
use serde_json::{json, Map, Value};
use tracing::warn;

/// Groups tasks in the upstream API shape by their first assignee and
/// flattens each into the dashboard's task object layout.
pub fn organize_by_assignee(api_tasks: &[Value]) -> GroupedTasks {
    let mut grouped = GroupedTasks::new();

    for task in api_tasks {
        let Some(fields) = task.as_object() else {
            warn!("Skipping invalid task entry: {}", task);
            continue;
        };

        let assignee = first_assignee(fields);
        grouped
            .entry(assignee)
            .or_default()
            .push(dashboard_task(fields));
    }

    grouped
}

fn first_assignee(fields: &Map<String, Value>) -> String {
    match fields
        .get("assignees")
        .and_then(Value::as_array)
        .and_then(|assignees| assignees.first())
    {
        Some(assignee) => nested_str(Some(assignee), "username")
            .unwrap_or("Unknown")
            .to_string(),
        None => UNASSIGNED.to_string(),
    }
}

fn nested_str<'a>(value: Option<&'a Value>, key: &str) -> Option<&'a str> {
    value.and_then(|v| v.get(key)).and_then(Value::as_str)
}

fn copied(fields: &Map<String, Value>, key: &str) -> Value {
    fields.get(key).cloned().unwrap_or(Value::Null)
}

fn dashboard_task(fields: &Map<String, Value>) -> Value {
    let tags: Vec<Value> = fields
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter(|tag| !tag.is_null())
                .map(|tag| json!(nested_str(Some(tag), "name").unwrap_or("")))
                .collect()
        })
        .unwrap_or_default();

    let mut task = json!({
        "id": fields.get("id").cloned().unwrap_or_else(|| json!("")),
        "name": fields.get("name").cloned().unwrap_or_else(|| json!("Untitled Task")),
        "description": fields.get("description").cloned().unwrap_or_else(|| json!("")),
        "status": nested_str(fields.get("status"), "status").unwrap_or("Unknown"),
        "priority": nested_str(fields.get("priority"), "priority").unwrap_or("Normal"),
        "due_date": copied(fields, "due_date"),
        "date_created": copied(fields, "date_created"),
        "date_updated": copied(fields, "date_updated"),
        "date_closed": copied(fields, "date_closed"),
        "url": fields.get("url").cloned().unwrap_or_else(|| json!("")),
        "tags": tags,
        "time_estimate": copied(fields, "time_estimate"),
        "time_spent": copied(fields, "time_spent"),
        "creator": nested_str(fields.get("creator"), "username").unwrap_or("Unknown"),
    });

    if let Some(custom_fields) = fields.get("custom_fields").and_then(Value::as_array) {
        if !custom_fields.is_empty() {
            let by_name: Map<String, Value> = custom_fields
                .iter()
                .map(|field| {
                    let name = nested_str(Some(field), "name").unwrap_or("Unknown Field");
                    let value = field.get("value").cloned().unwrap_or_else(|| json!(""));
                    (name.to_string(), value)
                })
                .collect();
            task["custom_fields"] = Value::Object(by_name);
        }
    }

    task
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::normalize;

    fn api_task(id: &str, assignees: Value) -> Value {
        json!({
            "id": id,
            "name": format!("Task {}", id),
            "status": {"status": "in progress"},
            "priority": {"priority": "high"},
            "assignees": assignees,
            "due_date": "1735689599000",
            "tags": [{"name": "bug"}, null, {"name": "frontend"}],
            "creator": {"username": "lead"},
            "custom_fields": [{"name": "Sprint", "value": 12}]
        })
    }

    #[test]
    fn test_groups_by_first_assignee() {
        let tasks = vec![
            api_task("1", json!([{"username": "User 1"}, {"username": "User 2"}])),
            api_task("2", json!([])),
            api_task("3", json!([{"username": "User 1"}])),
            api_task("4", json!([{"id": 9}])),
        ];

        let grouped = organize_by_assignee(&tasks);

        let owners: Vec<&str> = grouped.keys().map(String::as_str).collect();
        assert_eq!(owners, vec!["User 1", UNASSIGNED, "Unknown"]);
        assert_eq!(grouped["User 1"].len(), 2);
        assert_eq!(grouped["User 1"][1]["id"], "3");
    }

    #[test]
    fn test_flattens_nested_fields() {
        let grouped = organize_by_assignee(&[api_task("7", json!([{"username": "User 3"}]))]);
        let task = &grouped["User 3"][0];

        assert_eq!(task["status"], "in progress");
        assert_eq!(task["priority"], "high");
        assert_eq!(task["tags"], json!(["bug", "frontend"]));
        assert_eq!(task["creator"], "lead");
        assert_eq!(task["custom_fields"]["Sprint"], 12);
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let grouped = organize_by_assignee(&[json!({}), json!(null), json!("junk")]);
        let task = &grouped[UNASSIGNED][0];

        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[UNASSIGNED].len(), 1);
        assert_eq!(task["name"], "Untitled Task");
        assert_eq!(task["status"], "Unknown");
        assert_eq!(task["priority"], "Normal");
        assert_eq!(task["creator"], "Unknown");
        assert!(task.get("custom_fields").is_none());
    }

    #[test]
    fn test_output_feeds_normalizer() {
        let grouped = organize_by_assignee(&[api_task("1", json!([{"username": "User 2"}]))]);
        let records = normalize(&grouped);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].owner, "User 2");
        assert_eq!(records[0].status, "in progress");
        assert_eq!(records[0].tags, vec!["bug".to_string(), "frontend".to_string()]);
    }
}
