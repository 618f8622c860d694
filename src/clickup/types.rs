use crate::tasks::{Priority, UNASSIGNED};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Upstream status and JSON body, passed back to callers untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Value,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Team, space or list as returned by the hierarchy endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedItem {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!("unexpected id: {}", other))),
    }
}

/// Task creation form as the dashboard collects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "unassigned")]
    pub assignee: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default = "default_status")]
    pub status: String,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub due_date: Option<String>,
}

fn unassigned() -> String {
    UNASSIGNED.to_string()
}

fn default_status() -> String {
    "to do".to_string()
}

impl NewTask {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            assignee: unassigned(),
            priority: Priority::default(),
            status: default_status(),
            due_date: None,
        }
    }

    /// Epoch millis at UTC midnight of the due date, if it parses.
    pub fn due_millis(&self) -> Option<i64> {
        let raw = self.due_date.as_deref()?.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()?
            .and_hms_opt(0, 0, 0)
            .map(|midnight| midnight.and_utc().timestamp_millis())
    }

    /// Body for the upstream create call.
    pub fn to_payload(&self) -> Value {
        let assignees: Vec<&str> = if self.assignee.is_empty() || self.assignee == UNASSIGNED {
            Vec::new()
        } else {
            vec![self.assignee.as_str()]
        };

        json!({
            "name": self.name,
            "description": self.description,
            "assignees": assignees,
            "priority": self.priority.code(),
            "status": self.status,
            "due_date": self.due_millis(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_maps_form_fields() {
        let task = NewTask {
            assignee: "User 2".into(),
            priority: Priority::Urgent,
            due_date: Some("2024-12-31".into()),
            ..NewTask::new("Prepare demo")
        };

        let payload = task.to_payload();

        assert_eq!(payload["name"], "Prepare demo");
        assert_eq!(payload["assignees"], json!(["User 2"]));
        assert_eq!(payload["priority"], 4);
        assert_eq!(payload["status"], "to do");
        assert_eq!(payload["due_date"], 1735603200000i64);
        assert!(payload.get("list_id").is_none());
    }

    #[test]
    fn test_unassigned_and_missing_due_date() {
        let task = NewTask {
            due_date: Some("not a date".into()),
            ..NewTask::new("Triage")
        };

        let body = task.to_payload();

        assert_eq!(body["assignees"], json!([]));
        assert_eq!(body["priority"], 2);
        assert!(body["due_date"].is_null());
    }

    #[test]
    fn test_named_item_accepts_numeric_ids() {
        let item: NamedItem = serde_json::from_value(json!({"id": 123, "name": "Engineering"})).unwrap();
        assert_eq!(item.id, "123");

        let item: NamedItem = serde_json::from_value(json!({"id": "abc"})).unwrap();
        assert_eq!(item.name, "");
    }

    #[test]
    fn test_upstream_success_range() {
        assert!(UpstreamResponse { status: 204, body: Value::Null }.is_success());
        assert!(!UpstreamResponse { status: 404, body: Value::Null }.is_success());
    }
}
