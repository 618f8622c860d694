use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Owner value for work nobody has picked up yet.
pub const UNASSIGNED: &str = "Unassigned";

/// Raw task objects grouped by owner name, in the order the source supplied them.
pub type GroupedTasks = IndexMap<String, Vec<Value>>;

/// Due dates arrive either as epoch millis or as free text (ISO dates, form input).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DueDate {
    Millis(i64),
    Text(String),
}

impl DueDate {
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            DueDate::Millis(millis) => DateTime::<Utc>::from_timestamp_millis(*millis),
            DueDate::Text(text) => parse_text_date(text),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => match number.as_i64() {
                Some(millis) => Some(DueDate::Millis(millis)),
                None => Some(DueDate::Text(number.to_string())),
            },
            Value::String(text) if !text.is_empty() => Some(DueDate::Text(text.clone())),
            _ => None,
        }
    }
}

fn parse_text_date(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if let Ok(millis) = trimmed.parse::<i64>() {
        return DateTime::<Utc>::from_timestamp_millis(millis);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn default_owner() -> String {
    UNASSIGNED.to_string()
}

/// A single task after normalization. Owner is serialized as `employee`,
/// the field name the dashboard data files use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "employee", alias = "owner", default = "default_owner")]
    pub owner: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DueDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl TaskRecord {
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            owner: owner.into(),
            status: String::new(),
            priority: None,
            date_created: None,
            date_updated: None,
            due_date: None,
            url: None,
            tags: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Builds a record from a raw task object, tagging it with `owner`.
    ///
    /// Textual fields accept strings or numbers; anything else counts as
    /// absent. A non-object `raw` yields a record carrying only the owner.
    pub fn from_raw(owner: &str, raw: &Value) -> Self {
        let empty = Map::new();
        let fields = raw.as_object().unwrap_or(&empty);
        let text = |key: &str| fields.get(key).and_then(value_to_text);

        Self {
            id: text("id"),
            name: text("name").unwrap_or_default(),
            description: text("description"),
            owner: owner.to_string(),
            status: text("status").unwrap_or_default(),
            priority: text("priority"),
            date_created: text("date_created"),
            date_updated: text("date_updated"),
            due_date: fields.get("due_date").and_then(DueDate::from_value),
            url: text("url"),
            tags: fields.get("tags").map(tag_names).unwrap_or_default(),
        }
    }

    /// Owner is present and is not the unassigned sentinel.
    pub fn is_assigned(&self) -> bool {
        !self.owner.is_empty() && self.owner != UNASSIGNED
    }

    pub fn owner_or_unassigned(&self) -> &str {
        if self.owner.is_empty() {
            UNASSIGNED
        } else {
            &self.owner
        }
    }

    pub fn priority_or_none(&self) -> &str {
        match self.priority.as_deref() {
            Some(priority) if !priority.is_empty() => priority,
            _ => "None",
        }
    }
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn tag_names(value: &Value) -> Vec<String> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(name) => Some(name.clone()),
            Value::Object(tag) => tag.get("name").and_then(value_to_text),
            _ => None,
        })
        .collect()
}

/// Priority levels accepted by the upstream service when creating tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Priority {
    Urgent,
    High,
    #[default]
    Normal,
    Low,
}

impl Priority {
    /// Numeric code the upstream API expects (1 = lowest).
    pub fn code(self) -> u8 {
        match self {
            Priority::Urgent => 4,
            Priority::High => 3,
            Priority::Normal => 2,
            Priority::Low => 1,
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "urgent" => Some(Priority::Urgent),
            "high" => Some(Priority::High),
            "normal" => Some(Priority::Normal),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_raw_accepts_numbers_for_text_fields() {
        let raw = json!({
            "id": 42,
            "name": "Ship release",
            "status": "to do",
            "date_created": "1700000000000",
            "due_date": 1700086400000i64,
            "tags": [{"name": "backend"}, "ops", 7]
        });

        let record = TaskRecord::from_raw("User 1", &raw);

        assert_eq!(record.id.as_deref(), Some("42"));
        assert_eq!(record.name, "Ship release");
        assert_eq!(record.owner, "User 1");
        assert_eq!(record.date_created.as_deref(), Some("1700000000000"));
        assert_eq!(record.due_date, Some(DueDate::Millis(1700086400000)));
        assert_eq!(record.tags, vec!["backend".to_string(), "ops".to_string()]);
    }

    #[test]
    fn test_from_raw_tolerates_wrong_shapes() {
        let raw = json!({"name": {"nested": true}, "priority": null, "tags": "x"});
        let record = TaskRecord::from_raw("User 2", &raw);

        assert_eq!(record.name, "");
        assert!(record.priority.is_none());
        assert!(record.tags.is_empty());

        let record = TaskRecord::from_raw("User 3", &json!("not an object"));
        assert_eq!(record.owner, "User 3");
        assert_eq!(record.status, "");
    }

    #[test]
    fn test_assignment_checks() {
        assert!(TaskRecord::new("a", "User 1").is_assigned());
        assert!(!TaskRecord::new("a", UNASSIGNED).is_assigned());
        assert!(!TaskRecord::new("a", "").is_assigned());
        assert_eq!(TaskRecord::new("a", "").owner_or_unassigned(), UNASSIGNED);
    }

    #[test]
    fn test_due_date_parsing() {
        let expected = NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();

        assert_eq!(DueDate::Text("2024-12-31".into()).to_datetime(), Some(expected));
        assert_eq!(
            DueDate::Text("2024-12-31T00:00:00.000Z".into()).to_datetime(),
            Some(expected)
        );
        assert_eq!(
            DueDate::Millis(expected.timestamp_millis()).to_datetime(),
            Some(expected)
        );
        assert!(DueDate::Text("next week".into()).to_datetime().is_none());
    }

    #[test]
    fn test_serializes_owner_as_employee() {
        let record = TaskRecord::new("Write docs", "User 4").with_status("to do");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["employee"], "User 4");
        assert!(value.get("owner").is_none());

        let parsed: TaskRecord = serde_json::from_value(json!({"name": "x", "owner": "User 5"})).unwrap();
        assert_eq!(parsed.owner, "User 5");
    }

    #[test]
    fn test_priority_codes() {
        assert_eq!(Priority::parse("Urgent").map(Priority::code), Some(4));
        assert_eq!(Priority::parse("high").map(Priority::code), Some(3));
        assert_eq!(Priority::default().code(), 2);
        assert_eq!(Priority::Low.code(), 1);
        assert!(Priority::parse("whenever").is_none());
    }
}
