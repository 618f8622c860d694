use super::types::{DueDate, TaskRecord};
use chrono::{DateTime, Utc};

const PLACEHOLDER: &str = "—";

pub fn status_label(status: &str) -> String {
    match status {
        "to do" => "📋 To Do".to_string(),
        "in progress" => "🔄 In Progress".to_string(),
        "complete" => "✅ Complete".to_string(),
        "closed" => "🔒 Closed".to_string(),
        other => other.to_string(),
    }
}

pub fn priority_label(priority: Option<&str>) -> String {
    let Some(priority) = priority.filter(|p| !p.is_empty()) else {
        return PLACEHOLDER.to_string();
    };
    match priority.to_ascii_lowercase().as_str() {
        "urgent" => "🚨 Urgent".to_string(),
        "high" => "🔴 High".to_string(),
        "normal" => "🟡 Normal".to_string(),
        "low" => "🟢 Low".to_string(),
        _ => priority.to_string(),
    }
}

/// Renders an epoch-millis string as UTC `YYYY-MM-DD HH:MM`.
pub fn timestamp(millis: Option<&str>) -> String {
    millis
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Numeric due dates render as a date; free text is shown as given.
pub fn due_date(due: Option<&DueDate>) -> String {
    match due {
        None => PLACEHOLDER.to_string(),
        Some(DueDate::Millis(millis)) => DateTime::<Utc>::from_timestamp_millis(*millis)
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| millis.to_string()),
        Some(DueDate::Text(text)) => match text.trim().parse::<i64>() {
            Ok(millis) => due_date(Some(&DueDate::Millis(millis))),
            Err(_) => text.clone(),
        },
    }
}

/// Multi-line detail block for one task, as shown in task listings.
pub fn task_details(task: &TaskRecord) -> String {
    let title = if task.name.is_empty() { "Untitled" } else { &task.name };
    let status = if task.status.is_empty() {
        "Unknown".to_string()
    } else {
        status_label(&task.status)
    };

    let mut lines = vec![
        format!("📝 {} — {}", title, status),
        format!("   Description: {}", task.description.as_deref().filter(|d| !d.is_empty()).unwrap_or(PLACEHOLDER)),
        format!("   Priority:    {}", priority_label(task.priority.as_deref())),
        format!("   Employee:    {}", task.owner_or_unassigned()),
        format!("   Created:     {}", timestamp(task.date_created.as_deref())),
        format!("   Updated:     {}", timestamp(task.date_updated.as_deref())),
        format!("   Due:         {}", due_date(task.due_date.as_ref())),
    ];
    if let Some(url) = task.url.as_deref().filter(|u| !u.is_empty()) {
        lines.push(format!("   Link:        {}", url));
    }
    if let Some(id) = task.id.as_deref().filter(|id| !id.is_empty()) {
        lines.push(format!("   ID:          {}", id));
    }
    lines.join("\n")
}
