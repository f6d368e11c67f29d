use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    /// `invite`, `application_status` or `task_done`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// One-line summary built from the type and whatever the payload carries.
    pub fn summary(&self) -> String {
        let field = |key: &str| {
            self.payload
                .as_ref()
                .and_then(|p| p.get(key))
                .and_then(|v| match v {
                    serde_json::Value::String(s) => Some(s.clone()),
                    serde_json::Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
        };
        match self.kind.as_str() {
            "invite" => match field("project_title")
                .or_else(|| field("project_id").map(|id| format!("project #{}", id)))
            {
                Some(p) => format!("You were invited to {}", p),
                None => "You were invited to a project".to_string(),
            },
            "application_status" => match field("status") {
                Some(s) => format!("Your application was {}", s),
                None => "Your application was updated".to_string(),
            },
            "task_done" => match field("task_title") {
                Some(t) => format!("Task completed: {}", t),
                None => "A task was completed".to_string(),
            },
            other => other.replace('_', " "),
        }
    }
}

/// Unread first, then newest first.
pub fn sort_for_display(items: &mut [Notification]) {
    items.sort_by(|a, b| {
        a.is_read
            .cmp(&b.is_read)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
