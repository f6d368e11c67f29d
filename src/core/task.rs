use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::form::{self, FormError};

pub const TASK_TITLE_MAX: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: &'static [TaskStatus] = &[
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(Self::Todo),
            "in_progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    /// Column to the right, if any.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Todo => Some(Self::InProgress),
            Self::InProgress => Some(Self::Done),
            Self::Done => None,
        }
    }

    pub fn prev(&self) -> Option<Self> {
        match self {
            Self::Todo => None,
            Self::InProgress => Some(Self::Todo),
            Self::Done => Some(Self::InProgress),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TaskStatus,
    #[serde(default)]
    pub assignee_id: Option<i64>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Tasks split into the three board columns, in list order.
#[derive(Debug, Default, PartialEq)]
pub struct TaskBoard<'a> {
    pub todo: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
    pub done: Vec<&'a Task>,
}

impl<'a> TaskBoard<'a> {
    pub fn partition(tasks: &'a [Task]) -> Self {
        let mut board = Self::default();
        for task in tasks {
            match task.status {
                TaskStatus::Todo => board.todo.push(task),
                TaskStatus::InProgress => board.in_progress.push(task),
                TaskStatus::Done => board.done.push(task),
            }
        }
        board
    }

    pub fn column(&self, status: TaskStatus) -> &[&'a Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Body of `POST tasks`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub project_id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    pub fn new(
        project_id: i64,
        title: &str,
        description: &str,
        assignee_id: Option<i64>,
    ) -> Result<Self, FormError> {
        let title = form::check_title(title, 1, TASK_TITLE_MAX)?;
        let description = description.trim();
        Ok(Self {
            project_id,
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            assignee_id,
            due_date: None,
        })
    }
}

/// Body of `PATCH tasks/:id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<i64>,
}

impl TaskUpdate {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, status: TaskStatus) -> Task {
        Task {
            id,
            project_id: 1,
            title: format!("task {}", id),
            description: None,
            status,
            assignee_id: None,
            due_date: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        for s in TaskStatus::ALL {
            assert_eq!(TaskStatus::from_name(s.as_str()), Some(*s));
        }
    }

    #[test]
    fn board_partitions_in_order() {
        let tasks = vec![
            task(1, TaskStatus::Done),
            task(2, TaskStatus::Todo),
            task(3, TaskStatus::InProgress),
            task(4, TaskStatus::Todo),
        ];
        let board = TaskBoard::partition(&tasks);
        let ids = |col: &[&Task]| col.iter().map(|t| t.id).collect::<Vec<_>>();
        assert_eq!(ids(board.column(TaskStatus::Todo)), vec![2, 4]);
        assert_eq!(ids(board.column(TaskStatus::InProgress)), vec![3]);
        assert_eq!(ids(board.column(TaskStatus::Done)), vec![1]);
        assert_eq!(board.len(), tasks.len());
    }

    #[test]
    fn neighbours() {
        assert_eq!(TaskStatus::Todo.next(), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::Done.next(), None);
        assert_eq!(TaskStatus::Todo.prev(), None);
    }

    #[test]
    fn new_task_validates_title() {
        assert!(NewTask::new(1, "   ", "", None).is_err());
        assert!(NewTask::new(1, &"x".repeat(121), "", None).is_err());
        let t = NewTask::new(3, " Write README ", "  ", Some(9)).unwrap();
        assert_eq!(t.title, "Write README");
        assert_eq!(t.description, None);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["assignee_id"], 9);
        assert!(json.get("due_date").is_none());
    }

    #[test]
    fn status_update_body() {
        let body = serde_json::to_string(&TaskUpdate::status(TaskStatus::Done)).unwrap();
        assert_eq!(body, r#"{"status":"done"}"#);
    }
}
