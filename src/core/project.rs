use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::application::ApplicationKind;
use super::form::{self, FormError};
use super::listing::Listing;

fn default_format() -> String {
    "online".to_string()
}

fn default_location() -> String {
    "TBA".to_string()
}

fn default_tags() -> Vec<String> {
    vec!["General".to_string()]
}

fn default_status() -> String {
    "recruiting".to_string()
}

/// A team project as served by `GET projects`. Display fields the server
/// does not always send fall back to the same defaults the listing shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "authorId", alias = "ownerId")]
    pub created_by: i64,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default = "default_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub progress_percent: f64,
    #[serde(default)]
    pub prize: Option<String>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub max_participants: Option<u32>,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default)]
    pub applicants: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Listing for Project {
    const KIND: ApplicationKind = ApplicationKind::Project;

    fn id(&self) -> i64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn owner_id(&self) -> i64 {
        self.created_by
    }

    fn status_label(&self, _now: DateTime<Utc>) -> String {
        self.status.clone()
    }

    fn tags(&self) -> &[String] {
        if self.tags.is_empty() {
            &self.tech_stack
        } else {
            &self.tags
        }
    }

    fn format(&self) -> &str {
        &self.format
    }

    fn location(&self) -> &str {
        &self.location
    }
}

pub const PROJECT_TITLE_MIN: usize = 4;
pub const PROJECT_TITLE_MAX: usize = 80;

/// Body of `POST projects`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prize: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
}

/// Raw text of the create-project form.
#[derive(Debug, Clone, Default)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub roles: Vec<String>,
    pub role_input: String,
    pub prize: String,
    pub deadline: String,
    pub max_participants: String,
}

impl ProjectForm {
    pub fn add_role(&mut self) {
        let role = self.role_input.trim().to_string();
        if !role.is_empty() && !self.roles.contains(&role) {
            self.roles.push(role);
        }
        self.role_input.clear();
    }

    pub fn remove_role(&mut self, idx: usize) {
        if idx < self.roles.len() {
            self.roles.remove(idx);
        }
    }

    /// Validate and convert into a request body. Deadline is end-of-day UTC.
    pub fn to_request(&self) -> Result<NewProject, FormError> {
        let title = form::check_title(&self.title, PROJECT_TITLE_MIN, PROJECT_TITLE_MAX)?;
        let description = form::require(&self.description, "description")?;
        let deadline = form::parse_date(&self.deadline)?.and_then(form::end_of_day);
        let max_participants = form::parse_count(&self.max_participants)?;

        let prize = self.prize.trim();
        Ok(NewProject {
            title: title.to_string(),
            description: description.to_string(),
            tech_stack: self.roles.clone(),
            prize: (!prize.is_empty()).then(|| prize.to_string()),
            deadline,
            max_participants,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_project_gets_display_defaults() {
        let json = r#"{"id":1,"title":"Campus Map","description":"Indoor nav","created_by":4,"status":"recruiting","tech_stack":["Rust"],"progress_percent":0.0,"created_at":"2025-10-01T08:00:00Z"}"#;
        let p: Project = serde_json::from_str(json).unwrap();
        assert_eq!(p.format, "online");
        assert_eq!(p.location, "TBA");
        assert_eq!(p.tags, vec!["General".to_string()]);
        assert_eq!(p.applicants, 0);
    }

    #[test]
    fn short_title_is_rejected() {
        let form = ProjectForm {
            title: "AI".into(),
            description: "Something".into(),
            ..Default::default()
        };
        assert_eq!(
            form.to_request(),
            Err(FormError::TitleLength { min: 4, max: 80 })
        );
    }

    #[test]
    fn form_converts_optional_fields() {
        let mut form = ProjectForm {
            title: " Health Tracker ".into(),
            description: "Wearables + ML".into(),
            deadline: "2026-03-01".into(),
            max_participants: "5".into(),
            ..Default::default()
        };
        form.role_input = "backend".into();
        form.add_role();
        form.role_input = "backend".into();
        form.add_role();

        let req = form.to_request().unwrap();
        assert_eq!(req.title, "Health Tracker");
        assert_eq!(req.tech_stack, vec!["backend".to_string()]);
        assert_eq!(req.max_participants, Some(5));
        assert_eq!(req.prize, None);
        assert_eq!(
            req.deadline.unwrap().to_rfc3339(),
            "2026-03-01T23:59:59+00:00"
        );
    }

    #[test]
    fn bad_deadline_is_reported() {
        let form = ProjectForm {
            title: "Health Tracker".into(),
            description: "x".into(),
            deadline: "03/01/2026".into(),
            ..Default::default()
        };
        assert_eq!(
            form.to_request(),
            Err(FormError::BadDate("03/01/2026".into()))
        );
    }
}
