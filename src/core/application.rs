use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default message sent when the applicant leaves the message box empty.
pub const DEFAULT_APPLICATION_MESSAGE: &str = "I would like to join";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationKind {
    Project,
    Hackathon,
}

impl ApplicationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Hackathon => "hackathon",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Hold,
    Withdrawn,
}

/// Server action that carries a status change. Only approve and reject have endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }

    pub fn target_status(&self) -> ApplicationStatus {
        match self {
            Self::Approve => ApplicationStatus::Approved,
            Self::Reject => ApplicationStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("application is already {}", .0.as_str())]
    NotPending(ApplicationStatus),
    #[error("status can only be changed to approved or rejected")]
    Unsupported(ApplicationStatus),
    #[error("application {0} is not in the list")]
    Unknown(i64),
}

impl ApplicationStatus {
    pub const ALL: &'static [ApplicationStatus] = &[
        ApplicationStatus::Pending,
        ApplicationStatus::Approved,
        ApplicationStatus::Rejected,
        ApplicationStatus::Hold,
        ApplicationStatus::Withdrawn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Hold => "hold",
            Self::Withdrawn => "withdrawn",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Withdrawn)
    }

    /// Legal moves: pending → approved | rejected | withdrawn.
    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        *self == Self::Pending
            && matches!(
                next,
                Self::Approved | Self::Rejected | Self::Withdrawn
            )
    }

    /// Resolve the request that performs `self → next`.
    pub fn review_action(&self, next: ApplicationStatus) -> Result<ReviewAction, TransitionError> {
        if *self != Self::Pending {
            return Err(TransitionError::NotPending(*self));
        }
        match next {
            Self::Approved => Ok(ReviewAction::Approve),
            Self::Rejected => Ok(ReviewAction::Reject),
            other => Err(TransitionError::Unsupported(other)),
        }
    }
}

/// Applicant fields the server embeds in each application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub created_by: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ApplicationKind,
    pub target_id: i64,
    #[serde(default)]
    pub applicant_id: Option<i64>,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, alias = "applied_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub applicant: Option<ApplicantSummary>,
    #[serde(default)]
    pub project: Option<TargetSummary>,
    #[serde(default)]
    pub hackathon: Option<TargetSummary>,
}

impl Application {
    pub fn applied_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn applicant_name(&self) -> Option<&str> {
        self.applicant.as_ref().map(|a| a.name.as_str())
    }

    pub fn applicant_email(&self) -> Option<&str> {
        self.applicant.as_ref().and_then(|a| a.email.as_deref())
    }

    pub fn applicant_role(&self) -> Option<&str> {
        self.applicant.as_ref().and_then(|a| a.role.as_deref())
    }

    pub fn applicant_skills(&self) -> &[String] {
        self.applicant
            .as_ref()
            .map(|a| a.skills.as_slice())
            .unwrap_or(&[])
    }

    fn target(&self) -> Option<&TargetSummary> {
        match self.kind {
            ApplicationKind::Project => self.project.as_ref(),
            ApplicationKind::Hackathon => self.hackathon.as_ref(),
        }
    }

    pub fn target_title(&self) -> Option<&str> {
        self.target().map(|t| t.title.as_str())
    }

    /// Owner of the project or hackathon applied to, when the server includes it.
    pub fn target_owner(&self) -> Option<i64> {
        self.target().and_then(|t| t.created_by)
    }
}

/// Body of `POST applications`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewApplication {
    #[serde(rename = "type")]
    pub kind: ApplicationKind,
    pub target_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NewApplication {
    pub fn new(kind: ApplicationKind, target_id: i64, message: &str) -> Self {
        let message = message.trim();
        Self {
            kind,
            target_id,
            message: Some(if message.is_empty() {
                DEFAULT_APPLICATION_MESSAGE.to_string()
            } else {
                message.to_string()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_moves() {
        use ApplicationStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Pending.can_transition_to(Withdrawn));
        assert!(!Pending.can_transition_to(Hold));
        assert!(!Pending.can_transition_to(Pending));
        for from in [Approved, Rejected, Withdrawn, Hold] {
            for to in ApplicationStatus::ALL {
                assert!(!from.can_transition_to(*to), "{:?} -> {:?}", from, to);
            }
        }
    }

    #[test]
    fn review_action_for_supported_targets() {
        use ApplicationStatus::*;
        assert_eq!(Pending.review_action(Approved), Ok(ReviewAction::Approve));
        assert_eq!(Pending.review_action(Rejected), Ok(ReviewAction::Reject));
        assert_eq!(
            Pending.review_action(Withdrawn),
            Err(TransitionError::Unsupported(Withdrawn))
        );
        assert_eq!(
            Approved.review_action(Rejected),
            Err(TransitionError::NotPending(Approved))
        );
    }

    #[test]
    fn decodes_enriched_server_record() {
        let json = r#"{
            "id": 7, "type": "project", "target_id": 2, "applicant_id": 5,
            "message": null, "status": "pending",
            "created_at": "2025-11-02T10:00:00Z", "updated_at": null,
            "applicant": {"id": 5, "name": "Lee", "email": "lee@uni.edu", "role": "student", "skills": ["Rust"], "avatar_url": null},
            "project": {"id": 2, "title": "Campus Map", "created_by": 9}
        }"#;
        let app: Application = serde_json::from_str(json).unwrap();
        assert_eq!(app.kind, ApplicationKind::Project);
        assert_eq!(app.target_title(), Some("Campus Map"));
        assert_eq!(app.target_owner(), Some(9));
        assert_eq!(app.applicant_skills(), &["Rust".to_string()]);
    }

    #[test]
    fn new_application_falls_back_to_default_message() {
        let body = NewApplication::new(ApplicationKind::Hackathon, 4, "   ");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["type"], "hackathon");
        assert_eq!(json["message"], DEFAULT_APPLICATION_MESSAGE);
    }
}
