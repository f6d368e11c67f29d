use crate::core::hackathon::Hackathon;
use crate::core::membership::{self, Membership};
use crate::core::project::Project;

/// Workspaces the user can open.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceChoices {
    pub projects: Vec<Project>,
    pub hackathons: Vec<Hackathon>,
    pub loading: bool,
}

impl WorkspaceChoices {
    /// Projects created by the user or joined through an active membership,
    /// each once, in listing order. Hackathons only when the user created them.
    pub fn build(
        projects: Vec<Project>,
        hackathons: Vec<Hackathon>,
        memberships: &[Membership],
        user_id: i64,
    ) -> Self {
        let active = membership::active_project_ids(memberships);
        let mut seen = Vec::new();
        let projects = projects
            .into_iter()
            .filter(|p| p.created_by == user_id || active.binary_search(&p.id).is_ok())
            .filter(|p| {
                if seen.contains(&p.id) {
                    false
                } else {
                    seen.push(p.id);
                    true
                }
            })
            .collect();
        let hackathons = hackathons
            .into_iter()
            .filter(|h| h.created_by == user_id)
            .collect();
        Self {
            projects,
            hackathons,
            loading: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.hackathons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::membership::MembershipStatus;

    fn project(id: i64, owner: i64) -> Project {
        serde_json::from_value(serde_json::json!({"id": id, "title": "P", "created_by": owner})).unwrap()
    }

    fn hackathon(id: i64, owner: i64) -> Hackathon {
        serde_json::from_value(serde_json::json!({
            "id": id, "title": "H", "created_by": owner,
            "start_at": "2026-01-01T00:00:00Z", "end_at": "2026-01-02T00:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn created_and_joined_once_each() {
        let memberships = vec![
            Membership {
                id: 1,
                project_id: 1,
                user_id: 5,
                role_in_team: "dev".into(),
                status: MembershipStatus::Active,
                created_at: None,
                invited_by: None,
            },
            Membership {
                id: 2,
                project_id: 3,
                user_id: 5,
                role_in_team: "dev".into(),
                status: MembershipStatus::Invited,
                created_at: None,
                invited_by: None,
            },
        ];
        let choices = WorkspaceChoices::build(
            vec![project(1, 5), project(2, 5), project(3, 9), project(4, 9), project(1, 5)],
            vec![hackathon(1, 5), hackathon(2, 9)],
            &memberships,
            5,
        );
        let ids: Vec<i64> = choices.projects.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(choices.hackathons.len(), 1);
        assert!(!choices.is_empty());
    }
}
