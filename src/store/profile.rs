use crate::api::ApiError;
use crate::core::application::Application;
use crate::core::form::{self, FormError, MAX_SKILLS, SKILL_MAX_CHARS};
use crate::core::membership::{self, Membership, MembershipStatus};
use crate::core::project::Project;
use crate::core::user::{ProfileUpdate, User};

#[derive(Debug, Default)]
pub struct ProfileStore {
    pub user: Option<User>,
    pub created: Vec<Project>,
    pub joined: Vec<Project>,
    pub applications: Vec<Application>,
    pub invitations: Vec<Membership>,
    pub loading: bool,

    pub editing_bio: bool,
    pub bio_draft: String,
    pub editing_skills: bool,
    pub skills_draft: Vec<String>,
    pub skill_input: String,
    pub skill_error: Option<String>,
    /// Project awaiting delete confirmation.
    pub pending_delete: Option<i64>,
}

impl ProfileStore {
    pub fn set_user(&mut self, user: User) {
        self.bio_draft = user.bio.clone().unwrap_or_default();
        self.skills_draft = user.skills.clone();
        self.user = Some(user);
    }

    /// Split all projects into the ones the user created and the ones joined
    /// through an active membership.
    pub fn set_projects(&mut self, projects: Vec<Project>, memberships: Vec<Membership>) {
        let Some(user_id) = self.user.as_ref().map(|u| u.id) else {
            return;
        };
        let active = membership::active_project_ids(&memberships);
        let (created, rest): (Vec<Project>, Vec<Project>) =
            projects.into_iter().partition(|p| p.created_by == user_id);
        self.joined = rest
            .into_iter()
            .filter(|p| active.binary_search(&p.id).is_ok())
            .collect();
        self.created = created;
        self.invitations = memberships
            .into_iter()
            .filter(|m| m.status == MembershipStatus::Invited)
            .collect();
        self.loading = false;
    }

    pub fn add_skill(&mut self) {
        let skill = self.skill_input.trim().to_string();
        self.skill_error = None;
        if skill.is_empty() {
            return;
        }
        if self.skills_draft.iter().any(|s| s == &skill) {
            self.skill_input.clear();
            return;
        }
        if skill.chars().count() > SKILL_MAX_CHARS {
            self.skill_error = Some(FormError::SkillLength(skill).to_string());
            return;
        }
        if self.skills_draft.len() >= MAX_SKILLS {
            self.skill_error = Some(FormError::TooManySkills.to_string());
            return;
        }
        self.skills_draft.push(skill);
        self.skill_input.clear();
    }

    pub fn remove_skill(&mut self, skill: &str) {
        self.skills_draft.retain(|s| s != skill);
    }

    pub fn bio_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            bio: Some(self.bio_draft.trim().to_string()),
            ..Default::default()
        }
    }

    pub fn skills_update(&self) -> Result<ProfileUpdate, FormError> {
        form::check_skills(&self.skills_draft)?;
        Ok(ProfileUpdate {
            skills: Some(self.skills_draft.clone()),
            ..Default::default()
        })
    }

    /// The server's copy replaces the local user; edit mode closes on success.
    pub fn saved(&mut self, result: Result<User, ApiError>) -> Option<String> {
        match result {
            Ok(user) => {
                self.editing_bio = false;
                self.editing_skills = false;
                self.set_user(user);
                None
            }
            Err(e) => {
                log::warn!("profile update failed: {}", e);
                Some(format!("Could not save your profile. {}", e))
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing_bio = false;
        self.editing_skills = false;
        self.skill_input.clear();
        self.skill_error = None;
        if let Some(ref user) = self.user {
            self.bio_draft = user.bio.clone().unwrap_or_default();
            self.skills_draft = user.skills.clone();
        }
    }

    pub fn project_deleted(&mut self, id: i64, result: Result<(), ApiError>) -> Option<String> {
        self.pending_delete = None;
        match result {
            Ok(()) => {
                self.created.retain(|p| p.id != id);
                None
            }
            Err(e) => {
                log::warn!("delete project {} failed: {}", id, e);
                Some(format!("Could not delete the project. {}", e))
            }
        }
    }

    pub fn invitation_accepted(&mut self, result: Result<Membership, ApiError>) -> Option<String> {
        match result {
            Ok(m) => {
                self.invitations.retain(|i| i.id != m.id);
                None
            }
            Err(e) => Some(format!("Could not accept the invitation. {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::user::Role;

    fn user() -> User {
        User {
            id: 7,
            name: "Mia".into(),
            email: "mia@uni.edu".into(),
            role: Role::Student,
            skills: vec!["Rust".into()],
            bio: Some("hi".into()),
            avatar_url: None,
            created_at: None,
        }
    }

    fn project(id: i64, owner: i64) -> Project {
        serde_json::from_value(serde_json::json!({"id": id, "title": "Proj", "created_by": owner})).unwrap()
    }

    fn membership(id: i64, project_id: i64, status: MembershipStatus) -> Membership {
        Membership {
            id,
            project_id,
            user_id: 7,
            role_in_team: "dev".into(),
            status,
            created_at: None,
            invited_by: None,
        }
    }

    #[test]
    fn created_joined_and_invited() {
        let mut store = ProfileStore::default();
        store.set_user(user());
        store.set_projects(
            vec![project(1, 7), project(2, 3), project(3, 3), project(4, 3)],
            vec![
                membership(10, 2, MembershipStatus::Active),
                membership(11, 3, MembershipStatus::Invited),
            ],
        );
        assert_eq!(store.created.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(store.joined.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
        assert_eq!(store.invitations.len(), 1);

        assert_eq!(store.invitation_accepted(Ok(membership(11, 3, MembershipStatus::Active))), None);
        assert!(store.invitations.is_empty());
    }

    #[test]
    fn skill_editing() {
        let mut store = ProfileStore::default();
        store.set_user(user());

        store.skill_input = "  Go ".into();
        store.add_skill();
        store.skill_input = "Rust".into();
        store.add_skill();
        assert_eq!(store.skills_draft, vec!["Rust".to_string(), "Go".to_string()]);

        store.skill_input = "x".repeat(30);
        store.add_skill();
        assert!(store.skill_error.is_some());
        assert_eq!(store.skills_draft.len(), 2);

        store.remove_skill("Rust");
        let update = store.skills_update().unwrap();
        assert_eq!(update.skills, Some(vec!["Go".to_string()]));

        store.cancel_edit();
        assert_eq!(store.skills_draft, vec!["Rust".to_string()]);
    }

    #[test]
    fn failed_delete_keeps_project() {
        let mut store = ProfileStore::default();
        store.set_user(user());
        store.set_projects(vec![project(1, 7)], Vec::new());
        store.pending_delete = Some(1);
        assert!(store.project_deleted(1, Err(ApiError::Forbidden("no".into()))).is_some());
        assert_eq!(store.created.len(), 1);
        assert_eq!(store.pending_delete, None);
        assert_eq!(store.project_deleted(1, Ok(())), None);
        assert!(store.created.is_empty());
    }
}
