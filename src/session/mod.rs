pub mod forms;
pub mod keyring;

use crate::api::auth::{self, Registration, TokenPair};
use crate::api::{ApiClient, ApiError, users};
use crate::core::user::{Role, User};

/// Who is signed in, with typed selectors for what they may do.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub role: Option<Role>,
    pub user: Option<User>,
}

impl Session {
    pub fn new(tokens: TokenPair, user: User) -> Self {
        Self {
            token: Some(tokens.access_token),
            refresh_token: tokens.refresh_token,
            role: Some(user.role),
            user: Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn role(&self) -> Option<Role> {
        self.role.or_else(|| self.user.as_ref().map(|u| u.role))
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }

    pub fn is_owner(&self, owner_id: i64) -> bool {
        self.user_id() == Some(owner_id)
    }

    /// Mentors and admins publish projects and hackathons.
    pub fn can_create_listings(&self) -> bool {
        matches!(self.role(), Some(Role::Mentor | Role::Admin))
    }

    pub fn can_delete_listing(&self, owner_id: i64) -> bool {
        self.is_owner(owner_id) || self.can_create_listings()
    }

    pub fn can_apply(&self) -> bool {
        matches!(self.role(), Some(Role::Student | Role::Client))
    }

    /// Approve/reject is reserved for the owner of the target. When the
    /// server did not say who owns it, mentors and admins may try.
    pub fn can_review(&self, owner_id: Option<i64>) -> bool {
        match owner_id {
            Some(owner) => self.is_owner(owner),
            None => self.can_create_listings(),
        }
    }

    pub fn replace_user(&mut self, user: User) {
        self.role = Some(user.role);
        self.user = Some(user);
    }
}

async fn finish_sign_in(client: &ApiClient, tokens: TokenPair) -> Result<Session, ApiError> {
    client.set_token(Some(tokens.access_token.clone()));
    match users::me(client).await {
        Ok(user) => {
            log::info!("Signed in as user {} ({})", user.id, user.role.as_str());
            Ok(Session::new(tokens, user))
        }
        Err(e) => {
            client.set_token(None);
            Err(e)
        }
    }
}

/// `auth/login` then `users/me`. The token is live on `client` afterwards.
pub async fn sign_in(client: &ApiClient, email: &str, password: &str) -> Result<Session, ApiError> {
    let tokens = auth::login(client, email, password).await?;
    finish_sign_in(client, tokens).await
}

pub async fn sign_up(client: &ApiClient, registration: &Registration) -> Result<Session, ApiError> {
    let tokens = auth::register(client, registration).await?;
    finish_sign_in(client, tokens).await
}

/// Re-validate a stored session against `users/me`, trying the refresh token once on 401.
pub async fn resume(client: &ApiClient, stored: Session) -> Result<Session, ApiError> {
    let token = stored.token.clone().ok_or(ApiError::NotSignedIn)?;
    client.set_token(Some(token));
    match users::me(client).await {
        Ok(user) => {
            let mut session = stored;
            session.replace_user(user);
            Ok(session)
        }
        Err(ApiError::Unauthorized) => {
            let refresh = stored.refresh_token.ok_or(ApiError::Unauthorized)?;
            log::info!("Access token rejected, refreshing");
            client.set_token(None);
            let tokens = auth::refresh(client, &refresh).await?;
            finish_sign_in(client, tokens).await
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, role: Role) -> User {
        User {
            id,
            name: "Test User".into(),
            email: "t@uni.edu".into(),
            role,
            skills: Vec::new(),
            bio: None,
            avatar_url: None,
            created_at: None,
        }
    }

    fn session(id: i64, role: Role) -> Session {
        Session::new(
            TokenPair {
                access_token: "tok".into(),
                refresh_token: Some("ref".into()),
                token_type: None,
            },
            user(id, role),
        )
    }

    #[test]
    fn empty_session_can_do_nothing() {
        let s = Session::default();
        assert!(!s.is_authenticated());
        assert!(!s.can_apply());
        assert!(!s.can_create_listings());
        assert!(!s.can_delete_listing(1));
        assert!(!s.can_review(Some(1)));
    }

    #[test]
    fn role_permissions() {
        let student = session(1, Role::Student);
        assert!(student.is_authenticated());
        assert!(student.can_apply());
        assert!(!student.can_create_listings());
        assert!(!student.can_delete_listing(2));

        let mentor = session(2, Role::Mentor);
        assert!(mentor.can_create_listings());
        assert!(mentor.can_delete_listing(99));
        assert!(!mentor.can_apply());

        let client = session(3, Role::Client);
        assert!(client.can_apply());
        assert!(client.can_delete_listing(3));
    }

    #[test]
    fn review_is_owner_only_when_owner_known() {
        let mentor = session(2, Role::Mentor);
        assert!(!mentor.can_review(Some(5)));
        assert!(mentor.can_review(Some(2)));
        assert!(mentor.can_review(None));
        assert!(!session(1, Role::Student).can_review(None));
    }

    #[test]
    fn role_falls_back_to_user() {
        let mut s = session(1, Role::Admin);
        s.role = None;
        assert_eq!(s.role(), Some(Role::Admin));
        s.replace_user(user(1, Role::Mentor));
        assert_eq!(s.role(), Some(Role::Mentor));
    }
}
