use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Mentor,
    /// Sent as `customer` on the wire.
    #[serde(rename = "customer", alias = "client")]
    Client,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Mentor => "mentor",
            Self::Client => "customer",
            Self::Admin => "admin",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "student" => Some(Self::Student),
            "mentor" => Some(Self::Mentor),
            "client" | "customer" => Some(Self::Client),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Mentor => "Mentor",
            Self::Client => "Client",
            Self::Admin => "Admin",
        }
    }

    /// Roles offered on the registration form. Admin is never self-assigned.
    pub const SELF_ASSIGNABLE: &'static [Role] = &[Role::Student, Role::Mentor, Role::Client];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .flat_map(|c| c.to_uppercase())
            .collect()
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        let needle = skill.to_lowercase();
        self.skills.iter().any(|s| s.to_lowercase() == needle)
    }
}

/// Partial update for `PATCH users/me`. Unset fields are omitted from the body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_alias_decodes_as_client() {
        let json = r#"{"id":3,"name":"Dana Ivanova","email":"d@x.io","role":"customer"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::Client);
        assert!(user.skills.is_empty());
        assert_eq!(user.initials(), "DI");
        assert_eq!(serde_json::to_string(&Role::Client).unwrap(), "\"customer\"");
        let json = r#"{"id":4,"name":"Sam","email":"s@x.io","role":"client"}"#;
        assert_eq!(serde_json::from_str::<User>(json).unwrap().role, Role::Client);
    }

    #[test]
    fn role_from_str_is_case_insensitive() {
        assert_eq!(Role::from_name(" Mentor "), Some(Role::Mentor));
        assert_eq!(Role::from_name("root"), None);
    }

    #[test]
    fn profile_update_omits_unset_fields() {
        let update = ProfileUpdate {
            bio: Some("Backend dev".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"bio":"Backend dev"}"#);
    }
}
