use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Active,
    Invited,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub id: i64,
    pub project_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub role_in_team: String,
    pub status: MembershipStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub invited_by: Option<i64>,
}

impl Membership {
    pub fn is_active(&self) -> bool {
        self.status == MembershipStatus::Active
    }
}

/// Project ids the user has joined through an active membership.
pub fn active_project_ids(memberships: &[Membership]) -> Vec<i64> {
    let mut ids: Vec<i64> = memberships
        .iter()
        .filter(|m| m.is_active())
        .map(|m| m.project_id)
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_active_memberships_count() {
        let json = r#"[
            {"id":1,"project_id":4,"user_id":2,"role_in_team":"dev","status":"active","created_at":"2026-01-01T00:00:00Z"},
            {"id":2,"project_id":5,"user_id":2,"role_in_team":"dev","status":"invited","created_at":"2026-01-01T00:00:00Z","invited_by":7},
            {"id":3,"project_id":4,"user_id":2,"role_in_team":"qa","status":"active","created_at":"2026-01-02T00:00:00Z"}
        ]"#;
        let ms: Vec<Membership> = serde_json::from_str(json).unwrap();
        assert_eq!(active_project_ids(&ms), vec![4]);
        assert_eq!(ms[1].invited_by, Some(7));
    }
}
