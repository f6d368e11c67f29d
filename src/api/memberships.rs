use super::{ApiClient, ApiError};
use crate::core::membership::Membership;

pub async fn for_user(client: &ApiClient, user_id: i64) -> Result<Vec<Membership>, ApiError> {
    client.get(&format!("memberships/user/{}", user_id)).await
}

pub async fn for_project(client: &ApiClient, project_id: i64) -> Result<Vec<Membership>, ApiError> {
    client.get(&format!("memberships/project/{}", project_id)).await
}

pub async fn accept(client: &ApiClient, membership_id: i64) -> Result<Membership, ApiError> {
    client
        .post_action(&format!("memberships/{}/accept", membership_id))
        .await
}
