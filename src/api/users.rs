use super::{ApiClient, ApiError};
use crate::core::user::{ProfileUpdate, User};

pub async fn me(client: &ApiClient) -> Result<User, ApiError> {
    client.get("users/me").await
}

pub async fn update_me(client: &ApiClient, update: &ProfileUpdate) -> Result<User, ApiError> {
    client.patch("users/me", update).await
}

pub async fn get(client: &ApiClient, id: i64) -> Result<User, ApiError> {
    client.get(&format!("users/{}", id)).await
}

/// Resolve display names for a set of ids. Failed lookups are left out so the
/// caller keeps showing its fallback and can ask again later.
pub async fn names(client: &ApiClient, ids: &[i64]) -> Vec<(i64, String)> {
    let lookups = ids.iter().map(|&id| async move { (id, get(client, id).await) });
    resolved_names(futures::future::join_all(lookups).await)
}

fn resolved_names(results: Vec<(i64, Result<User, ApiError>)>) -> Vec<(i64, String)> {
    results
        .into_iter()
        .filter_map(|(id, result)| match result {
            Ok(user) => Some((id, user.name)),
            Err(e) => {
                log::warn!("Could not resolve user {}: {}", id, e);
                None
            }
        })
        .collect()
}
