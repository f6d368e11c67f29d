use super::{ApiClient, ApiError};
use crate::core::notification::Notification;

pub async fn list(client: &ApiClient) -> Result<Vec<Notification>, ApiError> {
    client.get("notifications").await
}

pub async fn mark_read(client: &ApiClient, id: i64) -> Result<Notification, ApiError> {
    client
        .patch(&format!("notifications/{}/read", id), &serde_json::json!({}))
        .await
}
