use super::{ApiClient, ApiError};
use crate::core::hackathon::{Hackathon, NewHackathon};

pub async fn list(client: &ApiClient) -> Result<Vec<Hackathon>, ApiError> {
    client.get("hackathons").await
}

pub async fn get(client: &ApiClient, id: i64) -> Result<Hackathon, ApiError> {
    client.get(&format!("hackathons/{}", id)).await
}

pub async fn create(client: &ApiClient, hackathon: &NewHackathon) -> Result<Hackathon, ApiError> {
    client.post("hackathons", hackathon).await
}

pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.delete(&format!("hackathons/{}", id)).await
}
