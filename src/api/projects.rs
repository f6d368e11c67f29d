use super::{ApiClient, ApiError};
use crate::core::project::{NewProject, Project};

pub async fn list(client: &ApiClient) -> Result<Vec<Project>, ApiError> {
    client.get("projects").await
}

pub async fn get(client: &ApiClient, id: i64) -> Result<Project, ApiError> {
    client.get(&format!("projects/{}", id)).await
}

pub async fn create(client: &ApiClient, project: &NewProject) -> Result<Project, ApiError> {
    client.post("projects", project).await
}

pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.delete(&format!("projects/{}", id)).await
}
