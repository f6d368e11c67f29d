use super::{ApiClient, ApiError};
use crate::core::task::{NewTask, Task, TaskStatus, TaskUpdate};

pub async fn for_project(client: &ApiClient, project_id: i64) -> Result<Vec<Task>, ApiError> {
    client.get(&format!("tasks/project/{}", project_id)).await
}

pub async fn create(client: &ApiClient, task: &NewTask) -> Result<Task, ApiError> {
    client.post("tasks", task).await
}

pub async fn update(client: &ApiClient, id: i64, update: &TaskUpdate) -> Result<Task, ApiError> {
    client.patch(&format!("tasks/{}", id), update).await
}

pub async fn update_status(client: &ApiClient, id: i64, status: TaskStatus) -> Result<Task, ApiError> {
    update(client, id, &TaskUpdate::status(status)).await
}

pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.delete(&format!("tasks/{}", id)).await
}
