use super::{ApiClient, ApiError, with_query};
use crate::core::application::{Application, ApplicationKind, NewApplication, ReviewAction};

/// Applications submitted by the signed-in user.
pub async fn list_mine(client: &ApiClient) -> Result<Vec<Application>, ApiError> {
    client.get("applications").await
}

/// Applications to one project or hackathon. Only its owner may list them.
pub async fn list_for_target(
    client: &ApiClient,
    kind: ApplicationKind,
    target_id: i64,
) -> Result<Vec<Application>, ApiError> {
    let path = with_query(
        "applications",
        &[
            ("type", Some(kind.as_str().to_string())),
            ("target_id", Some(target_id.to_string())),
        ],
    );
    client.get(&path).await
}

pub async fn create(client: &ApiClient, application: &NewApplication) -> Result<Application, ApiError> {
    client.post("applications", application).await
}

pub async fn review(client: &ApiClient, id: i64, action: ReviewAction) -> Result<Application, ApiError> {
    client
        .post_action(&format!("applications/{}/{}", id, action.path_segment()))
        .await
}
