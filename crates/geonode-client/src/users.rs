//! Users: account listing, creation and the per-user sub-endpoints.

use serde_json::{Value, json};

use crate::client::GeonodeClient;
use crate::error::{GeonodeError, Result};
use crate::params::ListParams;
use crate::payload::merge_payload;
use crate::resource::{Column, DeleteRoute, ResourceHandler, ResourceSpec};

pub const USERS: ResourceSpec = ResourceSpec {
    endpoint: "users",
    plural_key: "users",
    singular_key: "user",
    columns: &[
        Column::new("pk", "pk"),
        Column::new("username", "username"),
        Column::new("first_name", "first_name"),
        Column::new("last_name", "last_name"),
        Column::new("email", "email"),
        Column::new("is_staff", "is_staff"),
        Column::new("is_superuser", "is_superuser"),
    ],
    delete_route: DeleteRoute::Endpoint,
};

/// Explicit fields for user creation, merged under any free-form JSON
/// overrides the caller supplies (overrides win).
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: Option<String>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_superuser: bool,
    pub is_staff: bool,
}

/// Creates a user. Without overrides a username is required; with
/// overrides the override object must carry whatever the server needs.
pub async fn create(
    client: &GeonodeClient,
    user: &NewUser,
    overrides: Option<Value>,
) -> Result<Value> {
    if overrides.is_none() && user.username.is_none() {
        return Err(GeonodeError::InvalidInput(
            "user creation needs '--username' or a JSON payload".to_string(),
        ));
    }
    let base = json!({
        "username": user.username,
        "email": user.email,
        "first_name": user.first_name,
        "last_name": user.last_name,
        "is_superuser": user.is_superuser,
        "is_staff": user.is_staff,
    });
    let body = merge_payload(base, overrides);
    ResourceHandler::new(client, &USERS).create(&body).await
}

/// The groups a user belongs to. The response is returned verbatim; it
/// has no resource envelope.
pub async fn groups(client: &GeonodeClient, pk: u64) -> Result<Value> {
    client
        .get(&format!("users/{pk}/groups"), &ListParams::new())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GeonodeClient {
        GeonodeClient::builder()
            .base_url("https://geonode.example.com/api/v2/")
            .auth_basic("dG9rZW4=")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn create_without_username_or_payload_is_invalid_input() {
        let err = create(&client(), &NewUser::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, GeonodeError::InvalidInput(_)));
        assert!(err.to_string().contains("username"));
    }
}
