//! User command handler.

use geonode_client::payload::load_optional_json_payload;
use geonode_client::resources::RESOURCES;
use geonode_client::users::{self, NewUser, USERS};
use geonode_client::{GeonodeClient, ResourceHandler};

use super::CommandContext;
use crate::cli::{FilterArgs, UserCommands};
use crate::error::Result;
use crate::output;

pub async fn handle(
    client: &GeonodeClient,
    command: &UserCommands,
    ctx: &CommandContext,
) -> Result<()> {
    let handler = ResourceHandler::new(client, &USERS);
    match command {
        UserCommands::List(filter) => super::list(&handler, filter, ctx).await,
        UserCommands::Patch { pk, payload } => super::patch(&handler, *pk, payload).await,
        UserCommands::Delete { pk } => super::delete(&handler, pk).await,
        UserCommands::Describe {
            pk,
            user_groups,
            user_resources,
        } => describe(client, *pk, *user_groups, *user_resources, ctx).await,
        UserCommands::Create {
            username,
            email,
            first_name,
            last_name,
            is_superuser,
            is_staff,
            payload,
        } => {
            let overrides =
                load_optional_json_payload(payload.fields.as_deref(), payload.json_path.as_deref())?;
            let user = NewUser {
                username: username.clone(),
                email: email.clone(),
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                is_superuser: *is_superuser,
                is_staff: *is_staff,
            };
            let created = users::create(client, &user, overrides).await?;
            output::print_json(&created)
        }
    }
}

/// `describe` has two sub-views: the user's groups (raw JSON) and the
/// resources visible to the user (rendered with the resource columns).
async fn describe(
    client: &GeonodeClient,
    pk: u64,
    user_groups: bool,
    user_resources: bool,
    ctx: &CommandContext,
) -> Result<()> {
    if user_groups {
        let groups = users::groups(client, pk).await?;
        return output::print_json(&groups);
    }
    if user_resources {
        let handler = ResourceHandler::new(client, &RESOURCES);
        return super::list(&handler, &FilterArgs::default(), ctx).await;
    }
    super::describe(&ResourceHandler::new(client, &USERS), pk).await
}
