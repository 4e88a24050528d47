//! Execution request command handler.

use geonode_client::execution::{self, EXECUTION_REQUESTS};
use geonode_client::{GeonodeClient, ResourceHandler};

use super::CommandContext;
use crate::cli::ExecutionRequestCommands;
use crate::error::Result;
use crate::output;

pub async fn handle(
    client: &GeonodeClient,
    command: &ExecutionRequestCommands,
    ctx: &CommandContext,
) -> Result<()> {
    match command {
        ExecutionRequestCommands::List(filter) => {
            let handler = ResourceHandler::new(client, &EXECUTION_REQUESTS);
            super::list(&handler, filter, ctx).await
        }
        ExecutionRequestCommands::Describe { exec_id } => {
            let request = execution::get(client, exec_id).await?;
            output::print_json(&request)
        }
    }
}
