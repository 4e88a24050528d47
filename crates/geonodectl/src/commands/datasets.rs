//! Dataset command handler.

use geonode_client::datasets::{self, DATASETS, DatasetUpload};
use geonode_client::{GeonodeClient, ResourceHandler};

use super::CommandContext;
use crate::cli::{DatasetCommands, DatasetUploadArgs};
use crate::error::Result;
use crate::output;

pub async fn handle(
    client: &GeonodeClient,
    command: &DatasetCommands,
    ctx: &CommandContext,
) -> Result<()> {
    let handler = ResourceHandler::new(client, &DATASETS);
    match command {
        DatasetCommands::List(filter) => super::list(&handler, filter, ctx).await,
        DatasetCommands::Describe { pk } => super::describe(&handler, *pk).await,
        DatasetCommands::Patch { pk, payload } => super::patch(&handler, *pk, payload).await,
        DatasetCommands::Delete { pk } => super::delete(&handler, pk).await,
        DatasetCommands::Upload(args) => upload(client, args, ctx).await,
    }
}

/// Uploads the dataset, fetches the execution request the server created
/// for it and reports its status.
async fn upload(
    client: &GeonodeClient,
    args: &DatasetUploadArgs,
    ctx: &CommandContext,
) -> Result<()> {
    let opts = DatasetUpload {
        file_path: args.file_path.clone(),
        charset: args.charset.clone(),
        time: args.time,
        mosaic: args.mosaic,
        overwrite_existing_layer: args.overwrite_existing_layer,
        skip_existing_layers: args.skip_existing_layers,
    };
    let status = datasets::upload_and_fetch_status(client, &opts).await?;

    if ctx.raw {
        output::print_json(&status)?;
    } else {
        let pairs = [
            ("exec_id", output::field_string(&status, "exec_id")),
            ("status", output::field_string(&status, "status")),
            ("created", output::field_string(&status, "created")),
            ("name", output::field_string(&status, "name")),
            ("link", output::field_string(&status, "link")),
        ];
        output::print_pairs(&pairs);
    }
    Ok(())
}
