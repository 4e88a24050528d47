//! Document command handler.

use std::path::Path;

use geonode_client::documents::{self, DOCUMENTS, DocumentUpload};
use geonode_client::{GeonodeClient, ResourceHandler};

use super::CommandContext;
use crate::cli::DocumentCommands;
use crate::error::Result;
use crate::output;

pub async fn handle(
    client: &GeonodeClient,
    command: &DocumentCommands,
    ctx: &CommandContext,
) -> Result<()> {
    let handler = ResourceHandler::new(client, &DOCUMENTS);
    match command {
        DocumentCommands::List(filter) => super::list(&handler, filter, ctx).await,
        DocumentCommands::Describe { pk } => super::describe(&handler, *pk).await,
        DocumentCommands::Patch { pk, payload } => super::patch(&handler, *pk, payload).await,
        DocumentCommands::Delete { pk } => super::delete(&handler, pk).await,
        DocumentCommands::Upload {
            file_path,
            metadata_only,
            charset,
        } => upload(client, file_path, *metadata_only, charset, ctx).await,
    }
}

async fn upload(
    client: &GeonodeClient,
    file_path: &Path,
    metadata_only: bool,
    charset: &str,
    ctx: &CommandContext,
) -> Result<()> {
    let opts = DocumentUpload {
        file_path: file_path.to_path_buf(),
        charset: charset.to_string(),
        metadata_only,
    };
    let document = documents::upload(client, &opts).await?;

    if ctx.raw {
        output::print_json(&document)?;
    } else {
        let pairs = [
            ("name", output::field_string(&document, "title")),
            ("state", output::field_string(&document, "state")),
            ("subtype", output::field_string(&document, "subtype")),
            ("mimetype", output::field_string(&document, "mime_type")),
            ("detail-url", output::field_string(&document, "detail_url")),
            ("download-url", output::field_string(&document, "href")),
        ];
        output::print_pairs(&pairs);
    }
    Ok(())
}
