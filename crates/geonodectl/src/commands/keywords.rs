//! Keyword, thesauri keyword and thesauri keyword label handlers.
//!
//! All three share the same verbs and differ only in their resource
//! spec, except labels, which are addressed by keyword id via a query
//! parameter instead of a path segment.

use geonode_client::keywords::{self, KEYWORDS, THESAURI_KEYWORD_LABELS, THESAURI_KEYWORDS};
use geonode_client::{GeonodeClient, ResourceHandler, ResourceSpec};

use super::CommandContext;
use crate::cli::KeywordCommands;
use crate::error::Result;
use crate::output;

pub async fn handle_keywords(
    client: &GeonodeClient,
    command: &KeywordCommands,
    ctx: &CommandContext,
) -> Result<()> {
    handle_spec(client, &KEYWORDS, command, ctx).await
}

pub async fn handle_tkeywords(
    client: &GeonodeClient,
    command: &KeywordCommands,
    ctx: &CommandContext,
) -> Result<()> {
    handle_spec(client, &THESAURI_KEYWORDS, command, ctx).await
}

pub async fn handle_tkeywordlabels(
    client: &GeonodeClient,
    command: &KeywordCommands,
    ctx: &CommandContext,
) -> Result<()> {
    match command {
        KeywordCommands::List(filter) => {
            let handler = ResourceHandler::new(client, &THESAURI_KEYWORD_LABELS);
            super::list(&handler, filter, ctx).await
        }
        KeywordCommands::Describe { pk } => {
            let labels = keywords::labels_for_keyword(client, *pk).await?;
            output::print_json(&labels)
        }
    }
}

async fn handle_spec(
    client: &GeonodeClient,
    spec: &ResourceSpec,
    command: &KeywordCommands,
    ctx: &CommandContext,
) -> Result<()> {
    let handler = ResourceHandler::new(client, spec);
    match command {
        KeywordCommands::List(filter) => super::list(&handler, filter, ctx).await,
        KeywordCommands::Describe { pk } => super::describe(&handler, *pk).await,
    }
}
