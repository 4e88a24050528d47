//! Keywords, thesauri keywords and thesauri keyword labels.

use serde_json::Value;

use crate::client::GeonodeClient;
use crate::error::Result;
use crate::resource::{Column, DeleteRoute, ResourceSpec, unwrap_key};

pub const KEYWORDS: ResourceSpec = ResourceSpec {
    endpoint: "keywords",
    plural_key: "keywords",
    singular_key: "keywords",
    columns: &[
        Column::new("id", "id"),
        Column::new("name", "name"),
        Column::new("slug", "slug"),
        Column::new("link", "link"),
    ],
    delete_route: DeleteRoute::Endpoint,
};

pub const THESAURI_KEYWORDS: ResourceSpec = ResourceSpec {
    endpoint: "tkeywords",
    plural_key: "tkeywords",
    singular_key: "tkeywords",
    columns: &[
        Column::new("keyword", "keyword"),
        Column::new("thesaurus", "thesaurus.slug"),
        Column::new("name", "name"),
        Column::new("slug", "slug"),
        Column::new("uri", "uri"),
    ],
    delete_route: DeleteRoute::Endpoint,
};

pub const THESAURI_KEYWORD_LABELS: ResourceSpec = ResourceSpec {
    endpoint: "tkeywordlabels",
    plural_key: "ThesaurusKeywordLabels",
    singular_key: "ThesaurusKeywordLabels",
    columns: &[
        Column::new("keyword", "keyword"),
        Column::new("lang", "lang"),
        Column::new("label", "label"),
    ],
    delete_route: DeleteRoute::Endpoint,
};

/// Labels are addressed by the keyword they belong to, via a query
/// parameter rather than a path segment.
pub async fn labels_for_keyword(client: &GeonodeClient, keyword: u64) -> Result<Value> {
    let response = client
        .get_with_query(
            THESAURI_KEYWORD_LABELS.endpoint,
            &[("keyword".to_string(), keyword.to_string())],
        )
        .await?;
    unwrap_key(
        response,
        THESAURI_KEYWORD_LABELS.singular_key,
        THESAURI_KEYWORD_LABELS.endpoint,
    )
}
