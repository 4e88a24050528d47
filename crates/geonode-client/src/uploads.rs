//! Upload sessions as tracked by the server.

use crate::resource::{Column, DeleteRoute, ResourceSpec};

pub const UPLOADS: ResourceSpec = ResourceSpec {
    endpoint: "uploads",
    plural_key: "uploads",
    singular_key: "upload",
    columns: &[
        Column::new("id", "id"),
        Column::new("name", "name"),
        Column::new("create_date", "create_date"),
        Column::new("state", "state"),
        Column::new("link", "link"),
    ],
    delete_route: DeleteRoute::Endpoint,
};
