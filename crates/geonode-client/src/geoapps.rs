//! GeoApps (dashboards, geostories and other app resources).

use crate::resource::{Column, DeleteRoute, ResourceSpec};

pub const GEOAPPS: ResourceSpec = ResourceSpec {
    endpoint: "geoapps",
    plural_key: "geoapps",
    singular_key: "geoapp",
    columns: &[
        Column::new("pk", "pk"),
        Column::new("title", "title"),
        Column::new("owner", "owner.username"),
        Column::new("resource_type", "resource_type"),
        Column::new("detail_url", "detail_url"),
    ],
    delete_route: DeleteRoute::ResourceService,
};
