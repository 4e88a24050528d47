//! # geonode-client
//!
//! REST client for the GeoNode v2 API.
//!
//! A [`GeonodeClient`] issues authenticated requests against one GeoNode
//! instance. Resource types are described by [`ResourceSpec`] values
//! (endpoint, response envelope keys, table columns) and driven through a
//! single generic [`ResourceHandler`]; the per-resource modules add the
//! operations that do not fit the generic shape (multipart uploads, map
//! blob assembly, metadata downloads).
//!
//! # Example
//!
//! ```rust,no_run
//! use geonode_client::{GeonodeClient, ListParams, ResourceHandler, datasets};
//!
//! # async fn run() -> geonode_client::Result<()> {
//! let client = GeonodeClient::builder()
//!     .base_url("https://geonode.example.com/api/v2/")
//!     .auth_basic("YWRtaW46YWRtaW4=")
//!     .build()?;
//!
//! let handler = ResourceHandler::new(&client, &datasets::DATASETS);
//! let page = handler
//!     .list(&ListParams::new().page(1).filter("is_published", "true"))
//!     .await?;
//! println!("{} datasets", page.len());
//! # Ok(())
//! # }
//! ```

pub mod attributes;
pub mod client;
pub mod datasets;
pub mod documents;
pub mod error;
pub mod execution;
pub mod geoapps;
pub mod keywords;
pub mod maps;
pub mod params;
pub mod payload;
pub mod resource;
pub mod resources;
pub mod uploads;
pub mod users;

pub use client::{FilePart, GeonodeClient, GeonodeClientBuilder};
pub use error::{GeonodeError, Result};
pub use params::ListParams;
pub use resource::{
    Column, DeleteOutcome, DeleteRoute, ResourceHandler, ResourceSpec, parse_pk_spec,
};
