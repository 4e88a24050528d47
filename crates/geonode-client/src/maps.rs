//! Maps: creation of a MapStore map from a base template plus dataset
//! layers.
//!
//! Map creation is the one composite operation in the API surface: the
//! client downloads the instance's MapStore base template, appends the
//! standard background layers, fetches each requested dataset to derive
//! its blob layer (bbox, OGC service URL, style) and posts the assembled
//! blob together with the `maplayers` list.

use serde_json::{Value, json};
use tracing::debug;
use uuid::Uuid;

use crate::client::GeonodeClient;
use crate::datasets::DATASETS;
use crate::error::{GeonodeError, Result};
use crate::payload::merge_payload;
use crate::resource::{Column, DeleteRoute, ResourceHandler, ResourceSpec};

pub const MAPS: ResourceSpec = ResourceSpec {
    endpoint: "maps",
    plural_key: "maps",
    singular_key: "map",
    columns: &[
        Column::new("pk", "pk"),
        Column::new("title", "title"),
        Column::new("owner", "owner.username"),
        Column::new("subtype", "subtype"),
        Column::new("detail_url", "detail_url"),
    ],
    delete_route: DeleteRoute::ResourceService,
};

const OGC_WFS_LINK_TYPE: &str = "OGC:WFS";
const OGC_WCS_LINK_TYPE: &str = "OGC:WCS";

/// Downloads the MapStore base template from the instance statics and
/// appends the four standard background layers.
async fn build_blob(client: &GeonodeClient) -> Result<Value> {
    let template_url = format!("{}/static/mapstore/configs/map.json", client.site_url());
    debug!(%template_url, "fetching map template");
    let mut blob: Value = client.download(&template_url).await?.json().await?;

    let layers = blob
        .pointer_mut("/map/layers")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| GeonodeError::Protocol {
            key: "map.layers".to_string(),
            context: "mapstore template".to_string(),
        })?;
    layers.push(json!({
        "id": "mapnik__0",
        "name": "mapnik",
        "type": "osm",
        "group": "background",
        "title": "Open Street Map",
        "hidden": false,
        "source": "osm",
        "expanded": false,
        "dimensions": [],
        "singleTile": false,
        "visibility": true,
        "hideLoading": false,
        "useForElevation": false,
        "handleClickOnLayer": false,
    }));
    layers.push(json!({
        "id": "OpenTopoMap__1",
        "name": "OpenTopoMap",
        "type": "tileprovider",
        "group": "background",
        "title": "OpenTopoMap",
        "hidden": false,
        "source": "OpenTopoMap",
        "expanded": false,
        "provider": "OpenTopoMap",
        "dimensions": [],
        "singleTile": false,
        "visibility": false,
        "hideLoading": false,
        "useForElevation": false,
        "handleClickOnLayer": false,
    }));
    layers.push(json!({
        "id": "s2cloudless",
        "url": "https://maps.geosolutionsgroup.com/geoserver/wms",
        "name": "s2cloudless:s2cloudless",
        "type": "wms",
        "group": "background",
        "title": "Sentinel-2 cloudless - https://s2maps.eu",
        "format": "image/jpeg",
        "hidden": false,
        "expanded": false,
        "dimensions": [],
        "singleTile": false,
        "visibility": false,
        "hideLoading": false,
        "useForElevation": false,
        "handleClickOnLayer": false,
    }));
    layers.push(json!({
        "id": "none",
        "name": "empty",
        "type": "empty",
        "group": "background",
        "title": "Empty Background",
        "hidden": false,
        "source": "ol",
        "expanded": false,
        "dimensions": [],
        "singleTile": false,
        "visibility": false,
        "hideLoading": false,
        "useForElevation": false,
        "handleClickOnLayer": false,
    }));

    Ok(blob)
}

/// Builds the blob layer for one dataset. The OGC service URL comes from
/// the dataset's WFS (or WCS) link, the bbox from its extent and the
/// style from its alternate name.
fn build_blob_layer(layer_id: &str, dataset: &Value) -> Result<Value> {
    let links = dataset
        .get("links")
        .and_then(Value::as_array)
        .ok_or_else(|| GeonodeError::Protocol {
            key: "links".to_string(),
            context: "dataset".to_string(),
        })?;
    let service_url = links
        .iter()
        .filter_map(|link| {
            let link_type = link.get("link_type").and_then(Value::as_str)?;
            if link_type == OGC_WFS_LINK_TYPE || link_type == OGC_WCS_LINK_TYPE {
                link.get("url").and_then(Value::as_str)
            } else {
                None
            }
        })
        .next_back()
        .ok_or_else(|| GeonodeError::Protocol {
            key: "links[OGC:WFS|OGC:WCS]".to_string(),
            context: "dataset".to_string(),
        })?;

    let extent = dataset.get("extent").ok_or_else(|| GeonodeError::Protocol {
        key: "extent".to_string(),
        context: "dataset".to_string(),
    })?;
    let coords = extent
        .get("coords")
        .and_then(Value::as_array)
        .filter(|c| c.len() >= 4)
        .ok_or_else(|| GeonodeError::Protocol {
            key: "extent.coords".to_string(),
            context: "dataset".to_string(),
        })?;

    let title = dataset.get("title").cloned().unwrap_or(Value::Null);
    let alternate = dataset.get("alternate").cloned().unwrap_or(Value::Null);
    let layer_type =
        if dataset.get("ptype").and_then(Value::as_str) == Some("gxp_wmscsource") {
            "wms"
        } else {
            "wfs"
        };

    Ok(json!({
        "id": layer_id,
        "url": service_url,
        "bbox": {
            "crs": extent.get("srid"),
            "bounds": {
                "minx": coords[0],
                "miny": coords[1],
                "maxx": coords[2],
                "maxy": coords[3],
            },
        },
        "name": alternate,
        "type": layer_type,
        "style": alternate,
        "title": title,
        "hidden": false,
        "search": {"url": service_url, "type": "wfs"},
        "expanded": false,
        "dimensions": [],
        "singleTile": false,
        "visibility": true,
        "hideLoading": false,
        "extendedParams": {
            "pk": dataset.get("pk"),
            "mapLayer": {
                "dataset": dataset,
                "defaultStyle": {"name": alternate, "title": alternate},
            },
        },
        "useForElevation": false,
        "handleClickOnLayer": false,
    }))
}

/// Creates a map with the given title, free-form overrides and dataset
/// layers, and returns the created map unwrapped from its envelope.
pub async fn create(
    client: &GeonodeClient,
    title: Option<&str>,
    overrides: Option<Value>,
    maplayers: &[u64],
) -> Result<Value> {
    let datasets = ResourceHandler::new(client, &DATASETS);
    let mut blob = build_blob(client).await?;

    let mut maplayers_list = Vec::with_capacity(maplayers.len());
    for (order, &pk) in maplayers.iter().enumerate() {
        let dataset = datasets.get(pk).await?;
        // the uuid ties the blob layer to its api maplayer entry
        let layer_id = Uuid::new_v4().to_string();
        let alternate = dataset.get("alternate").cloned().unwrap_or(Value::Null);

        let blob_layer = build_blob_layer(&layer_id, &dataset)?;
        blob.pointer_mut("/map/layers")
            .and_then(Value::as_array_mut)
            .ok_or_else(|| GeonodeError::Protocol {
                key: "map.layers".to_string(),
                context: "mapstore template".to_string(),
            })?
            .push(blob_layer);

        maplayers_list.push(json!({
            "extra_params": {"msId": layer_id, "styles": []},
            "current_style": alternate,
            "name": alternate,
            "order": order,
            "visibility": true,
            "opacity": 1.0,
        }));
    }

    let base = json!({
        "resource_type": MAPS.singular_key,
        "title": title,
        "blob": blob,
        "maplayers": maplayers_list,
    });
    let body = merge_payload(base, overrides);

    ResourceHandler::new(client, &MAPS).create(&body).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Value {
        json!({
            "pk": 5,
            "title": "Soil samples",
            "alternate": "geonode:soil_samples",
            "ptype": "gxp_wmscsource",
            "extent": {
                "srid": "EPSG:4326",
                "coords": [10.0, 50.0, 12.0, 54.0],
            },
            "links": [
                {"link_type": "OGC:WMS", "url": "https://example.com/wms"},
                {"link_type": "OGC:WFS", "url": "https://example.com/wfs"},
            ],
        })
    }

    #[test]
    fn blob_layer_derives_bbox_and_service_url() {
        let layer = build_blob_layer("layer-1", &dataset()).unwrap();
        assert_eq!(layer["url"], "https://example.com/wfs");
        assert_eq!(layer["type"], "wms");
        assert_eq!(layer["bbox"]["crs"], "EPSG:4326");
        assert_eq!(layer["bbox"]["bounds"]["minx"], 10.0);
        assert_eq!(layer["bbox"]["bounds"]["maxy"], 54.0);
        assert_eq!(layer["style"], "geonode:soil_samples");
        assert_eq!(layer["extendedParams"]["pk"], 5);
    }

    #[test]
    fn blob_layer_without_ogc_link_is_protocol_error() {
        let mut dataset = dataset();
        dataset["links"] = json!([{"link_type": "OGC:WMS", "url": "https://example.com/wms"}]);
        let err = build_blob_layer("layer-1", &dataset).unwrap_err();
        assert!(matches!(err, GeonodeError::Protocol { .. }));
    }

    #[test]
    fn non_wms_ptype_is_wfs_layer() {
        let mut dataset = dataset();
        dataset["ptype"] = json!("gxp_wfssource");
        let layer = build_blob_layer("layer-1", &dataset).unwrap();
        assert_eq!(layer["type"], "wfs");
    }
}
