//! Free-form JSON payload handling for create/patch operations.
//!
//! Callers supply resource fields either as a JSON literal (`--set`) or
//! as a path to a JSON file (`--json-path`). The two sources are mutually
//! exclusive; where the operation requires a payload, exactly one must be
//! given. Free-form content merged over explicit defaults wins on
//! conflicting keys (last write wins).

use std::path::Path;

use serde_json::Value;

use crate::error::{GeonodeError, Result};

/// Loads the payload from whichever source was given.
///
/// Returns `InvalidInput` when both sources are given, and when neither
/// is. Payloads read from a file drop any `attribute_set` member; the
/// attribute set is managed through its own endpoint and servers reject
/// it inside a generic patch.
pub fn load_json_payload(fields: Option<&str>, json_path: Option<&Path>) -> Result<Value> {
    let value = match (fields, json_path) {
        (Some(_), Some(_)) => {
            return Err(GeonodeError::InvalidInput(
                "'--set' and '--json-path' are mutually exclusive; provide only one".to_string(),
            ));
        }
        (Some(fields), None) => serde_json::from_str(fields).map_err(|e| {
            GeonodeError::InvalidInput(format!("could not decode JSON string '{fields}': {e}"))
        })?,
        (None, Some(path)) => {
            let content = std::fs::read_to_string(path).map_err(|e| {
                GeonodeError::InvalidInput(format!(
                    "could not read JSON file '{}': {e}",
                    path.display()
                ))
            })?;
            let mut value: Value = serde_json::from_str(&content).map_err(|e| {
                GeonodeError::InvalidInput(format!(
                    "could not decode JSON file '{}': {e}",
                    path.display()
                ))
            })?;
            if let Some(object) = value.as_object_mut() {
                object.remove("attribute_set");
            }
            value
        }
        (None, None) => {
            return Err(GeonodeError::InvalidInput(
                "one of '--set' or '--json-path' must be provided".to_string(),
            ));
        }
    };

    if !value.is_object() {
        return Err(GeonodeError::InvalidInput(
            "JSON payload must be an object".to_string(),
        ));
    }
    Ok(value)
}

/// Same as [`load_json_payload`] but absent input is fine and yields `None`.
pub fn load_optional_json_payload(
    fields: Option<&str>,
    json_path: Option<&Path>,
) -> Result<Option<Value>> {
    if fields.is_none() && json_path.is_none() {
        return Ok(None);
    }
    load_json_payload(fields, json_path).map(Some)
}

/// Shallow-merges `overrides` over `base`; override keys win.
#[must_use]
pub fn merge_payload(base: Value, overrides: Option<Value>) -> Value {
    let Some(overrides) = overrides else {
        return base;
    };
    match (base, overrides) {
        (Value::Object(mut base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                base.insert(key, value);
            }
            Value::Object(base)
        }
        (_, overrides) => overrides,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn neither_source_is_invalid_input() {
        let err = load_json_payload(None, None).unwrap_err();
        assert!(matches!(err, GeonodeError::InvalidInput(_)));
    }

    #[test]
    fn both_sources_is_invalid_input() {
        let err = load_json_payload(Some("{}"), Some(Path::new("/tmp/x.json"))).unwrap_err();
        assert!(matches!(err, GeonodeError::InvalidInput(_)));
        assert!(err.to_string().contains("mutually exclusive"));
    }

    #[test]
    fn malformed_json_string_is_invalid_input() {
        let err = load_json_payload(Some("{not json"), None).unwrap_err();
        assert!(matches!(err, GeonodeError::InvalidInput(_)));
    }

    #[test]
    fn file_payload_drops_attribute_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fields.json");
        std::fs::write(
            &path,
            r#"{"title": "new title", "attribute_set": [{"pk": 1}]}"#,
        )
        .unwrap();

        let value = load_json_payload(None, Some(&path)).unwrap();
        assert_eq!(value, json!({"title": "new title"}));
    }

    #[test]
    fn overrides_win_on_conflicting_keys() {
        let merged = merge_payload(
            json!({"title": "default", "resource_type": "map"}),
            Some(json!({"title": "explicit", "abstract": "text"})),
        );
        assert_eq!(
            merged,
            json!({"title": "explicit", "resource_type": "map", "abstract": "text"})
        );
    }

    #[test]
    fn no_overrides_keeps_base() {
        let merged = merge_payload(json!({"title": "default"}), None);
        assert_eq!(merged, json!({"title": "default"}));
    }
}
