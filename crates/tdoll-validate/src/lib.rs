use anyhow::Result;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("document is not a JSON array")]
    NotAnArray,

    #[error("entry {0} is not a JSON object")]
    NotAnObject(usize),

    #[error("entry {index} is missing key '{key}'")]
    MissingKey { index: usize, key: &'static str },

    #[error("entry {index} has unexpected key '{key}'")]
    UnexpectedKey { index: usize, key: String },

    #[error("entry {index} key '{key}' is not a string")]
    NonStringValue { index: usize, key: &'static str },

    #[error("entry {index} id '{id}' is not numeric")]
    BadId { index: usize, id: String },

    #[error("entry {index} id {id} is out of order after id {prev_id}")]
    OutOfOrder { index: usize, id: u32, prev_id: u32 },

    #[error("entry {index} is numbered but appears after an unnumbered entry")]
    NumberedAfterBlank { index: usize },
}

/// Expected key set of each catalog entry, in serialization order.
const CATALOG_KEYS: [&str; 4] = ["id", "name", "type", "rarity"];

/// Validate a written catalog file against the output contract.
///
/// Violations are collected rather than failing fast, and logged as
/// warnings; the caller decides whether any of them are fatal.
pub fn validate(file_path: &str) -> Result<Vec<ValidationError>> {
    let contents = std::fs::read_to_string(file_path)?;
    let value: Value = serde_json::from_str(&contents)?;

    let errors = validate_catalog(&value);
    if errors.is_empty() {
        tracing::info!(path = %file_path, "Catalog is valid");
    } else {
        for e in &errors {
            tracing::warn!("{e}");
        }
    }

    Ok(errors)
}

/// Check catalog shape and ordering over loosely parsed JSON.
///
/// Shape: an array of objects, each with exactly the string-valued keys
/// `id, name, type, rarity`. Ordering: numbered entries ascending by
/// integer id, all unnumbered (blank-id) entries after them. Duplicate
/// entries are allowed.
pub fn validate_catalog(value: &Value) -> Vec<ValidationError> {
    let Some(entries) = value.as_array() else {
        return vec![ValidationError::NotAnArray];
    };

    let mut errors = Vec::new();
    let mut prev_id: Option<u32> = None;
    let mut seen_blank = false;

    for (index, entry) in entries.iter().enumerate() {
        let Some(object) = entry.as_object() else {
            errors.push(ValidationError::NotAnObject(index));
            continue;
        };

        for key in CATALOG_KEYS {
            match object.get(key) {
                None => errors.push(ValidationError::MissingKey { index, key }),
                Some(Value::String(_)) => {}
                Some(_) => errors.push(ValidationError::NonStringValue { index, key }),
            }
        }
        for key in object.keys() {
            if !CATALOG_KEYS.contains(&key.as_str()) {
                errors.push(ValidationError::UnexpectedKey {
                    index,
                    key: key.clone(),
                });
            }
        }

        // Ordering checks only apply where the id is a usable string;
        // shape violations above already cover the rest.
        let Some(id) = object.get("id").and_then(Value::as_str) else {
            continue;
        };

        if id.is_empty() {
            seen_blank = true;
            continue;
        }

        let Ok(id_value) = id.parse::<u32>() else {
            errors.push(ValidationError::BadId {
                index,
                id: id.to_string(),
            });
            continue;
        };

        if seen_blank {
            errors.push(ValidationError::NumberedAfterBlank { index });
        }
        if let Some(prev) = prev_id {
            if id_value < prev {
                errors.push(ValidationError::OutOfOrder {
                    index,
                    id: id_value,
                    prev_id: prev,
                });
            }
        }
        prev_id = Some(id_value);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_catalog_passes() {
        let value = json!([
            { "id": "2", "name": "M1911", "type": "HG", "rarity": "2" },
            { "id": "119", "name": "AR-15", "type": "AR", "rarity": "3" },
            { "id": "", "name": "UMP45", "type": "SMG", "rarity": "5" },
        ]);
        assert!(validate_catalog(&value).is_empty());
    }

    #[test]
    fn test_empty_catalog_passes() {
        assert!(validate_catalog(&json!([])).is_empty());
    }

    #[test]
    fn test_duplicates_are_allowed() {
        let value = json!([
            { "id": "57", "name": "UMP45", "type": "SMG", "rarity": "4" },
            { "id": "57", "name": "UMP45", "type": "SMG", "rarity": "4" },
        ]);
        assert!(validate_catalog(&value).is_empty());
    }

    #[test]
    fn test_non_array_document() {
        let errors = validate_catalog(&json!({ "id": "1" }));
        assert!(matches!(errors[0], ValidationError::NotAnArray));
    }

    #[test]
    fn test_non_object_entry() {
        let errors = validate_catalog(&json!(["AR-15"]));
        assert!(matches!(errors[0], ValidationError::NotAnObject(0)));
    }

    #[test]
    fn test_missing_and_unexpected_keys() {
        let value = json!([
            { "id": "1", "name": "M1911", "type": "HG", "stars": "2" },
        ]);
        let errors = validate_catalog(&value);
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::MissingKey { index: 0, key: "rarity" }
        )));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::UnexpectedKey { index: 0, key } if key == "stars")));
    }

    #[test]
    fn test_non_string_value() {
        let value = json!([
            { "id": 119, "name": "AR-15", "type": "AR", "rarity": "3" },
        ]);
        let errors = validate_catalog(&value);
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::NonStringValue { index: 0, key: "id" }
        )));
    }

    #[test]
    fn test_bad_id() {
        let value = json!([
            { "id": "no.4", "name": "Bad", "type": "RF", "rarity": "4" },
        ]);
        let errors = validate_catalog(&value);
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::BadId { index: 0, id } if id == "no.4")));
    }

    #[test]
    fn test_out_of_order() {
        let value = json!([
            { "id": "119", "name": "AR-15", "type": "AR", "rarity": "3" },
            { "id": "2", "name": "M1911", "type": "HG", "rarity": "2" },
        ]);
        let errors = validate_catalog(&value);
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::OutOfOrder { index: 1, id: 2, prev_id: 119 }
        )));
    }

    #[test]
    fn test_numbered_after_blank() {
        let value = json!([
            { "id": "", "name": "UMP45", "type": "SMG", "rarity": "5" },
            { "id": "119", "name": "AR-15", "type": "AR", "rarity": "3" },
        ]);
        let errors = validate_catalog(&value);
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::NumberedAfterBlank { index: 1 })));
    }
}
