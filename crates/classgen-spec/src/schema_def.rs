use jsonschema::Validator;
use schemars::schema_for;
use serde::Serialize;

use crate::types::class::ClassSpec;
use crate::types::common::{AccessLevel, Backend, Modifier};
use crate::types::error::{ErrorEntry, E_SCHEMA_VIOLATION};

/// Generate a JSON Schema for `ClassSpec`.
pub fn generate_class_schema() -> serde_json::Value {
    serde_json::to_value(schema_for!(ClassSpec)).expect("schema serialization should not fail")
}

/// Check a raw description document against the class schema.
///
/// Entry paths use the same `$.methods[0].access` notation as the other
/// diagnostics, and violations on enum-valued fields carry the accepted
/// spellings as a suggestion.
pub fn validate_class_value(value: &serde_json::Value, file: &str) -> Vec<ErrorEntry> {
    let validator = match Validator::new(&generate_class_schema()) {
        Ok(v) => v,
        Err(e) => {
            return vec![ErrorEntry::error(
                E_SCHEMA_VIOLATION,
                format!("Class schema failed to compile: {e}"),
                file,
                "$",
            )];
        }
    };

    validator
        .iter_errors(value)
        .map(|err| {
            let pointer = err.instance_path.as_str();
            let entry = ErrorEntry::error(E_SCHEMA_VIOLATION, err.to_string(), file, &json_path(pointer));
            match field_hint(pointer) {
                Some(hint) => entry.with_suggestion(hint),
                None => entry,
            }
        })
        .collect()
}

/// `/methods/0/access` → `$.methods[0].access`
fn json_path(pointer: &str) -> String {
    let mut path = String::from("$");
    for segment in pointer.split('/').filter(|s| !s.is_empty()) {
        if segment.bytes().all(|b| b.is_ascii_digit()) {
            path.push_str(&format!("[{segment}]"));
        } else {
            path.push('.');
            path.push_str(&segment.replace("~1", "/").replace("~0", "~"));
        }
    }
    path
}

/// Accepted values for the field the pointer lands in, if it is one of the
/// enum-valued fields of a description.
fn field_hint(pointer: &str) -> Option<String> {
    let field = pointer
        .split('/')
        .rev()
        .find(|s| !s.is_empty() && !s.bytes().all(|b| b.is_ascii_digit()))?;

    match field {
        "target" => Some(format!("Use one of: {}", serde_names(&Backend::ALL))),
        "access" => Some(format!("Use one of: {}", serde_names(&AccessLevel::ALL))),
        "modifiers" => Some(format!("Use one of: {}", serde_names(&Modifier::ALL))),
        "body" => Some(r#"Statements look like { "kind": "print", "text": "..." }"#.to_string()),
        _ => None,
    }
}

/// Names as they are spelled in description files.
fn serde_names<T: Serialize>(items: &[T]) -> String {
    items
        .iter()
        .filter_map(|item| match serde_json::to_value(item) {
            Ok(serde_json::Value::String(name)) => Some(name),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid_class_json() -> serde_json::Value {
        serde_json::json!({
            "target": "csharp",
            "name": "Service",
            "access": "internal",
            "methods": [
                {
                    "name": "Run",
                    "returnType": "void",
                    "access": "protected_internal",
                    "modifiers": ["async"],
                    "body": [ { "kind": "print", "text": "running" } ]
                }
            ]
        })
    }

    #[test]
    fn generated_schema_is_valid_json_schema() {
        let schema = generate_class_schema();

        assert!(schema.is_object());
        assert!(schema.get("$schema").is_some() || schema.get("type").is_some());
        assert!(schema.get("properties").is_some() || schema.get("$ref").is_some());
    }

    #[test]
    fn valid_class_passes_validation() {
        let errors = validate_class_value(&valid_class_json(), "service.class.json");
        assert!(errors.is_empty(), "Expected no errors, got: {errors:?}");
    }

    #[test]
    fn missing_name_fails_validation() {
        let mut value = valid_class_json();
        value.as_object_mut().unwrap().remove("name");

        let errors = validate_class_value(&value, "service.class.json");
        assert!(!errors.is_empty());
        assert!(errors.iter().all(|e| e.code == E_SCHEMA_VIOLATION));
        assert!(errors.iter().all(|e| e.file == "service.class.json"));
    }

    #[test]
    fn bad_access_level_reports_path_and_spellings() {
        let mut value = valid_class_json();
        value["methods"][0]["access"] = serde_json::json!("friend");

        let errors = validate_class_value(&value, "service.class.json");
        let entry = errors
            .iter()
            .find(|e| e.path == "$.methods[0].access")
            .unwrap_or_else(|| panic!("Expected error at $.methods[0].access, got: {errors:?}"));
        let hint = entry.suggestion.as_deref().unwrap();
        assert!(hint.contains("protected_internal"), "{hint}");
    }

    #[test]
    fn unknown_modifier_lists_modifier_names() {
        let mut value = valid_class_json();
        value["methods"][0]["modifiers"] = serde_json::json!(["async", "inline"]);

        let errors = validate_class_value(&value, "service.class.json");
        let entry = errors
            .iter()
            .find(|e| e.path == "$.methods[0].modifiers[1]")
            .unwrap_or_else(|| panic!("Expected error on the second modifier, got: {errors:?}"));
        assert!(entry.suggestion.as_deref().unwrap().contains("synchronized"));
    }

    #[test]
    fn json_path_notation() {
        assert_eq!(json_path(""), "$");
        assert_eq!(json_path("/target"), "$.target");
        assert_eq!(json_path("/methods/2/body/0/text"), "$.methods[2].body[0].text");
    }

    #[test]
    fn hints_only_for_enum_fields() {
        assert!(field_hint("/target").unwrap().contains("csharp"));
        assert_eq!(field_hint("/name"), None);
        assert_eq!(field_hint(""), None);
    }
}
