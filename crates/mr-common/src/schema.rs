//! Schema versioning and JSON schema export.

use crate::classification::ClassificationResult;

/// Version of the classification input and report payload schemas.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// JSON schema describing the classifier payload accepted by the engine.
pub fn classification_schema() -> serde_json::Value {
    let schema = schemars::schema_for!(ClassificationResult);
    serde_json::to_value(&schema).unwrap_or(serde_json::Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_uses_wire_names() {
        let schema = classification_schema();
        let props = &schema["properties"];
        assert!(props.get("class").is_some());
        assert!(props.get("confidence").is_some());
        assert!(props.get("label").is_none());
    }
}
