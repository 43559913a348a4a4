//! Response assertions and JSON Schema validation
//!
//! Decouples "what shape must this response have" from "how do I compare
//! it": schemas are plain JSON documents, reusable across every exercise
//! of the same endpoint.

use serde_json::Value;

use crate::client::ApiResponse;
use crate::error::{ProbeError, Result};

/// Assert an exact status code
pub fn expect_status(response: &ApiResponse, expected: u16) -> Result<()> {
    if response.status == expected {
        Ok(())
    } else {
        Err(ProbeError::StatusMismatch {
            expected: expected.to_string(),
            actual: response.status,
        })
    }
}

/// Assert a status in the success range (200-299)
pub fn expect_success(response: &ApiResponse) -> Result<()> {
    if response.is_success() {
        Ok(())
    } else {
        Err(ProbeError::StatusMismatch {
            expected: "success (200-299)".to_string(),
            actual: response.status,
        })
    }
}

/// Validate a payload against a JSON Schema.
///
/// Collects every violation and joins the validator's diagnostics (field
/// paths plus constraint text) into one error message, so a failed run
/// pinpoints the violated contract without extra logging.
pub fn validate_schema(data: &Value, schema: &Value) -> Result<()> {
    let compiled = jsonschema::validator_for(schema).map_err(|e| ProbeError::SchemaFailed {
        details: format!("invalid schema: {}", e),
    })?;

    let errors: Vec<String> = compiled
        .iter_errors(data)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ProbeError::SchemaFailed {
            details: errors.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ResponseBody;
    use serde_json::json;
    use std::collections::HashMap;

    fn response_with_status(status: u16) -> ApiResponse {
        ApiResponse {
            status,
            body: ResponseBody::Json(json!({})),
            content_type: Some("application/json".to_string()),
            headers: HashMap::new(),
        }
    }

    #[test]
    fn exact_status_match_passes() {
        assert!(expect_status(&response_with_status(201), 201).is_ok());
    }

    #[test]
    fn status_mismatch_reports_both_codes() {
        let err = expect_status(&response_with_status(404), 200).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("200"));
        assert!(msg.contains("404"));
    }

    #[test]
    fn success_range_accepts_any_2xx() {
        assert!(expect_success(&response_with_status(200)).is_ok());
        assert!(expect_success(&response_with_status(204)).is_ok());
        assert!(expect_success(&response_with_status(299)).is_ok());
        assert!(expect_success(&response_with_status(301)).is_err());
        assert!(expect_success(&response_with_status(500)).is_err());
    }

    #[test]
    fn conforming_payload_validates() {
        let schema = json!({
            "type": "object",
            "required": ["token"],
            "properties": { "token": { "type": "string" } }
        });
        assert!(validate_schema(&json!({"token": "abc"}), &schema).is_ok());
    }

    #[test]
    fn violation_names_the_offending_field() {
        let schema = json!({
            "type": "object",
            "required": ["token"],
            "properties": { "token": { "type": "string" } }
        });

        let err = validate_schema(&json!({"token": 42}), &schema).unwrap_err();
        assert!(err.to_string().contains("token"), "{}", err);
    }

    #[test]
    fn all_violations_are_collected() {
        let schema = json!({
            "type": "object",
            "required": ["id", "name"],
            "properties": {
                "id": { "type": "string" },
                "name": { "type": "string" }
            }
        });

        let err = validate_schema(&json!({}), &schema).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("id"), "{}", msg);
        assert!(msg.contains("name"), "{}", msg);
    }

    #[test]
    fn malformed_schema_is_reported() {
        let schema = json!({"type": "no-such-type"});
        let err = validate_schema(&json!({}), &schema).unwrap_err();
        assert!(matches!(err, ProbeError::SchemaFailed { .. }));
    }
}
