//! JSON Schema documents for response validation
//!
//! Schemas are data: the same document validates an endpoint whether it
//! was exercised through the API layer or triggered from the UI.

use serde_json::{json, Value};

/// Successful login response: a non-empty token
pub fn login_success() -> Value {
    json!({
        "type": "object",
        "required": ["token"],
        "properties": {
            "token": { "type": "string", "minLength": 1 }
        }
    })
}

/// Failed login response: an error message
pub fn login_error() -> Value {
    json!({
        "type": "object",
        "required": ["error"],
        "properties": {
            "error": { "type": "string" }
        }
    })
}

/// Standard 4xx error body shape
pub fn api_error() -> Value {
    json!({
        "type": "object",
        "required": ["statusCode", "error", "message"],
        "properties": {
            "statusCode": { "type": "integer" },
            "error": { "type": "string" },
            "message": { "type": "string" }
        }
    })
}

/// Create/upload responses that only guarantee an id
pub fn id_only() -> Value {
    json!({
        "type": "object",
        "required": ["id"],
        "properties": {
            "id": { "type": ["string", "integer"] }
        }
    })
}

/// Plan file listing
pub fn plan_file_list() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "required": ["id", "name", "planId", "type"],
            "properties": {
                "id": { "type": ["string", "integer"] },
                "name": { "type": "string" },
                "size": { "type": "integer" },
                "url": { "type": "string" },
                "planId": { "type": ["string", "integer"] },
                "type": { "type": "string" }
            }
        }
    })
}
