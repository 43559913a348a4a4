//! Authentication service façade

use serde::Serialize;
use serde_json::json;

use crate::assertions::{expect_status, validate_schema};
use crate::client::{ApiClient, ApiResponse, RequestOptions};
use crate::error::{ProbeError, Result};
use crate::schemas;

/// Login request payload
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Authentication operations over the request layer
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// POST `/login`.
    ///
    /// Selects the error schema when the caller opted into
    /// `ignore_errors` (deliberate failure-path exercise), the success
    /// schema otherwise. A schema already present in the options wins.
    pub async fn login(
        &self,
        data: &LoginRequest,
        mut options: RequestOptions,
    ) -> Result<ApiResponse> {
        if options.schema.is_none() {
            options.schema = Some(if options.ignore_errors {
                schemas::login_error()
            } else {
                schemas::login_success()
            });
        }

        let body = json!({ "email": data.email, "password": data.password });
        self.client.post("/login", &body, options).await
    }

    /// Verify a successful login: 200, success schema, non-empty token.
    pub fn verify_successful_login(&self, response: &ApiResponse) -> Result<()> {
        expect_status(response, 200)?;
        let data = response.json()?;
        validate_schema(data, &schemas::login_success())?;

        let token = data["token"].as_str().unwrap_or_default();
        if token.is_empty() {
            return Err(ProbeError::SchemaFailed {
                details: "login response token is empty".to_string(),
            });
        }
        Ok(())
    }

    /// Verify a failed login: 401, error schema, non-empty error message.
    pub fn verify_failed_login(&self, response: &ApiResponse) -> Result<()> {
        expect_status(response, 401)?;
        let data = response.json()?;
        validate_schema(data, &schemas::login_error())?;

        let error = data["error"].as_str().unwrap_or_default();
        if error.is_empty() {
            return Err(ProbeError::SchemaFailed {
                details: "login error response has no error message".to_string(),
            });
        }
        Ok(())
    }
}
