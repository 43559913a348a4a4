//! HTTP request layer
//!
//! Single chokepoint for request construction and response interpretation:
//! every caller gets the same header defaults, the same JSON/raw-text
//! disambiguation, and the same schema enforcement. Service façades wrap
//! [`ApiClient`] instead of re-implementing parsing and validation.

use std::collections::HashMap;
use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use crate::assertions::validate_schema;
use crate::config::EnvConfig;
use crate::error::{ProbeError, Result};

/// HTTP methods supported by the request layer.
///
/// The set is closed, so an unsupported method is unrepresentable rather
/// than a runtime error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed response body.
///
/// JSON content types are parsed into structured data; anything else is
/// kept as raw text so callers pattern-match instead of guessing.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Raw(String),
}

impl ResponseBody {
    /// Structured data, if the body was JSON
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Raw(_) => None,
        }
    }

    /// Raw text, if the body was not JSON
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            ResponseBody::Json(_) => None,
            ResponseBody::Raw(text) => Some(text),
        }
    }

    /// Triple-backtick fenced rendering of a raw body, preserving the
    /// payload for inspection while clearly signaling "non-JSON".
    pub fn fenced(&self) -> Option<String> {
        self.as_raw().map(|text| format!("```\n{}\n```", text))
    }
}

/// Normalized response envelope returned by every request-layer call
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
    pub content_type: Option<String>,
    pub headers: HashMap<String, String>,
}

impl ApiResponse {
    /// True when the status is in the 200-299 range
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Structured body access; fails for raw-text bodies.
    pub fn json(&self) -> Result<&Value> {
        self.body.as_json().ok_or_else(|| ProbeError::Parse {
            details: format!(
                "expected JSON body, got content type {:?}",
                self.content_type
            ),
        })
    }
}

/// Per-request options
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers; they win over the layer's defaults on key conflict
    pub extra_headers: HashMap<String, String>,
    /// Return non-success responses instead of failing (negative-path tests)
    pub ignore_errors: bool,
    /// JSON Schema to validate the parsed body against
    pub schema: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(name.into(), value.into());
        self
    }

    pub fn with_ignore_errors(mut self, ignore: bool) -> Self {
        self.ignore_errors = ignore;
        self
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// Generic typed HTTP client bound to a base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl ApiClient {
    /// Build a client from the environment configuration.
    ///
    /// Carries the configured default timeout and bearer token; the token
    /// is attached as `Authorization: Bearer <token>` on every request
    /// unless the caller supplies its own Authorization header.
    pub fn from_config(config: &EnvConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.default_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            bearer_token: Some(config.api_bearer_token.clone()),
        })
    }

    /// Build an unauthenticated client against an explicit base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            bearer_token: None,
        }
    }

    /// Attach a bearer token
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, endpoint: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.dispatch(HttpMethod::Get, endpoint, None, options).await
    }

    pub async fn post(
        &self,
        endpoint: &str,
        body: &Value,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        self.dispatch(HttpMethod::Post, endpoint, Some(body), options)
            .await
    }

    pub async fn put(
        &self,
        endpoint: &str,
        body: &Value,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        self.dispatch(HttpMethod::Put, endpoint, Some(body), options)
            .await
    }

    pub async fn patch(
        &self,
        endpoint: &str,
        body: &Value,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        self.dispatch(HttpMethod::Patch, endpoint, Some(body), options)
            .await
    }

    pub async fn delete(&self, endpoint: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.dispatch(HttpMethod::Delete, endpoint, None, options)
            .await
    }

    /// Multipart POST for file-upload endpoints.
    ///
    /// No JSON content-type default here; the multipart encoder sets its
    /// own boundary header.
    pub async fn post_multipart(
        &self,
        endpoint: &str,
        form: reqwest::multipart::Form,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, endpoint);
        let request = self
            .http
            .post(&url)
            .multipart(form)
            .headers(self.merged_headers(&options, false)?);

        self.interpret(HttpMethod::Post, endpoint, request, options)
            .await
    }

    /// Single dispatch routine every verb funnels into
    async fn dispatch(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: Option<&Value>,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut request = self.http.request(method.to_reqwest(), &url);

        if let Some(body) = body {
            request = request.json(body);
        }
        // Applied after the body so caller headers override the defaults
        request = request.headers(self.merged_headers(&options, true)?);

        self.interpret(method, endpoint, request, options).await
    }

    /// Default headers merged with caller extras, caller winning on conflict
    fn merged_headers(&self, options: &RequestOptions, json_default: bool) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        if json_default {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if let Some(token) = &self.bearer_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                ProbeError::Config {
                    reason: "API_BEARER_TOKEN contains invalid header characters".to_string(),
                }
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        for (name, value) in &options.extra_headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| ProbeError::Config {
                reason: format!("Invalid header name '{}'", name),
            })?;
            let value = HeaderValue::from_str(value).map_err(|_| ProbeError::Config {
                reason: format!("Invalid value for header '{}'", name),
            })?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    /// Send the request and interpret the response: content-type sniffing,
    /// optional schema validation, and the throw-vs-return status routing.
    async fn interpret(
        &self,
        method: HttpMethod,
        endpoint: &str,
        request: reqwest::RequestBuilder,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        tracing::debug!(%method, endpoint, "Dispatching API request");

        let response = request.send().await?;

        let status = response.status();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect();
        let content_type = headers.get("content-type").cloned();

        let text = response.text().await.map_err(|e| ProbeError::Parse {
            details: e.to_string(),
        })?;

        let body = if content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
        {
            let value: Value = serde_json::from_str(&text).map_err(|e| ProbeError::Parse {
                details: e.to_string(),
            })?;

            if let Some(schema) = &options.schema {
                validate_schema(&value, schema)?;
            }

            ResponseBody::Json(value)
        } else {
            ResponseBody::Raw(text)
        };

        // Status routing happens once, here: negative-path tests opt into
        // receiving the envelope via ignore_errors.
        if !status.is_success() && !options.ignore_errors {
            tracing::error!(%method, endpoint, %status, "API request failed");
            return Err(ProbeError::UnexpectedStatus {
                method: method.to_string(),
                endpoint: endpoint.to_string(),
                status: status.to_string(),
            });
        }

        tracing::debug!(%method, endpoint, %status, "API response received");

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
            content_type,
            headers,
        })
    }
}
