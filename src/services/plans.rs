//! Plan management service façade
//!
//! CRUD over `/v1/plans` plus the multipart file-upload endpoint. Plans
//! created by tests are expected to be deleted by the same tests
//! (best-effort cleanup), so every operation here is a single stateless
//! call.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;

use crate::assertions::expect_status;
use crate::client::{ApiClient, ApiResponse, RequestOptions};
use crate::error::{ProbeError, Result};
use crate::schemas;

const PLANS_PATH: &str = "/v1/plans";

/// One uploaded plan document, as returned by the file listing
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanFile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
    pub plan_id: String,
    #[serde(rename = "type")]
    pub file_type: String,
}

/// Plan management operations over the request layer
#[derive(Debug, Clone)]
pub struct PlansApi {
    client: ApiClient,
}

impl PlansApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Create a plan and return its id (expects 201 + `{id}`).
    pub async fn create_plan(&self, payload: &Value) -> Result<String> {
        let options = RequestOptions::new().with_schema(schemas::id_only());
        let response = self.client.post(PLANS_PATH, payload, options).await?;
        expect_status(&response, 201)?;
        extract_id(&response)
    }

    /// Delete a plan (the API answers 200 or 204).
    pub async fn delete_plan(&self, plan_id: &str) -> Result<ApiResponse> {
        let endpoint = format!("{}/{}", PLANS_PATH, plan_id);
        self.client.delete(&endpoint, RequestOptions::new()).await
    }

    /// Upload a document via multipart: a `file` part plus a `type`
    /// discriminator field (e.g. `SchedulesA`). Returns the file id.
    pub async fn upload_file(
        &self,
        plan_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
        mime_type: &str,
        file_type: &str,
    ) -> Result<String> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_type)?;
        let form = Form::new().part("file", part).text("type", file_type.to_string());

        let endpoint = format!("{}/{}/files", PLANS_PATH, plan_id);
        let options = RequestOptions::new().with_schema(schemas::id_only());
        let response = self.client.post_multipart(&endpoint, form, options).await?;
        expect_status(&response, 201)?;
        extract_id(&response)
    }

    /// Upload a document read from disk; the multipart file name is the
    /// path's final component.
    pub async fn upload_file_from_path(
        &self,
        plan_id: &str,
        path: &Path,
        mime_type: &str,
        file_type: &str,
    ) -> Result<String> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.bin");
        self.upload_file(plan_id, file_name, bytes, mime_type, file_type)
            .await
    }

    /// List the documents attached to a plan.
    pub async fn list_files(&self, plan_id: &str) -> Result<Vec<PlanFile>> {
        let endpoint = format!("{}/{}/files", PLANS_PATH, plan_id);
        let options = RequestOptions::new().with_schema(schemas::plan_file_list());
        let response = self.client.get(&endpoint, options).await?;

        serde_json::from_value(response.json()?.clone()).map_err(|e| ProbeError::Parse {
            details: format!("file listing did not match PlanFile shape: {}", e),
        })
    }
}

fn extract_id(response: &ApiResponse) -> Result<String> {
    match &response.json()?["id"] {
        Value::String(id) => Ok(id.clone()),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(ProbeError::Parse {
            details: format!("expected string or numeric id, got {}", other),
        }),
    }
}
