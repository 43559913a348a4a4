//! Plan management façade integration tests

use apiprobe::{ApiClient, PlansApi, ProbeError};
use apiprobe::testdata::plan_payload;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Minimal PDF bytes, enough to exercise the upload path
const PDF_STUB: &[u8] = b"%PDF-1.4\n%stub\n%%EOF\n";

fn plans_against(server: &MockServer) -> PlansApi {
    PlansApi::new(ApiClient::new(server.uri()).with_bearer_token("tok"))
}

#[tokio::test]
async fn create_plan_returns_the_new_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/plans"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "plan-77"})))
        .expect(1)
        .mount(&server)
        .await;

    let plans = plans_against(&server);
    let id = plans.create_plan(&plan_payload()).await.unwrap();
    assert_eq!(id, "plan-77");
}

#[tokio::test]
async fn create_plan_accepts_numeric_ids() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/plans"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 512})))
        .mount(&server)
        .await;

    let plans = plans_against(&server);
    assert_eq!(plans.create_plan(&plan_payload()).await.unwrap(), "512");
}

#[tokio::test]
async fn create_plan_rejects_id_free_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/plans"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"created": true})))
        .mount(&server)
        .await;

    let plans = plans_against(&server);
    let err = plans.create_plan(&plan_payload()).await.unwrap_err();
    assert!(matches!(err, ProbeError::SchemaFailed { .. }), "{}", err);
}

#[tokio::test]
async fn upload_file_posts_multipart_with_type_discriminator() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/plans/plan-77/files"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "file-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let plans = plans_against(&server);
    let file_id = plans
        .upload_file(
            "plan-77",
            "schedule_A.pdf",
            PDF_STUB.to_vec(),
            "application/pdf",
            "SchedulesA",
        )
        .await
        .unwrap();

    assert_eq!(file_id, "file-1");

    // The multipart body carries both the file part and the discriminator
    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file\""), "{}", body);
    assert!(body.contains("schedule_A.pdf"), "{}", body);
    assert!(body.contains("name=\"type\""), "{}", body);
    assert!(body.contains("SchedulesA"), "{}", body);
}

#[tokio::test]
async fn upload_file_from_disk_reads_name_and_bytes_from_the_path() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/plans/plan-77/files"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "file-2"})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let pdf_path = dir.path().join("schedule_A.pdf");
    std::fs::write(&pdf_path, PDF_STUB).unwrap();

    let plans = plans_against(&server);
    let file_id = plans
        .upload_file_from_path("plan-77", &pdf_path, "application/pdf", "SchedulesA")
        .await
        .unwrap();

    assert_eq!(file_id, "file-2");

    // Filename and content both come from the file on disk
    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("schedule_A.pdf"), "{}", body);
    assert!(body.contains("%PDF-1.4"), "{}", body);
}

#[tokio::test]
async fn upload_from_missing_path_is_an_io_error() {
    let server = MockServer::start().await;
    let plans = plans_against(&server);

    let missing = std::path::Path::new("/nonexistent/schedule_A.pdf");
    let err = plans
        .upload_file_from_path("plan-77", missing, "application/pdf", "SchedulesA")
        .await
        .unwrap_err();

    // The read fails before any request is built
    assert!(matches!(err, ProbeError::Io(_)), "{}", err);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unauthorized_upload_surfaces_the_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/plans/plan-77/files"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "statusCode": 401,
            "error": "Unauthorized",
            "message": "Authentication error: Token missing"
        })))
        .mount(&server)
        .await;

    let plans = PlansApi::new(ApiClient::new(server.uri()));
    let err = plans
        .upload_file("plan-77", "schedule_A.pdf", PDF_STUB.to_vec(), "application/pdf", "SchedulesA")
        .await
        .unwrap_err();

    // Error schema does not match the id-only expectation, so the failure
    // is either the schema or the status; both carry enough diagnosis.
    let msg = err.to_string();
    assert!(
        matches!(err, ProbeError::SchemaFailed { .. } | ProbeError::UnexpectedStatus { .. }),
        "{}",
        msg
    );
}

#[tokio::test]
async fn list_files_deserializes_the_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/plans/plan-77/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "file-1",
            "name": "schedule_A.pdf",
            "size": 1204,
            "url": "https://cdn.test/file-1",
            "planId": "plan-77",
            "type": "SchedulesA"
        }])))
        .mount(&server)
        .await;

    let plans = plans_against(&server);
    let files = plans.list_files("plan-77").await.unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].id, "file-1");
    assert_eq!(files[0].file_type, "SchedulesA");
    assert_eq!(files[0].size, Some(1204));
}

#[tokio::test]
async fn delete_plan_accepts_200_and_204() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/plans/plan-77"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let plans = plans_against(&server);
    let response = plans.delete_plan("plan-77").await.unwrap();
    assert!(response.is_success());
}

#[tokio::test]
async fn full_plan_file_flow() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/plans"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "plan-9"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/plans/plan-9/files"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "file-9"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/plans/plan-9/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "file-9",
            "name": "schedule_A.pdf",
            "planId": "plan-9",
            "type": "SchedulesA"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/plans/plan-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": true})))
        .mount(&server)
        .await;

    let plans = plans_against(&server);

    let plan_id = plans.create_plan(&plan_payload()).await.unwrap();
    let file_id = plans
        .upload_file(&plan_id, "schedule_A.pdf", PDF_STUB.to_vec(), "application/pdf", "SchedulesA")
        .await
        .unwrap();

    let files = plans.list_files(&plan_id).await.unwrap();
    assert_eq!(files[0].id, file_id);

    // Best-effort cleanup, same as a real run
    plans.delete_plan(&plan_id).await.unwrap();
}
