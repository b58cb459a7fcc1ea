//! Integration tests for the HTTP API
//!
//! These tests drive the full router (middleware included) against a mock
//! UniProt and verify:
//! - Routing inside and outside the API prefix
//! - Request validation before any upstream call
//! - Status codes and error envelopes for upstream failures

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use genefunc_server::{
    api::{create_router, UNSUPPORTED_PATH_MESSAGE},
    config::Config,
    features::FeatureState,
    idmapping::{IdMappingClient, PollPolicy, UniProtConfig},
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Helper to create a router talking to the mock UniProt
fn create_test_router(server: &MockServer) -> Router {
    let poll = PollPolicy::fixed(Duration::from_millis(10), 20, Duration::from_secs(2));
    let uniprot = UniProtConfig::builder()
        .base_url(format!("{}/idmapping", server.uri()))
        .timeout_secs(5)
        .poll(poll.clone())
        .build();

    let client = IdMappingClient::new(uniprot).unwrap();
    create_router(FeatureState::new(Arc::new(client), poll), &Config::default())
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

async fn mount_successful_job(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/idmapping/run"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jobId": "j-1"})))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/idmapping/status/j-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jobStatus": "FINISHED"})))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/idmapping/uniprotkb/results/stream/j-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {
                    "from": "TP53",
                    "to": {
                        "uniProtkbId": "P53_HUMAN",
                        "primaryAccession": "P04637",
                        "comments": [
                            {"commentType": "FUNCTION", "texts": [{"value": "Tumor suppressor"}]}
                        ]
                    }
                },
                {
                    "from": "BRCA1",
                    "to": {
                        "uniProtkbId": "BRCA1_HUMAN",
                        "primaryAccession": "P38398",
                        "comments": []
                    }
                }
            ]
        })))
        .mount(server)
        .await;
}

// ============================================================================
// Routing
// ============================================================================

#[tokio::test]
async fn test_paths_outside_prefix_return_plain_404() {
    let server = MockServer::start().await;
    let app = create_test_router(&server);

    let cases = [
        (Method::GET, "/"),
        (Method::POST, "/gene-functions"),
        (Method::DELETE, "/api"),
        (Method::PUT, "/api/v10"),
        (Method::GET, "/health"),
    ];

    for (method, uri) in cases {
        let response = app
            .clone()
            .oneshot(json_request(method.clone(), uri, json!({"geneList": ["TP53"]})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(body_bytes(response).await, UNSUPPORTED_PATH_MESSAGE.as_bytes());
    }

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_api_path_returns_json_404() {
    let server = MockServer::start().await;
    let app = create_test_router(&server);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/proteins")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    let app = create_test_router(&server);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");
}

// ============================================================================
// Gene functions
// ============================================================================

#[tokio::test]
async fn test_summarize_end_to_end() {
    let server = MockServer::start().await;
    mount_successful_job(&server).await;
    let app = create_test_router(&server);

    for uri in ["/api/v1", "/api/v1/gene-functions"] {
        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                uri,
                json!({"geneList": ["TP53", "BRCA1"], "taxId": "9606"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert_eq!(
            body_json(response).await,
            json!([
                {
                    "gene": "TP53",
                    "uniprotId": "P53_HUMAN",
                    "uniprotAccession": "P04637",
                    "commentText": "Tumor suppressor\n\n\n"
                },
                {
                    "gene": "BRCA1",
                    "uniprotId": "BRCA1_HUMAN",
                    "uniprotAccession": "P38398",
                    "commentText": "\n\n"
                }
            ])
        );
    }
}

#[tokio::test]
async fn test_body_read_without_json_content_type() {
    let server = MockServer::start().await;
    mount_successful_job(&server).await;
    let app = create_test_router(&server);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1")
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from(r#"{"geneList":["TP53"],"taxId":9606}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_invalid_bodies_rejected_without_upstream_calls() {
    let server = MockServer::start().await;
    let app = create_test_router(&server);

    let bodies = [
        json!({"geneList": [], "taxId": 9606}),
        json!({"geneList": ["TP53"]}),
        json!({"geneList": ["TP53"], "taxId": "human"}),
        json!({"geneList": ["TP53", ""], "taxId": 9606}),
        json!({"geneList": ["TP53,BRCA1"], "taxId": 9606}),
        json!({"geneList": "TP53", "taxId": 9606}),
    ];

    for body in bodies {
        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/api/v1/gene-functions", body.clone()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(body_json(response).await["error"]["code"], "INVALID_REQUEST");
    }

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_job_returns_bad_gateway() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/idmapping/run"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jobId": "j-err"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/idmapping/status/j-err"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobStatus": "ERROR",
            "errors": [{"message": "Invalid taxon"}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/idmapping/uniprotkb/results/stream/j-err"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(0)
        .mount(&server)
        .await;

    let app = create_test_router(&server);
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1",
            json!({"geneList": ["TP53"], "taxId": 9606}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
    assert_eq!(body["error"]["details"]["messages"], json!(["Invalid taxon"]));
}

#[tokio::test]
async fn test_submission_failure_returns_bad_gateway() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/idmapping/run"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
        .mount(&server)
        .await;

    let app = create_test_router(&server);
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1",
            json!({"geneList": ["TP53"], "taxId": 9606}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_malformed_result_item_returns_internal_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/idmapping/run"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jobId": "j-1"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/idmapping/status/j-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jobStatus": "FINISHED"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/idmapping/uniprotkb/results/stream/j-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"results": [{"from": "TP53"}]})),
        )
        .mount(&server)
        .await;

    let app = create_test_router(&server);
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1",
            json!({"geneList": ["TP53"], "taxId": 9606}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"]["code"], "INTERNAL_ERROR");
}
