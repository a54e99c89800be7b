use std::time::Duration;

use jobfinder_engine::{
    AnalysisClient, AnalysisSettings, DocumentUpload, FailureKind, FailureOrigin,
    ReqwestAnalysisClient,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn upload() -> DocumentUpload {
    DocumentUpload {
        file_name: "resume.pdf".to_string(),
        bytes: b"%PDF-1.7 fake resume".to_vec(),
    }
}

fn client_for(server: &MockServer) -> ReqwestAnalysisClient {
    let settings = AnalysisSettings {
        endpoint: format!("{}/analyze", server.uri()),
        ..AnalysisSettings::default()
    };
    ReqwestAnalysisClient::new(settings).expect("client")
}

#[tokio::test]
async fn posts_multipart_file_and_decodes_report() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"resume.pdf\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "matched_jobs": [
                {"id": 1, "title": "A", "company": "Acme", "location": "Remote",
                 "description": "Rust services", "similarity": 0.92},
                {"id": 2, "title": "B", "company": "Initech", "location": "Berlin",
                 "description": "Platform work", "similarity": 0.5}
            ],
            "cover_letter": "Dear hiring manager"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let report = client_for(&server)
        .analyze(&upload())
        .await
        .expect("analysis ok");

    let titles: Vec<_> = report.matched_jobs.iter().map(|j| j.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B"]);
    assert_eq!(report.matched_jobs[0].similarity, 0.92);
    assert_eq!(report.cover_letter, "Dear hiring manager");
}

#[tokio::test]
async fn service_error_status_is_service_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Only PDF files are supported."})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).analyze(&upload()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(400));
    assert_eq!(err.kind.origin(), FailureOrigin::Service);
    assert!(err.message.contains("Only PDF files"));
}

#[tokio::test]
async fn missing_fields_are_service_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"matched_jobs": []})))
        .mount(&server)
        .await;

    let err = client_for(&server).analyze(&upload()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedPayload);
    assert_eq!(err.kind.origin(), FailureOrigin::Service);
}

#[tokio::test]
async fn non_json_body_is_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).analyze(&upload()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Unparseable);
    assert_eq!(err.kind.origin(), FailureOrigin::Transport);
}

#[tokio::test]
async fn unreachable_service_is_network_failure() {
    let settings = AnalysisSettings {
        endpoint: "http://127.0.0.1:9/analyze".to_string(),
        connect_timeout: Duration::from_secs(2),
        ..AnalysisSettings::default()
    };
    let client = ReqwestAnalysisClient::new(settings).expect("client");

    let err = client.analyze(&upload()).await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::Network | FailureKind::Timeout));
    assert_eq!(err.kind.origin(), FailureOrigin::Transport);
}

#[tokio::test]
async fn invalid_endpoint_is_reported() {
    let settings = AnalysisSettings {
        endpoint: "not a url".to_string(),
        ..AnalysisSettings::default()
    };
    let client = ReqwestAnalysisClient::new(settings).expect("client");

    let err = client.analyze(&upload()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidEndpoint);
}

#[tokio::test]
async fn configured_timeout_applies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"matched_jobs": [], "cover_letter": ""})),
        )
        .mount(&server)
        .await;

    let settings = AnalysisSettings {
        endpoint: format!("{}/analyze", server.uri()),
        request_timeout: Some(Duration::from_millis(50)),
        ..AnalysisSettings::default()
    };
    let client = ReqwestAnalysisClient::new(settings).expect("client");

    let err = client.analyze(&upload()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .insert_header("Content-Length", "11")
                .set_body_string("01234567890"),
        )
        .mount(&server)
        .await;

    let settings = AnalysisSettings {
        endpoint: format!("{}/analyze", server.uri()),
        max_response_bytes: 10,
        ..AnalysisSettings::default()
    };
    let client = ReqwestAnalysisClient::new(settings).expect("client");

    let err = client.analyze(&upload()).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}
