//! HTTP catalog client against a mock ArchivesSpace server.

use serde_json::json;
use std::sync::Arc;
use webarchives_report::catalog::{AspaceClient, Catalog};
use webarchives_report::config::{CatalogConfig, ReportConfig};
use webarchives_report::error::Error;
use webarchives_report::report::run_report;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn catalog_config(server: &MockServer) -> CatalogConfig {
    let toml = format!(
        "[test]\nurl = \"{}\"\nusername = \"admin\"\npassword = \"pw\"\ntimeout_secs = 5\n",
        server.uri()
    );
    CatalogConfig::from_toml_str(&toml, "test").unwrap()
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/users/admin/login"))
        .and(body_string_contains("password=pw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"session": "tok-123"})))
        .mount(server)
        .await;
}

async fn connected(server: &MockServer) -> AspaceClient {
    mount_login(server).await;
    AspaceClient::connect(&catalog_config(server)).await.unwrap()
}

#[tokio::test]
async fn lists_ids_with_session_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repositories/2/digital_objects"))
        .and(query_param("all_ids", "true"))
        .and(header("X-ArchivesSpace-Session", "tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([4, 8, 15])))
        .mount(&server)
        .await;

    let client = connected(&server).await;
    let ids = client.list_digital_object_ids(2).await.unwrap();
    assert_eq!(ids, vec![4, 8, 15]);
}

#[tokio::test]
async fn fetches_digital_object_with_file_versions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repositories/6/digital_objects/42"))
        .and(header("X-ArchivesSpace-Session", "tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uri": "/repositories/6/digital_objects/42",
            "title": "Some site",
            "file_versions": [
                {"file_uri": "https://wayback.archive-it.org/1/x", "use_statement": "master"},
                {"file_uri": "https://webarchives.cdlib.org/y"}
            ]
        })))
        .mount(&server)
        .await;

    let client = connected(&server).await;
    let object = client.get_digital_object(6, 42).await.unwrap();
    assert_eq!(object.uri, "/repositories/6/digital_objects/42");
    assert_eq!(object.file_versions.len(), 2);
    assert_eq!(object.file_versions[0].use_statement, "master");
    assert_eq!(object.file_versions[1].use_statement, "");
}

#[tokio::test]
async fn object_without_file_versions_field_has_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repositories/2/digital_objects/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"uri": "/repositories/2/digital_objects/1"})),
        )
        .mount(&server)
        .await;

    let client = connected(&server).await;
    let object = client.get_digital_object(2, 1).await.unwrap();
    assert!(object.file_versions.is_empty());
}

#[tokio::test]
async fn rejected_login_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/admin/login"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"error": "Login failed"})),
        )
        .mount(&server)
        .await;

    let result = AspaceClient::connect(&catalog_config(&server)).await;
    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status.as_u16(), 403);
            assert!(message.contains("Login failed"), "{message}");
        }
        Err(other) => panic!("expected Api error, got {other:?}"),
        Ok(_) => panic!("expected login to fail"),
    }
}

#[tokio::test]
async fn missing_object_is_an_api_error() {
    let server = MockServer::start().await;
    let client = connected(&server).await;

    let err = client.get_digital_object(3, 999).await.unwrap_err();
    assert!(
        matches!(err, Error::Api { status, .. } if status.as_u16() == 404),
        "{err:?}"
    );
}

#[tokio::test]
async fn unreachable_server_fails_to_connect() {
    let server = MockServer::start().await;
    let config = catalog_config(&server);
    drop(server);

    assert!(AspaceClient::connect(&config).await.is_err());
}

#[tokio::test]
async fn report_skips_objects_the_server_fails_on() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repositories/2/digital_objects"))
        .and(query_param("all_ids", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
        .mount(&server)
        .await;
    for id in [1, 3] {
        Mock::given(method("GET"))
            .and(path(format!("/repositories/2/digital_objects/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "uri": format!("/repositories/2/digital_objects/{id}"),
                "file_versions": [
                    {"file_uri": "https://archive-it.org/collections/1", "use_statement": "master"}
                ]
            })))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/repositories/2/digital_objects/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = connected(&server).await;
    let dir = tempfile::tempdir().unwrap();
    let config = ReportConfig {
        repositories: vec![2],
        workers: 2,
        output_path: dir.path().join("output.tsv"),
    };

    let summary = run_report(Arc::new(client), &config).await.unwrap();
    assert_eq!(summary.work_items, 3);
    assert_eq!(summary.chunks, 2);
    assert_eq!(summary.records, 2);

    let output = std::fs::read_to_string(&config.output_path).unwrap();
    let mut lines: Vec<&str> = output.lines().collect();
    lines.sort();
    assert_eq!(
        lines,
        vec![
            "/repositories/2/digital_objects/1\tarchive-it.org\tmaster",
            "/repositories/2/digital_objects/3\tarchive-it.org\tmaster",
        ]
    );
}
