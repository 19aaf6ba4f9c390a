//! Tests for the seed module

use super::*;
use crate::error::Error;
use crate::http::{ApiClient, ApiClientConfig, RateLimiterConfig};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MANIFEST: &str = r#"
account:
  email: seed@example.com
  password: secret123
requests:
  - name: Kim's BBQ
    address: 12 Mapo-daero, Seoul
    category: korean
    phone: 02-123-4567
    images: [photos/a.jpg, photos/b.png]
  - name: Sushi House
    address: 3 Gangnam-daero, Seoul
    category: japanese
"#;

fn client_for(server: &MockServer) -> ApiClient {
    let config = ApiClientConfig::builder()
        .base_url(format!("{}/api", server.uri()))
        .no_rate_limit()
        .build();
    ApiClient::new(config).unwrap()
}

fn fast_options() -> SeedOptions {
    SeedOptions {
        pacing: RateLimiterConfig::new(100, 100),
        ..SeedOptions::default()
    }
}

fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": data}))
}

fn created(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "address": "somewhere",
        "category": "korean",
        "status": "pending",
        "createdAt": "2024-05-01T12:00:00Z"
    })
}

/// Manifest on disk next to its photos
fn manifest_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("photos")).unwrap();
    std::fs::write(dir.path().join("photos/a.jpg"), b"jpeg-a").unwrap();
    std::fs::write(dir.path().join("photos/b.png"), b"png-b").unwrap();
    std::fs::write(dir.path().join("seed.yaml"), MANIFEST).unwrap();
    dir
}

// ============================================================================
// Manifest
// ============================================================================

#[test]
fn test_load_manifest_resolves_images() {
    let dir = manifest_dir();
    let manifest = load_manifest(dir.path().join("seed.yaml")).unwrap();

    assert_eq!(manifest.account.email, "seed@example.com");
    assert_eq!(manifest.requests.len(), 2);
    assert_eq!(
        manifest.requests[0].images,
        vec![
            dir.path().join("photos/a.jpg"),
            dir.path().join("photos/b.png")
        ]
    );
    assert!(manifest.requests[1].images.is_empty());
}

#[test]
fn test_absolute_image_paths_untouched() {
    let yaml = r#"
account: {email: seed@example.com, password: pw}
requests:
  - {name: A, address: B, category: C, images: [/srv/photos/a.jpg]}
"#;
    let manifest = load_manifest_from_str(yaml, Path::new("/elsewhere")).unwrap();
    assert_eq!(
        manifest.requests[0].images,
        vec![PathBuf::from("/srv/photos/a.jpg")]
    );
}

#[test]
fn test_manifest_requires_requests() {
    let yaml = "account: {email: seed@example.com, password: pw}\n";
    let err = load_manifest_from_str(yaml, Path::new(".")).unwrap_err();
    assert!(err.to_string().contains("at least one request"));
}

#[test]
fn test_manifest_rejects_bad_account() {
    let yaml = r#"
account: {email: nope, password: pw}
requests:
  - {name: A, address: B, category: C}
"#;
    let err = load_manifest_from_str(yaml, Path::new(".")).unwrap_err();
    assert!(err.to_string().contains("Invalid account"));
}

#[test]
fn test_manifest_rejects_invalid_record() {
    let yaml = r#"
account: {email: seed@example.com, password: pw}
requests:
  - {name: A, address: B, category: C}
  - {name: Broken, address: "", category: C, phone: "call me"}
"#;
    let err = load_manifest_from_str(yaml, Path::new(".")).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Request #2 'Broken'"));
    assert!(message.contains("address: Address is required"));
    assert!(message.contains("phone"));
}

#[test]
fn test_manifest_rejects_unknown_fields() {
    let yaml = r#"
account: {email: seed@example.com, password: pw}
requests:
  - {name: A, address: B, category: C, rating: 5}
"#;
    let err = load_manifest_from_str(yaml, Path::new(".")).unwrap_err();
    assert!(matches!(err, Error::Seed { .. }));
}

#[test]
fn test_missing_manifest_file() {
    let err = load_manifest("/no/such/seed.yaml").unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }));
}

#[test]
fn test_account_debug_hides_password() {
    let manifest = load_manifest_from_str(MANIFEST, Path::new(".")).unwrap();
    let printed = format!("{:?}", manifest.account);
    assert!(!printed.contains("secret123"));
}

// ============================================================================
// Dry Run
// ============================================================================

#[tokio::test]
async fn test_dry_run_checks_files_without_network() {
    let dir = manifest_dir();
    std::fs::remove_file(dir.path().join("photos/b.png")).unwrap();
    let manifest = load_manifest(dir.path().join("seed.yaml")).unwrap();

    // Nothing listens here; any request would fail
    let client = ApiClient::new(
        ApiClientConfig::builder()
            .base_url("http://127.0.0.1:9/api")
            .no_rate_limit()
            .build(),
    )
    .unwrap();
    let options = SeedOptions {
        dry_run: true,
        ..fast_options()
    };
    let report = Seeder::new(&client, options).run(&manifest).await.unwrap();

    assert!(report.dry_run);
    assert_eq!(
        report.created,
        vec![SeededRequest {
            name: "Sushi House".to_string(),
            id: None
        }]
    );
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].name, "Kim's BBQ");
    assert!(report.failed[0].message.contains("b.png"));
}

// ============================================================================
// Seeding Against a Backend
// ============================================================================

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "SESSION=seed; Path=/")
                .set_body_json(json!({
                    "success": true,
                    "data": {
                        "id": 1,
                        "email": "seed@example.com",
                        "nickname": "seeder",
                        "createdAt": "2024-05-01T12:00:00Z"
                    }
                })),
        )
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;
}

async fn mount_presign(server: &MockServer, file_name: &str, key: &str) {
    Mock::given(method("POST"))
        .and(path("/api/restaurant-requests/presigned-url"))
        .and(body_partial_json(json!({"fileName": file_name})))
        .respond_with(ok(json!({
            "uploadUrl": format!("{}/storage/{}", server.uri(), key),
            "fileKey": key
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_seed_uploads_in_order_and_skips_failures() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server).await;
    mount_presign(&mock_server, "a.jpg", "req-a").await;
    mount_presign(&mock_server, "b.png", "req-b").await;

    Mock::given(method("PUT"))
        .and(path("/storage/req-a"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/storage/req-b"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/restaurant-requests"))
        .and(body_json(json!({
            "name": "Kim's BBQ",
            "address": "12 Mapo-daero, Seoul",
            "category": "korean",
            "phone": "02-123-4567",
            "imageKeys": ["req-a", "req-b"]
        })))
        .respond_with(ok(created(11, "Kim's BBQ")))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/restaurant-requests"))
        .and(body_partial_json(json!({"name": "Sushi House"})))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "success": false,
            "error": {"code": "DUPLICATE", "message": "Already requested"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = manifest_dir();
    let manifest = load_manifest(dir.path().join("seed.yaml")).unwrap();
    let client = client_for(&mock_server);

    let report = Seeder::new(&client, fast_options())
        .run(&manifest)
        .await
        .unwrap();

    assert!(!report.dry_run);
    assert_eq!(
        report.created,
        vec![SeededRequest {
            name: "Kim's BBQ".to_string(),
            id: Some(11)
        }]
    );
    assert_eq!(
        report.failed,
        vec![SeedFailure {
            name: "Sushi House".to_string(),
            message: "Something went wrong. Please try again later.".to_string()
        }]
    );
    assert!(!report.is_success());
}

#[tokio::test]
async fn test_failed_upload_skips_record() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server).await;
    mount_presign(&mock_server, "a.jpg", "req-a").await;
    mount_presign(&mock_server, "b.png", "req-b").await;

    Mock::given(method("PUT"))
        .and(path("/storage/req-a"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/storage/req-b"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/restaurant-requests"))
        .and(body_partial_json(json!({"name": "Sushi House"})))
        .respond_with(ok(created(12, "Sushi House")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = manifest_dir();
    let manifest = load_manifest(dir.path().join("seed.yaml")).unwrap();
    let client = client_for(&mock_server);

    let report = Seeder::new(&client, fast_options())
        .run(&manifest)
        .await
        .unwrap();

    assert_eq!(report.created.len(), 1);
    assert_eq!(report.created[0].id, Some(12));
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].name, "Kim's BBQ");
}

#[tokio::test]
async fn test_login_failure_aborts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/restaurant-requests"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let manifest = load_manifest_from_str(MANIFEST, Path::new(".")).unwrap();
    let client = client_for(&mock_server);
    let err = Seeder::new(&client, fast_options())
        .run(&manifest)
        .await
        .unwrap_err();

    assert!(err.requires_login());
}
