//! Integration tests: boot the server on a free port and drive the HTTP
//! surface with a cookie-aware client.

use serde_json::{json, Value};

use loftbook_server::{build_router, ServerConfig};

const PASSWORD: &str = "hoop-dreams";

/// Spawn a server on an ephemeral port with a fresh temp database.
/// Returns the base URL; the temp dir must stay alive for the test.
async fn spawn_server(admin_password: Option<&str>) -> (String, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = ServerConfig {
        port: 0,
        db_path: dir.path().join("skills.db"),
        admin_password: admin_password.map(str::to_string),
    };

    let (app, _state) = build_router(&config).expect("build router");
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local_addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{}", addr), dir)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("client")
}

async fn login(client: &reqwest::Client, base: &str) {
    let resp = client
        .post(format!("{base}/api/auth"))
        .json(&json!({ "password": PASSWORD }))
        .send()
        .await
        .expect("auth request");
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn an_empty_store_reads_back_an_empty_array() {
    let (base, _dir) = spawn_server(Some(PASSWORD)).await;

    let resp = client()
        .get(format!("{base}/api/skills"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.json::<Value>().await.unwrap(), json!([]));
}

#[tokio::test]
async fn authenticate_sets_the_admin_cookie() {
    let (base, _dir) = spawn_server(Some(PASSWORD)).await;
    let client = client();

    let resp = client
        .post(format!("{base}/api/auth"))
        .json(&json!({ "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    login(&client, &base).await;

    let status: Value = client
        .get(format!("{base}/api/admin"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status, json!({ "isAdmin": true }));
}

#[tokio::test]
async fn authenticate_without_a_configured_secret_is_a_server_error() {
    let (base, _dir) = spawn_server(None).await;

    let resp = client()
        .post(format!("{base}/api/auth"))
        .json(&json!({ "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
}

#[tokio::test]
async fn a_malformed_auth_body_reads_as_a_bad_password() {
    let (base, _dir) = spawn_server(Some(PASSWORD)).await;

    let resp = client()
        .post(format!("{base}/api/auth"))
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn writes_require_an_admin_session_regardless_of_body() {
    let (base, _dir) = spawn_server(Some(PASSWORD)).await;
    let client = client();

    let resp = client
        .post(format!("{base}/api/skills"))
        .json(&json!([{ "apparatus": "Hoop" }]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    // Even a non-array body is 401 first, not 400.
    let resp = client
        .post(format!("{base}/api/skills"))
        .json(&json!({ "apparatus": "Hoop" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn writes_reject_non_array_bodies() {
    let (base, _dir) = spawn_server(Some(PASSWORD)).await;
    let client = client();
    login(&client, &base).await;

    let resp = client
        .post(format!("{base}/api/skills"))
        .json(&json!({ "apparatus": "Hoop" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn written_rows_read_back_verbatim() {
    let (base, _dir) = spawn_server(Some(PASSWORD)).await;
    let client = client();
    login(&client, &base).await;

    let rows = json!([{ "apparatus": "Hoop", "skill": "Climb", "confidence": 3 }]);

    let resp = client
        .post(format!("{base}/api/skills"))
        .json(&rows)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.json::<Value>().await.unwrap(), json!({ "ok": true }));

    let read: Value = client
        .get(format!("{base}/api/skills"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(read, rows);
}

#[tokio::test]
async fn logout_drops_the_admin_session() {
    let (base, _dir) = spawn_server(Some(PASSWORD)).await;
    let client = client();
    login(&client, &base).await;

    let resp = client
        .post(format!("{base}/api/logout"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let status: Value = client
        .get(format!("{base}/api/admin"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status, json!({ "isAdmin": false }));

    let resp = client
        .post(format!("{base}/api/skills"))
        .json(&json!([]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn health_reports_status_and_version() {
    let (base, _dir) = spawn_server(Some(PASSWORD)).await;

    let body: Value = client()
        .get(format!("{base}/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body.get("status").and_then(Value::as_str), Some("ok"));
    assert!(body.get("version").is_some());
}
