use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::response::IntoResponse;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use formboard::config::Config;

/// A running test server with a dedicated test database and a stub
/// geocoding server.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: PgPool,
    pub client: Client,
    pub db_name: String,
    geocode_hits: Arc<AtomicUsize>,
}

/// What the stub geocoding server answers with.
#[derive(Clone, Copy)]
pub enum GeocodeStub {
    Results(f64, f64),
    Empty,
    ServerError,
}

pub struct TestOptions {
    pub webhook_secret: Option<String>,
    pub geocode: GeocodeStub,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            webhook_secret: None,
            geocode: GeocodeStub::Results(41.33, -74.19),
        }
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn geocode_hits(&self) -> usize {
        self.geocode_hits.load(Ordering::SeqCst)
    }

    /// POST a JSON payload to the webhook, return (body, status).
    pub async fn post_webhook(&self, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/webhook"))
            .json(body)
            .send()
            .await
            .expect("webhook request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// POST to the webhook with an authorization header.
    pub async fn post_webhook_with_auth(
        &self,
        body: &Value,
        authorization: &str,
    ) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/webhook"))
            .header("authorization", authorization)
            .json(body)
            .send()
            .await
            .expect("webhook request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn get_json(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Poll the submissions API until the predicate passes. The feed is
    /// asynchronous, so tests wait instead of asserting immediately.
    pub async fn wait_for_list<F>(&self, query: &str, pred: F) -> Value
    where
        F: Fn(&Value) -> bool,
    {
        let path = format!("/api/v1/submissions{query}");
        for _ in 0..50 {
            let (body, status) = self.get_json(&path).await;
            if status == StatusCode::OK && pred(&body) {
                return body;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        panic!("timed out waiting for submissions state at {path}");
    }

    /// Wait for the dashboard task to finish its initial bulk read.
    pub async fn wait_until_loaded(&self) {
        self.wait_for_list("", |body| body["loaded"] == json!(true))
            .await;
    }

    /// Row count straight from the store, bypassing the dashboard.
    pub async fn count_rows(&self) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM form_submissions")
            .fetch_one(&self.pool)
            .await
            .expect("count query failed")
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(TestOptions::default()).await
}

/// Spawn a test app with a fresh temporary database and a stub
/// geocoding server.
pub async fn spawn_app_with(options: TestOptions) -> TestApp {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    // Create a unique test database
    let db_name = format!(
        "formboard_test_{}",
        Uuid::now_v7().to_string().replace('-', "")
    );

    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    // Connect to test DB and run migrations
    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    let (geocoding_base_url, geocode_hits) = spawn_geocode_stub(options.geocode).await;

    let config = Config {
        database_url: test_url,
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        webhook_secret: options.webhook_secret,
        geocoding_api_key: Some("test-key".to_string()),
        geocoding_base_url,
        maps_api_key: None,
        log_level: "warn".to_string(),
    };

    let (app, _state) = formboard::build_app(pool.clone(), config);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        pool,
        client,
        db_name,
        geocode_hits,
    }
}

/// A one-route server imitating the geocoding API, counting hits.
async fn spawn_geocode_stub(mode: GeocodeStub) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let handler_hits = hits.clone();

    let app = axum::Router::new().fallback(move || {
        let hits = handler_hits.clone();
        async move {
            hits.fetch_add(1, Ordering::SeqCst);
            match mode {
                GeocodeStub::Results(lat, lng) => axum::Json(json!({
                    "results": [{ "geometry": { "location": { "lat": lat, "lng": lng } } }]
                }))
                .into_response(),
                GeocodeStub::Empty => axum::Json(json!({ "results": [] })).into_response(),
                GeocodeStub::ServerError => (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(json!({ "error": "geocoding unavailable" })),
                )
                    .into_response(),
            }
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind geocode stub");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Geocode stub failed");
    });

    (format!("http://{addr}/geocode/json"), hits)
}

/// Drop the test database after tests complete.
pub async fn cleanup(app: TestApp) {
    let db_name = app.db_name.clone();
    eprintln!("CLEANUP: closing pool");
    app.pool.close().await;
    eprintln!("CLEANUP: pool closed");

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect for cleanup");

    eprintln!("CLEANUP: admin connected, dropping");
    let r = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;
    eprintln!("CLEANUP: drop result = {r:?}");

    admin_pool.close().await;
    eprintln!("CLEANUP: done");
}
