use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::{get, post},
    Json, Router,
};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct TodayCount {
    count: u64,
}

#[derive(Debug, Deserialize)]
struct StatsRecord {
    total_count: u64,
    today: TodayCount,
}

#[derive(Debug, Deserialize)]
struct CatalogSummary {
    source: String,
    trivia: usize,
    memes: usize,
    quick_wins: usize,
}

#[derive(Debug, Deserialize)]
struct LoopOutcome {
    state: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    correct: Option<bool>,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    stats: Option<StatsRecord>,
}

type Reports = Arc<Mutex<Vec<(Option<String>, Value)>>>;

#[derive(Clone)]
struct FakeRemote {
    loops: Value,
    reports: Reports,
}

async fn list_loops(State(remote): State<FakeRemote>) -> Json<Value> {
    Json(remote.loops)
}

async fn record_loop(
    State(remote): State<FakeRemote>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    let auth = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    remote.reports.lock().unwrap().push((auth, body));
    StatusCode::CREATED
}

async fn spawn_fake_remote(loops: Value) -> (String, Reports) {
    let reports: Reports = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/loops", get(list_loops))
        .route("/users/guest/loop", post(record_loop))
        .with_state(FakeRemote {
            loops,
            reports: Arc::clone(&reports),
        });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), reports)
}

/// Answers every `/loops` request with 503 and counts them.
async fn spawn_failing_remote() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let app = Router::new().route(
        "/loops",
        get(move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                StatusCode::SERVICE_UNAVAILABLE
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), hits)
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("doomstop_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/stats")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(api_base: &str) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_doomstop"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", unique_data_path())
        .env("DOOMSTOP_API_BASE", api_base)
        .env("DOOMSTOP_API_TOKEN", "test-token")
        .env("DOOMSTOP_REMOTE_TIMEOUT_SECS", "2")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn wait_for_source(server: &TestServer, source: &str) -> CatalogSummary {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        let summary: CatalogSummary = client
            .get(format!("{}/api/catalog", server.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        if summary.source == source || Instant::now() > deadline {
            return summary;
        }
        sleep(Duration::from_millis(50)).await;
    }
}

async fn wait_for_reports(reports: &Reports, count: usize) -> Vec<(Option<String>, Value)> {
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        let current = reports.lock().unwrap().clone();
        if current.len() >= count || Instant::now() > deadline {
            return current;
        }
        sleep(Duration::from_millis(50)).await;
    }
}

async fn post_loop(server: &TestServer, path: &str, body: Option<Value>) -> reqwest::Response {
    let request = Client::new().post(format!("{}{path}", server.base_url));
    let request = match body {
        Some(body) => request.json(&body),
        None => request,
    };
    request.send().await.unwrap()
}

fn paris_question() -> Value {
    json!({ "type": "trivia", "content": {
        "id": 1,
        "question": "What is the capital of France?",
        "options": ["Paris", "Berlin", "London"],
        "answer": "Paris"
    }})
}

#[tokio::test(flavor = "multi_thread")]
async fn http_first_meme_counts_and_reports() {
    let (api_base, reports) = spawn_fake_remote(json!([])).await;
    let server = spawn_server(&api_base).await;
    let client = Client::new();

    let before: StatsRecord = client
        .get(format!("{}/api/stats", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!((before.total_count, before.today.count), (0, 0));

    let response = post_loop(&server, "/api/loops/meme", None).await;
    assert!(response.status().is_success());
    let outcome: LoopOutcome = response.json().await.unwrap();
    assert_eq!(outcome.state, "resolved");
    let stats = outcome.stats.expect("resolved loop carries stats");
    assert_eq!((stats.total_count, stats.today.count), (1, 1));

    let received = wait_for_reports(&reports, 1).await;
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].0.as_deref(), Some("Bearer test-token"));
    assert_eq!(received[0].1, json!({ "loop_id": 0, "success": true }));

    let index = client.get(&server.base_url).send().await.unwrap().text().await.unwrap();
    assert!(index.contains(r#"<span id="totalEscapes" class="value">1</span>"#));
}

#[tokio::test(flavor = "multi_thread")]
async fn http_remote_catalog_replaces_builtin_content() {
    let (api_base, _reports) = spawn_fake_remote(json!([
        { "type": "meme", "content": { "text": "Remote meme only" } },
        { "type": "poll", "content": { "text": "not a loop kind" } },
        paris_question()
    ]))
    .await;
    let server = spawn_server(&api_base).await;

    let summary = wait_for_source(&server, "remote").await;
    assert_eq!(summary.source, "remote");
    assert_eq!((summary.trivia, summary.memes), (1, 1));
    assert_eq!(summary.quick_wins, 5);

    let outcome: LoopOutcome = post_loop(&server, "/api/loops/meme", None)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(outcome.message.as_deref(), Some("Remote meme only"));
}

#[tokio::test(flavor = "multi_thread")]
async fn http_wrong_trivia_answer_still_counts() {
    let (api_base, _reports) = spawn_fake_remote(json!([paris_question()])).await;
    let server = spawn_server(&api_base).await;
    wait_for_source(&server, "remote").await;

    let presented: LoopOutcome = post_loop(&server, "/api/loops/trivia", None)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(presented.state, "presenting");
    assert_eq!(
        presented.options.as_deref(),
        Some(&["Paris".to_string(), "Berlin".to_string(), "London".to_string()][..])
    );

    let response = post_loop(
        &server,
        "/api/loops/trivia/answer",
        Some(json!({ "choice": "Berlin" })),
    )
    .await;
    assert!(response.status().is_success());
    let outcome: LoopOutcome = response.json().await.unwrap();
    assert_eq!(outcome.correct, Some(false));
    assert!(outcome.message.unwrap().contains("Paris"));
    let stats = outcome.stats.unwrap();
    assert_eq!((stats.total_count, stats.today.count), (1, 1));

    let again = post_loop(
        &server,
        "/api/loops/trivia/answer",
        Some(json!({ "choice": "Paris" })),
    )
    .await;
    assert_eq!(again.status(), reqwest::StatusCode::CONFLICT);
}

#[tokio::test(flavor = "multi_thread")]
async fn http_failed_fetch_keeps_builtin_content() {
    let (api_base, hits) = spawn_failing_remote().await;
    let server = spawn_server(&api_base).await;

    let deadline = Instant::now() + Duration::from_secs(3);
    while hits.load(Ordering::SeqCst) == 0 {
        assert!(Instant::now() < deadline, "server never asked the remote for loops");
        sleep(Duration::from_millis(20)).await;
    }
    sleep(Duration::from_millis(200)).await;

    let summary: CatalogSummary = Client::new()
        .get(format!("{}/api/catalog", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(summary.source, "builtin");
    assert_eq!((summary.trivia, summary.memes, summary.quick_wins), (5, 5, 5));

    let response = post_loop(&server, "/api/loops/quick_win", None).await;
    assert!(response.status().is_success());
    let outcome: LoopOutcome = response.json().await.unwrap();
    let stats = outcome.stats.unwrap();
    assert_eq!((stats.total_count, stats.today.count), (1, 1));
}
