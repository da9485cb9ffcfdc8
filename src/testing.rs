use crate::models::CompletionEvent;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ReceivedReport {
    pub authorization: Option<String>,
    pub event: CompletionEvent,
}

#[derive(Clone)]
struct FakeState {
    loops_status: StatusCode,
    loops_body: Value,
    report_status: StatusCode,
    reports: Arc<Mutex<Vec<ReceivedReport>>>,
}

pub struct FakeRemote {
    pub base_url: String,
    reports: Arc<Mutex<Vec<ReceivedReport>>>,
}

impl FakeRemote {
    pub async fn spawn(loops_status: StatusCode, loops_body: Value) -> Self {
        Self::spawn_with_report_status(loops_status, loops_body, StatusCode::CREATED).await
    }

    pub async fn spawn_with_report_status(
        loops_status: StatusCode,
        loops_body: Value,
        report_status: StatusCode,
    ) -> Self {
        let reports = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            loops_status,
            loops_body,
            report_status,
            reports: Arc::clone(&reports),
        };
        let app = Router::new()
            .route("/loops", get(list_loops))
            .route("/users/guest/loop", post(record_loop))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{addr}"),
            reports,
        }
    }

    pub fn reports(&self) -> Vec<ReceivedReport> {
        self.reports.lock().unwrap().clone()
    }

    pub async fn wait_for_reports(&self, count: usize) -> Vec<ReceivedReport> {
        let deadline = Instant::now() + Duration::from_secs(1);
        loop {
            let reports = self.reports();
            if reports.len() >= count || Instant::now() > deadline {
                return reports;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

async fn list_loops(State(state): State<FakeState>) -> (StatusCode, Json<Value>) {
    (state.loops_status, Json(state.loops_body))
}

async fn record_loop(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(event): Json<CompletionEvent>,
) -> StatusCode {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    state
        .reports
        .lock()
        .unwrap()
        .push(ReceivedReport { authorization, event });
    state.report_status
}
