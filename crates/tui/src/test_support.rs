//! In-process backend used by the tests: serves `/api/v1/loans` on an
//! ephemeral port and records what it receives.

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde_json::{Value, json};
use tokio::{net::TcpListener, sync::Notify};

#[derive(Default)]
struct Shared {
    records: Mutex<Vec<Value>>,
    list_hits: AtomicUsize,
    create_hits: AtomicUsize,
    fail_list: AtomicBool,
    create_status: Mutex<StatusCode>,
    last_body: Mutex<Option<Value>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

pub struct MockBackend {
    addr: std::net::SocketAddr,
    shared: Arc<Shared>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let shared = Arc::new(Shared::default());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let router = Router::new()
            .route("/api/v1/loans", get(list_loans).post(create_loan))
            .with_state(shared.clone());
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { addr, shared }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn set_records(&self, records: Vec<Value>) {
        *self.shared.records.lock().unwrap() = records;
    }

    pub fn fail_list(&self, fail: bool) {
        self.shared.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn set_create_status(&self, status: StatusCode) {
        *self.shared.create_status.lock().unwrap() = status;
    }

    /// Holds every create request until [`MockBackend::release_one`].
    pub fn hold_creates(&self) {
        *self.shared.gate.lock().unwrap() = Some(Arc::new(Notify::new()));
    }

    pub fn release_one(&self) {
        if let Some(gate) = self.shared.gate.lock().unwrap().as_ref() {
            gate.notify_one();
        }
    }

    pub fn list_hits(&self) -> usize {
        self.shared.list_hits.load(Ordering::SeqCst)
    }

    pub fn create_hits(&self) -> usize {
        self.shared.create_hits.load(Ordering::SeqCst)
    }

    pub fn last_body(&self) -> Option<Value> {
        self.shared.last_body.lock().unwrap().clone()
    }

    pub async fn wait_for_creates(&self, count: usize) {
        for _ in 0..200 {
            if self.create_hits() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("backend never saw {count} create request(s)");
    }
}

async fn list_loans(State(shared): State<Arc<Shared>>) -> (StatusCode, Json<Value>) {
    shared.list_hits.fetch_add(1, Ordering::SeqCst);
    if shared.fail_list.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "database unavailable" })),
        );
    }
    let records = shared.records.lock().unwrap().clone();
    (StatusCode::OK, Json(Value::Array(records)))
}

async fn create_loan(
    State(shared): State<Arc<Shared>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    shared.create_hits.fetch_add(1, Ordering::SeqCst);
    *shared.last_body.lock().unwrap() = Some(body.clone());

    let gate = shared.gate.lock().unwrap().clone();
    if let Some(gate) = gate {
        gate.notified().await;
    }

    let status = *shared.create_status.lock().unwrap();
    if status.is_success() {
        shared.records.lock().unwrap().push(body.clone());
    }
    (status, Json(body))
}

/// Base URL of a port nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// A base URL whose server accepts connections and never answers.
pub async fn silent_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{addr}")
}
