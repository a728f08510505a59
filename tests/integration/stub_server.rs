// tests/integration/stub_server.rs

//! In-process jobs service served by axum. Every request is recorded, and the
//! answer comes from a per-test handler.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::sync::oneshot;

#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub body: Value,
}

type Handler = Arc<dyn Fn(&Request) -> (u16, Value) + Send + Sync>;
type Reply = (StatusCode, Json<Value>);

#[derive(Clone)]
struct StubState {
    handler: Handler,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl StubState {
    fn answer(&self, method: &str, path: String, body: Value) -> Reply {
        let request = Request {
            method: method.to_string(),
            path,
            body,
        };
        let (status, reply) = (self.handler)(&request);
        self.requests.lock().unwrap().push(request);

        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(reply))
    }
}

async fn job_statuses(State(state): State<StubState>) -> Reply {
    state.answer("GET", "/status/jobs".to_string(), Value::Null)
}

async fn task_statuses(State(state): State<StubState>) -> Reply {
    state.answer("GET", "/status/tasks".to_string(), Value::Null)
}

async fn create_job(State(state): State<StubState>, Json(body): Json<Value>) -> Reply {
    state.answer("POST", "/jobs/".to_string(), body)
}

async fn patch_job(
    State(state): State<StubState>,
    Path(job_id): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    state.answer("PATCH", format!("/jobs/{job_id}"), body)
}

async fn create_tasks(
    State(state): State<StubState>,
    Path(job_id): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    state.answer("POST", format!("/jobs/{job_id}/tasks"), body)
}

/// Recorded, but never handed to the test handler.
async fn unknown(State(state): State<StubState>, method: Method, uri: Uri) -> Reply {
    state.requests.lock().unwrap().push(Request {
        method: method.to_string(),
        path: uri.path().to_string(),
        body: Value::Null,
    });
    (StatusCode::NOT_FOUND, Json(json!({"detail": "not found"})))
}

pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Request>>>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl StubServer {
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&Request) -> (u16, Value) + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            handler: Arc::new(handler),
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/status/jobs", get(job_statuses))
            .route("/status/tasks", get(task_statuses))
            .route("/jobs/", post(create_job))
            .route("/jobs/:job_id", patch(patch_job))
            .route("/jobs/:job_id/tasks", post(create_tasks))
            .fallback(unknown)
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = rx.await;
                })
                .await;
        });

        Self {
            addr,
            requests,
            shutdown: Some(tx),
        }
    }

    pub fn host(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    /// `METHOD path` of every request, in arrival order.
    pub fn routes(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
