// tests/integration/http_backend.rs

use std::error::Error as _;
use std::sync::atomic::{AtomicUsize, Ordering};

use apiary_submitter::config::{RawConfigFile, ServerConfig, finish};
use apiary_submitter::engine::Submitter;
use apiary_submitter::remote::HttpBackend;
use apiary_submitter_test_utils::{assert_submit_failed, init_tracing, within};
use serde_json::{Value, json};

use crate::common::{TestResult, demo_job};
use crate::stub_server::{Request, StubServer};

fn backend_for(host: String) -> HttpBackend {
    let server = ServerConfig {
        host,
        timeout_secs: 5,
        connect_timeout_secs: 1,
    };
    HttpBackend::new(&server).unwrap()
}

/// Routes of a healthy service. Task creation fails from the
/// `fail_task_from`-th call onwards (zero-based), if set.
fn service(fail_task_from: Option<usize>) -> impl Fn(&Request) -> (u16, Value) + Send + Sync {
    let task_calls = AtomicUsize::new(0);
    move |req| match (req.method.as_str(), req.path.as_str()) {
        ("GET", "/status/jobs") => (200, json!({"WAITING": 1, "DONE": 3, "ERROR": 4})),
        ("GET", "/status/tasks") => (200, json!({"READY": 1, "ERROR": 4})),
        ("POST", "/jobs/") => (201, json!({"id": "j1", "name": req.body["name"]})),
        ("PATCH", "/jobs/j1") => (200, json!({"id": "j1", "status": req.body["status"]})),
        ("POST", "/jobs/j1/tasks") => {
            let n = task_calls.fetch_add(1, Ordering::SeqCst);
            if fail_task_from.is_some_and(|from| n >= from) {
                (500, json!({"detail": "database is on fire"}))
            } else {
                (201, json!([{"id": format!("t{}", n + 1)}]))
            }
        }
        _ => (404, json!({"detail": "not found"})),
    }
}

#[tokio::test]
async fn submit_talks_rest_to_the_service() -> TestResult {
    init_tracing();

    let server = StubServer::start(service(None)).await;
    let submitter = Submitter::new(backend_for(server.host()));
    let (job, _) = demo_job();

    let job_id = within(10, submitter.submit(&job)).await?;
    assert_eq!(job_id, "j1");

    assert_eq!(
        server.routes(),
        vec![
            "GET /status/jobs",
            "POST /jobs/",
            "GET /status/tasks",
            "POST /jobs/j1/tasks",
            "POST /jobs/j1/tasks",
            "POST /jobs/j1/tasks",
        ]
    );

    let requests = server.requests();
    assert_eq!(
        requests[1].body,
        json!({
            "name": "Submitter Tester",
            "user_id": 0,
            "status": 1,
            "pools": ["demo"],
            "priority": 750,
            "tags": ["tests"],
            "metadata": {"hello": "world"}
        })
    );

    // One-element array per task; later tasks reference the root's id.
    assert_eq!(requests[3].body[0]["name"], "echo 1");
    assert_eq!(requests[3].body[0]["parents"], json!([]));
    assert_eq!(requests[4].body.as_array().map(Vec::len), Some(1));
    assert_eq!(requests[4].body[0]["parents"], json!(["t1"]));
    assert_eq!(requests[5].body[0]["name"], "echo 3");
    assert_eq!(requests[5].body[0]["status"], 1);
    Ok(())
}

#[tokio::test]
async fn server_error_on_task_invalidates_job() -> TestResult {
    init_tracing();

    let server = StubServer::start(service(Some(1))).await;
    let submitter = Submitter::new(backend_for(server.host()));
    let (job, _) = demo_job();

    let err = within(10, submitter.submit(&job)).await.unwrap_err();

    assert_submit_failed(&err, "Task creation failed");
    let cause = err.source().map(|s| s.to_string()).unwrap_or_default();
    assert!(cause.contains("500"), "cause was: {cause}");

    let routes = server.routes();
    assert_eq!(routes.last().map(String::as_str), Some("PATCH /jobs/j1"));
    assert_eq!(routes.iter().filter(|r| r.starts_with("PATCH")).count(), 1);
    assert_eq!(server.requests().last().map(|r| r.body.clone()), Some(json!({"status": 4})));
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_a_remote_error() -> TestResult {
    let server = StubServer::start(|_: &Request| (404, json!({"detail": "not found"}))).await;
    let submitter = Submitter::new(backend_for(server.host()));
    let (job, _) = demo_job();

    let err = within(10, submitter.submit(&job)).await.unwrap_err();

    assert_submit_failed(&err, "Fetching jobs statuses failed");
    assert_eq!(server.routes(), vec!["GET /status/jobs"]);
    Ok(())
}

#[tokio::test]
async fn unreachable_service_fails_before_creating_anything() -> TestResult {
    let submitter = Submitter::new(backend_for("http://127.0.0.1:1".to_string()));
    let (job, _) = demo_job();

    let err = within(10, submitter.submit(&job)).await.unwrap_err();

    assert_submit_failed(&err, "Fetching jobs statuses failed");
    assert!(!submitter.statuses().is_job_catalog_cached());
    Ok(())
}

#[tokio::test]
async fn submitter_from_config_fetches_catalogs() -> TestResult {
    let server = StubServer::start(service(None)).await;
    let cfg = finish(RawConfigFile::default(), Some(server.host()))?;
    let submitter = Submitter::from_config(&cfg)?;

    let statuses = submitter.statuses();
    let jobs = within(10, statuses.job_catalog(submitter.backend())).await?;
    assert_eq!(jobs.get("ERROR"), Some(&4));
    let tasks = within(10, statuses.task_catalog(submitter.backend())).await?;
    assert_eq!(tasks.get("READY"), Some(&1));

    assert_eq!(submitter.backend().host(), server.host());
    assert_eq!(server.routes(), vec!["GET /status/jobs", "GET /status/tasks"]);
    Ok(())
}
