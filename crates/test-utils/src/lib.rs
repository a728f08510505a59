pub mod builders;
pub mod fake_backend;

use std::sync::Once;
use std::time::Duration;

use apiary_submitter::errors::ApiaryError;
use apiary_submitter::engine::Submitter;
use tracing_subscriber::{fmt, EnvFilter};

use crate::fake_backend::FakeBackend;

static INIT: Once = Once::new();

/// Initialise tracing once per test binary.
///
/// Output goes through `with_test_writer()`, so it only shows up for failing
/// tests (or with `-- --nocapture`). `RUST_LOG` overrides the default
/// `apiary_submitter=debug` filter.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("apiary_submitter=debug"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// A submitter wired to a fresh handle on `backend`'s shared state.
pub fn submitter(backend: &FakeBackend) -> Submitter<FakeBackend> {
    Submitter::new(backend.clone())
}

/// Panic unless `err` is a submit failure whose message contains `needle`.
pub fn assert_submit_failed(err: &ApiaryError, needle: &str) {
    match err {
        ApiaryError::SubmitFailed { message, .. } => assert!(
            message.contains(needle),
            "expected submit failure mentioning '{needle}', got '{message}'"
        ),
        other => panic!("expected SubmitFailed, got {other:?}"),
    }
}

/// Await `f`, failing the test if it takes longer than `secs` seconds.
pub async fn within<F, T>(secs: u64, f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(Duration::from_secs(secs), f)
        .await
        .unwrap_or_else(|_| panic!("test timed out after {secs} seconds"))
}
