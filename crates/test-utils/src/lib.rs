pub mod requests;

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt};

use toolrun::environment::mock::MockEnv;

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// A fake lookup that only carries the host's `PATH`, so children such as
/// `sh` and `env` can still be found while everything else stays controlled.
pub fn path_only_env() -> MockEnv {
    match std::env::var("PATH") {
        Ok(path) => MockEnv::new().with_var("PATH", path),
        Err(_) => MockEnv::new().with_var("PATH", "/usr/local/bin:/usr/bin:/bin"),
    }
}

/// Run a future with a 10-second timeout.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(std::time::Duration::from_secs(10), f)
        .await
        .expect("Test timed out after 10 seconds")
}
