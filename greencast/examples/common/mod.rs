use std::sync::Arc;

use greencast::GreencastConnector;

/// Portal connector when `GREENCAST_PORTAL_URL` is set, otherwise the
/// ledger-backed mock.
#[must_use]
pub fn get_connector() -> Arc<dyn GreencastConnector> {
    match std::env::var("GREENCAST_PORTAL_URL") {
        Ok(base) => match greencast_http::PortalConnector::builder(&base) {
            Ok(b) => b.build(),
            Err(e) => {
                eprintln!("--- ({e}; falling back to mock) ---");
                Arc::new(greencast_mock::MockConnector::new())
            }
        },
        Err(_) => {
            println!("--- (Using Mock Connector; set GREENCAST_PORTAL_URL for a live portal) ---");
            Arc::new(greencast_mock::MockConnector::new())
        }
    }
}

/// Install an `EnvFilter`-driven fmt subscriber (`RUST_LOG=greencast=debug`).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
