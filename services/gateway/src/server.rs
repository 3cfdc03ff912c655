//! HTTP server and background alert checks

use anyhow::{Context, Result};
use hyper::service::{make_service_fn, service_fn};
use hyper::Server;
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::handlers::handle_request;
use crate::state::AppState;

/// Serves the data, alert and health endpoints
pub struct GatewayServer {
    state: Arc<AppState>,
    addr: SocketAddr,
}

impl GatewayServer {
    pub fn new(state: Arc<AppState>, addr: SocketAddr) -> Self {
        Self { state, addr }
    }

    /// Resolve `bind_address:port` into a socket address
    pub fn bind_addr(bind_address: &str, port: u16) -> Result<SocketAddr> {
        format!("{}:{}", bind_address, port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", bind_address, port))
    }

    /// Serve until `shutdown` resolves
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let state = Arc::clone(&self.state);

        let make_svc = make_service_fn(move |_conn| {
            let state = Arc::clone(&state);
            async move {
                Ok::<_, Infallible>(service_fn(move |req| {
                    let state = Arc::clone(&state);
                    handle_request(req, state)
                }))
            }
        });

        let server = Server::try_bind(&self.addr)
            .with_context(|| format!("Failed to bind {}", self.addr))?
            .serve(make_svc);

        info!("Bandwatch gateway listening on http://{}", self.addr);
        info!("Endpoints: /crypto-data, /check-alerts, /health");

        server
            .with_graceful_shutdown(shutdown)
            .await
            .context("Gateway server error")
    }
}

/// Run [`bollinger_alerts_strategy::AlertChecker::check_all`] every `interval`.
///
/// The first check runs one full interval after start.
pub fn spawn_periodic_check(state: Arc<AppState>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let report = state.checker.check_all().await;
            if report.failed() == report.outcomes.len() {
                warn!("Scheduled alert check: every symbol failed to fetch");
            } else {
                info!(
                    "Scheduled alert check: {} alerts sent across {} symbols",
                    report.alerts_sent,
                    report.outcomes.len()
                );
            }
        }
    })
}
