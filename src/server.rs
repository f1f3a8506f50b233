//! Local HTTP server for the dashboard.
//!
//! ## Architecture
//!
//! One background thread owns a `tiny_http` server and handles requests one
//! at a time. Every page request re-runs the whole report pipeline against
//! the shared, read-only dataset; nothing is cached between requests.
//!
//! ## Routes
//!
//! - `GET /?date=YYYY-MM-DD`: the dashboard page
//! - `GET /api/report?date=YYYY-MM-DD`: the same report as JSON
//! - `GET /health`: row count and render timings

use crate::constants::{SERVER_POLL_MS, SERVER_STARTUP_TIMEOUT_SECS, SLOW_RENDER_MS};
use crate::data::{build_report, default_date, parse_date, DataResult, KMeansConfig, Report};
use crate::perf::{measure, RenderStats};
use crate::render::render_page;
use crate::settings::DashboardSettings;
use crate::types::Dataset;
use chrono::NaiveDate;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};
use tracing::{debug, error, info, warn};

/// Errors starting the dashboard server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {message}")]
    Bind { addr: String, message: String },

    #[error("Server startup timeout")]
    StartupTimeout,

    #[error("Failed to spawn server thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Helper to create HTTP headers, returning None if the bytes are invalid
fn create_header(name: &[u8], value: &[u8]) -> Option<Header> {
    Header::from_bytes(name, value).ok()
}

/// A response ready to be written back.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            body,
        }
    }

    fn json(status: u16, value: &serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: value.to_string(),
        }
    }

    fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: body.into(),
        }
    }
}

/// Everything a render pass needs. Owned by the server thread.
pub struct DashboardState {
    dataset: Arc<Dataset>,
    clustering: KMeansConfig,
    stats: RenderStats,
}

impl DashboardState {
    pub fn new(dataset: Arc<Dataset>, clustering: KMeansConfig) -> Self {
        Self {
            dataset,
            clustering,
            stats: RenderStats::new(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// The requested date, or the dataset's earliest date when the query is
    /// missing or unparsable. Dates outside the dataset are kept and render
    /// an empty table.
    pub fn resolve_date(&self, requested: Option<&str>) -> NaiveDate {
        let Some(raw) = requested.map(str::trim).filter(|s| !s.is_empty()) else {
            return default_date(&self.dataset);
        };
        let Some(date) = parse_date(raw) else {
            warn!("Unparsable date `{}`, showing the default date", raw);
            return default_date(&self.dataset);
        };
        if let Some(range) = self.dataset.date_range() {
            if !range.contains(date) {
                debug!("{} is outside {}..={}", date, range.start, range.end);
            }
        }
        date
    }

    /// Build every view for `date`, recording the elapsed time.
    pub fn report(&mut self, date: NaiveDate) -> DataResult<Report> {
        let (report, elapsed_ms) = measure(|| build_report(&self.dataset, date, &self.clustering));
        self.stats.record(elapsed_ms);
        if elapsed_ms > SLOW_RENDER_MS {
            warn!(
                elapsed_ms = format!("{:.2}", elapsed_ms),
                "Slow render pass for {}",
                date
            );
        } else {
            debug!("Built report for {} in {:.2}ms", date, elapsed_ms);
        }
        report
    }

    /// Full HTML page for `date`.
    pub fn render_html(&mut self, date: NaiveDate) -> DataResult<String> {
        let report = self.report(date)?;
        Ok(render_page(&report, self.clustering.k))
    }

    /// Dispatch one request. Pure apart from timing statistics, so it can be
    /// exercised without a socket.
    pub fn route(&mut self, method: &Method, url: &str) -> Reply {
        if !matches!(method, Method::Get | Method::Head) {
            return Reply::text(405, "Method Not Allowed");
        }

        let (path, date_param) = parse_url(url);
        match path.as_str() {
            "/" | "/index.html" => {
                let date = self.resolve_date(date_param.as_deref());
                match self.render_html(date) {
                    Ok(html) => Reply::html(html),
                    Err(e) => {
                        error!("Render failed: {}", e);
                        Reply::text(500, e.to_string())
                    }
                }
            }
            "/api/report" => {
                let date = self.resolve_date(date_param.as_deref());
                match self.report(date).map(|r| serde_json::to_value(&r)) {
                    Ok(Ok(value)) => Reply::json(200, &value),
                    Ok(Err(e)) => Reply::text(500, e.to_string()),
                    Err(e) => {
                        error!("Report failed: {}", e);
                        Reply::text(500, e.to_string())
                    }
                }
            }
            "/health" => Reply::json(
                200,
                &serde_json::json!({
                    "status": "ok",
                    "rows": self.dataset.len(),
                    "dataset": self.dataset.name(),
                    "renders": self.stats.summary(),
                }),
            ),
            _ => Reply::text(404, "Not Found"),
        }
    }
}

/// Split a request URL into its path and decoded `date` query parameter.
pub fn parse_url(url: &str) -> (String, Option<String>) {
    let (path, query) = match url.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (url, None),
    };

    let date = query.and_then(|q| {
        q.split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "date")
            .and_then(|(_, value)| {
                urlencoding::decode(&value.replace('+', " "))
                    .ok()
                    .map(|v| v.into_owned())
            })
    });

    (path.to_string(), date)
}

/// Dashboard server running on a background thread.
pub struct DashboardServer {
    addr: SocketAddr,
    shutdown_flag: Arc<AtomicBool>,
    server_thread: Option<JoinHandle<()>>,
}

impl DashboardServer {
    /// Bind the configured address and start serving.
    pub fn start(dataset: Arc<Dataset>, settings: &DashboardSettings) -> Result<Self, ServerError> {
        let bind_addr = settings.bind_addr.clone();
        let mut state = DashboardState::new(dataset, settings.kmeans_config());
        let shutdown_flag = Arc::new(AtomicBool::new(false));
        let shutdown_flag_clone = shutdown_flag.clone();

        // Channel for server startup synchronization
        let (tx, rx) = mpsc::channel();

        let server_thread = thread::Builder::new()
            .name("dashboard-server".to_string())
            .spawn(move || {
                let server = match Server::http(&bind_addr) {
                    Ok(s) => s,
                    Err(e) => {
                        let _ = tx.send(Err(ServerError::Bind {
                            addr: bind_addr.clone(),
                            message: e.to_string(),
                        }));
                        return;
                    }
                };
                let Some(local) = server.server_addr().to_ip() else {
                    let _ = tx.send(Err(ServerError::Bind {
                        addr: bind_addr.clone(),
                        message: "not an IP listener".to_string(),
                    }));
                    return;
                };
                let _ = tx.send(Ok(local));

                loop {
                    if shutdown_flag_clone.load(Ordering::Relaxed) {
                        break;
                    }

                    match server.recv_timeout(Duration::from_millis(SERVER_POLL_MS)) {
                        Ok(Some(request)) => Self::handle(&mut state, request),
                        Ok(None) => {}
                        Err(e) => {
                            error!("Dashboard server stopped: {}", e);
                            break;
                        }
                    }
                }
                debug!("Dashboard server thread exiting");
            })?;

        // Wait for server to start with timeout
        let addr = match rx.recv_timeout(Duration::from_secs(SERVER_STARTUP_TIMEOUT_SECS)) {
            Ok(Ok(addr)) => addr,
            Ok(Err(e)) => {
                let _ = server_thread.join();
                return Err(e);
            }
            Err(_) => return Err(ServerError::StartupTimeout),
        };

        info!("Dashboard server listening on http://{}/", addr);

        Ok(Self {
            addr,
            shutdown_flag,
            server_thread: Some(server_thread),
        })
    }

    /// Address actually bound (useful with port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Block until the server thread exits.
    pub fn wait(mut self) {
        if let Some(handle) = self.server_thread.take() {
            let _ = handle.join();
        }
    }

    /// Stop serving and join the server thread.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.shutdown_flag.store(true, Ordering::SeqCst);
        if let Some(handle) = self.server_thread.take() {
            let _ = handle.join();
        }
    }

    fn handle(state: &mut DashboardState, request: Request) {
        let reply = state.route(request.method(), request.url());
        debug!("{} {} -> {}", request.method(), request.url(), reply.status);

        let mut response =
            Response::from_string(reply.body).with_status_code(StatusCode(reply.status));
        if let Some(header) = create_header(&b"Content-Type"[..], reply.content_type.as_bytes()) {
            response = response.with_header(header);
        }
        if let Err(e) = request.respond(response) {
            warn!("Failed to write response: {}", e);
        }
    }
}

impl Drop for DashboardServer {
    fn drop(&mut self) {
        self.stop();
    }
}
