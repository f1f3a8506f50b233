//! Dashboard server over a real socket.

use crate::helpers::two_day_builder;
use bikeboard::server::{DashboardServer, ServerError};
use bikeboard::settings::DashboardSettings;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::time::Duration;

fn settings(bind_addr: &str) -> DashboardSettings {
    DashboardSettings {
        bind_addr: bind_addr.to_string(),
        seed: Some(11),
        ..Default::default()
    }
}

fn start() -> DashboardServer {
    DashboardServer::start(Arc::new(two_day_builder().build()), &settings("127.0.0.1:0")).unwrap()
}

/// Issue a GET and return (status code, body).
fn get(addr: SocketAddr, path: &str) -> (u16, String) {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(10))).unwrap();
    write!(
        stream,
        "GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n"
    )
    .unwrap();

    let mut raw = String::new();
    stream.read_to_string(&mut raw).unwrap();

    let status = raw
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let body = raw
        .split_once("\r\n\r\n")
        .map(|(_, b)| b.to_string())
        .unwrap_or_default();
    (status, body)
}

#[test]
fn test_index_defaults_to_earliest_date() {
    let server = start();
    let (status, body) = get(server.local_addr(), "/");

    assert_eq!(status, 200);
    assert!(body.contains("value=\"2011-01-01\""));
    assert!(body.contains("Bike Rentals on 2011-01-01"));
    server.shutdown();
}

#[test]
fn test_index_with_date_query() {
    let server = start();
    let (status, body) = get(server.local_addr(), "/?date=2011-01-02");

    assert_eq!(status, 200);
    assert!(body.contains("Bike Rentals on 2011-01-02"));
    server.shutdown();
}

#[test]
fn test_bad_date_falls_back() {
    let server = start();
    let (status, body) = get(server.local_addr(), "/?date=tomorrow");

    assert_eq!(status, 200);
    assert!(body.contains("Bike Rentals on 2011-01-01"));
    server.shutdown();
}

#[test]
fn test_report_api_and_health() {
    let server = start();
    let addr = server.local_addr();

    let (status, body) = get(addr, "/api/report?date=2011-01-02");
    assert_eq!(status, 200);
    let report: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(report["selected_date"], "2011-01-02");
    assert_eq!(report["filtered"].as_array().unwrap().len(), 2);
    assert_eq!(report["daily_totals"][0]["total"], 88);

    let (status, body) = get(addr, "/health");
    assert_eq!(status, 200);
    let health: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["rows"], 5);
    assert_eq!(health["renders"]["count"], 1);

    server.shutdown();
}

#[test]
fn test_unknown_path_is_404() {
    let server = start();
    let (status, _) = get(server.local_addr(), "/favicon.ico");
    assert_eq!(status, 404);
    server.shutdown();
}

#[test]
fn test_bind_conflict_is_error() {
    let taken = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = taken.local_addr().unwrap().to_string();

    let result = DashboardServer::start(Arc::new(two_day_builder().build()), &settings(&addr));
    assert!(matches!(result, Err(ServerError::Bind { .. })));
}
