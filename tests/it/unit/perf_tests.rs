//! Unit tests for perf module.

use bikeboard::perf::{measure, RenderStats, ScopedTimer};

#[test]
fn test_render_stats_basic() {
    let mut stats = RenderStats::new();
    for ms in [10.0, 20.0, 30.0] {
        stats.record(ms);
    }

    assert_eq!(stats.count(), 3);
    assert!((stats.average() - 20.0).abs() < 1e-9);

    let summary = stats.summary();
    assert_eq!(summary.min_ms, 10.0);
    assert_eq!(summary.max_ms, 30.0);
}

#[test]
fn test_empty_stats_summary_is_zeroed() {
    let summary = RenderStats::new().summary();
    assert_eq!(summary.count, 0);
    assert_eq!(summary.average_ms, 0.0);
    assert_eq!(summary.p95_ms, 0.0);
    assert_eq!(summary.min_ms, 0.0);
}

#[test]
fn test_rolling_window_keeps_total_count() {
    let mut stats = RenderStats::new();
    for _ in 0..150 {
        stats.record(1.0);
    }
    assert_eq!(stats.count(), 150);
    assert!((stats.average() - 1.0).abs() < 1e-9);
}

#[test]
fn test_scoped_timer_creation() {
    // High threshold, so dropping it must not warn or panic
    let timer = ScopedTimer::new("test_op", 10_000.0);
    assert!(timer.elapsed_ms() >= 0.0);
}

#[test]
fn test_measure_returns_result() {
    let (value, ms) = measure(|| 2 + 2);
    assert_eq!(value, 4);
    assert!(ms >= 0.0);
}
