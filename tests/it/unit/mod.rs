mod loader_tests;
mod perf_tests;
mod snapshot_tests;
mod views_tests;
