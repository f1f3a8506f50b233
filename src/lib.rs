//! Bike-sharing usage dashboard.
//!
//! Loads an hourly rental dataset once and serves a single page of views
//! over it: the rows of a chosen date, an hour/weekday heatmap, daily totals,
//! a temperature scatter and a k-means clustering of rental times.

pub mod constants;
pub mod data;
pub mod logging;
pub mod perf;
pub mod render;
pub mod server;
pub mod settings;
pub mod types;
