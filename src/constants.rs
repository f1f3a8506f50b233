//! Application-wide constants.
//!
//! Centralizes column names, limits and chart geometry so the loader,
//! the pipeline and the renderer agree on them.

// ============================================================================
// Source Columns
// ============================================================================

/// Calendar date of the observation (`YYYY-MM-DD`)
pub const COL_DATE: &str = "dteday";

/// Hour of day (0-23)
pub const COL_HOUR: &str = "hr";

/// Day of week index (0 = Sunday .. 6 = Saturday)
pub const COL_WEEKDAY: &str = "weekday_x";

/// Normalized temperature
pub const COL_TEMP: &str = "temp_x";

/// Normalized humidity
pub const COL_HUMIDITY: &str = "hum_x";

/// Total rentals in the bucket
pub const COL_COUNT: &str = "cnt_x";

/// Every column the loader requires, in display order
pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_DATE,
    COL_HOUR,
    COL_WEEKDAY,
    COL_TEMP,
    COL_HUMIDITY,
    COL_COUNT,
];

// ============================================================================
// Data Loading
// ============================================================================

/// Default dataset location, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "all_data.csv";

/// Maximum CSV file size in MB
pub const MAX_CSV_SIZE_MB: usize = 100;

/// Rows sampled by the CSV reader for schema inference
pub const SCHEMA_INFER_ROWS: usize = 1000;

/// Hours in a day (heatmap columns)
pub const HOURS_PER_DAY: usize = 24;

/// Days in a week (heatmap rows)
pub const DAYS_PER_WEEK: usize = 7;

// ============================================================================
// Clustering
// ============================================================================

/// Number of clusters for the hour/weekday clustering view
pub const DEFAULT_CLUSTER_COUNT: usize = 3;

/// Lloyd iteration cap
pub const KMEANS_MAX_ITERATIONS: usize = 300;

/// Convergence threshold on the summed squared centroid shift
pub const KMEANS_TOLERANCE: f64 = 1e-4;

// ============================================================================
// Server
// ============================================================================

/// Default bind address for the dashboard server
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8501";

/// How long the server loop blocks waiting for a request before re-checking shutdown
pub const SERVER_POLL_MS: u64 = 100;

/// Server startup timeout in seconds
pub const SERVER_STARTUP_TIMEOUT_SECS: u64 = 5;

/// Render passes slower than this are logged at warn level
pub const SLOW_RENDER_MS: f64 = 500.0;

// ============================================================================
// Chart Geometry
// ============================================================================

/// Width of a full-size chart in pixels
pub const CHART_WIDTH: f64 = 960.0;

/// Height of a full-size chart in pixels
pub const CHART_HEIGHT: f64 = 480.0;

/// Width of the scatter charts in pixels
pub const SCATTER_WIDTH: f64 = 800.0;

/// Height of the scatter charts in pixels
pub const SCATTER_HEIGHT: f64 = 420.0;

/// Plot margins (top, right, bottom, left)
pub const CHART_MARGIN: (f64, f64, f64, f64) = (40.0, 110.0, 70.0, 80.0);

/// Marker radius for scatter and line charts
pub const MARKER_RADIUS: f64 = 3.5;

/// Marker opacity for the temperature scatter
pub const SCATTER_OPACITY: f64 = 0.6;

/// Maximum date tick labels on the daily chart
pub const MAX_DATE_TICKS: usize = 12;

// ============================================================================
// Page Text
// ============================================================================

/// Page title
pub const PAGE_TITLE: &str = "Bike-sharing Dashboard";

/// Introductory sentence under the title
pub const PAGE_INTRO: &str =
    "Trends in bike usage and how weather conditions affect the number of rentals.";

/// Closing sentence at the bottom of the page
pub const PAGE_OUTRO: &str =
    "A simple dashboard for analysing bike usage trends and the effect of weather on rentals.";

/// Footer caption
pub const PAGE_CAPTION: &str = "Copyright © wahyu160 2024";
