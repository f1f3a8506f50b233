//! Snapshot tests using the insta crate.
//!
//! Serialized views are what `/api/report` returns, so their JSON shape is
//! pinned here. To update after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use crate::helpers::{date, two_day_builder};
use bikeboard::data::{daily_total, filter_by_date};
use bikeboard::settings::DashboardSettings;
use bikeboard::types::{ClusterPoint, DateRange};

#[test]
fn snapshot_daily_totals() {
    let ds = two_day_builder().build();
    insta::assert_json_snapshot!(daily_total(&ds), @r###"
    [
      {
        "date": "2011-01-01",
        "total": 88
      },
      {
        "date": "2011-01-02",
        "total": 34
      }
    ]
    "###);
}

#[test]
fn snapshot_filtered_row() {
    let ds = two_day_builder().build();
    let rows = filter_by_date(&ds, date("2011-01-02"));
    insta::assert_json_snapshot!(rows[0], @r###"
    {
      "date": "2011-01-02",
      "hour": 0,
      "weekday": 0,
      "temperature": 0.46,
      "humidity": 0.88,
      "count": 17
    }
    "###);
}

#[test]
fn snapshot_date_range() {
    let range = DateRange {
        start: date("2011-01-01"),
        end: date("2012-12-31"),
    };
    insta::assert_json_snapshot!(range, @r###"
    {
      "start": "2011-01-01",
      "end": "2012-12-31"
    }
    "###);
}

#[test]
fn snapshot_cluster_point() {
    let point = ClusterPoint {
        hour: 17,
        weekday: 3,
        cluster: 2,
    };
    insta::assert_json_snapshot!(point, @r###"
    {
      "hour": 17,
      "weekday": 3,
      "cluster": 2
    }
    "###);
}

#[test]
fn snapshot_default_settings() {
    insta::assert_json_snapshot!(DashboardSettings::default(), @r###"
    {
      "data_path": "all_data.csv",
      "bind_addr": "127.0.0.1:8501",
      "clusters": 3,
      "seed": null,
      "log_level": "info",
      "output": null
    }
    "###);
}
