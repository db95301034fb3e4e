use crate::catalog::Unit;
use crate::engine::metrics::{compute, MetricsError};
use crate::volume::VolumeFacts;

fn unit(configured_size: u64, allocatable_whitespace: u64) -> Unit {
    Unit {
        id: 1,
        name: "db01".to_string(),
        host: "dbhost1".to_string(),
        storage_path: "/data/db01.mdf".to_string(),
        configured_size,
        allocatable_whitespace,
        excluded: false,
        exclusion_reason: None,
        updated_at: None,
    }
}

#[test]
fn total_free_pct_rounds_half_away_from_zero() {
    // 995 / 2000 = 49.75% -> 50%, not 49%.
    let m = compute(&unit(100, 0), &VolumeFacts { total_capacity: 2000, remaining_free: 995 })
        .unwrap();
    assert_eq!(m.total_free_pct, 50, "49.75% must round up to 50%");

    // 989 / 2000 = 49.45% -> 49%.
    let m = compute(&unit(100, 0), &VolumeFacts { total_capacity: 2000, remaining_free: 989 })
        .unwrap();
    assert_eq!(m.total_free_pct, 49, "49.45% must round down to 49%");

    // Exact half: 49.5% -> 50% (away from zero, not banker's rounding).
    let m = compute(&unit(100, 0), &VolumeFacts { total_capacity: 1000, remaining_free: 495 })
        .unwrap();
    assert_eq!(m.total_free_pct, 50, "49.5% must round away from zero to 50%");
}

#[test]
fn whitespace_counts_toward_total_free() {
    let m = compute(&unit(1000, 100), &VolumeFacts { total_capacity: 1000, remaining_free: 150 })
        .unwrap();
    assert_eq!(m.disk_free_pct, 15, "disk free alone is 15%");
    assert_eq!(m.whitespace_pct, 10, "whitespace is 10% of the unit size");
    assert_eq!(m.total_free_pct, 25, "total free combines both against capacity");
}

#[test]
fn percentages_are_not_clamped() {
    // Whitespace far exceeding volume capacity: mis-provisioned but reportable.
    let m = compute(&unit(10_000, 2000), &VolumeFacts { total_capacity: 1000, remaining_free: 500 })
        .unwrap();
    assert_eq!(m.total_free_pct, 250, "2500/1000 must stay 250%, unclamped");
}

#[test]
fn zero_configured_size_is_rejected() {
    let err = compute(&unit(0, 0), &VolumeFacts { total_capacity: 1000, remaining_free: 500 })
        .unwrap_err();
    assert_eq!(err, MetricsError::ZeroConfiguredSize, "zero-size unit must be skipped");
}

#[test]
fn zero_capacity_is_rejected() {
    let err =
        compute(&unit(1000, 0), &VolumeFacts { total_capacity: 0, remaining_free: 0 }).unwrap_err();
    assert_eq!(err, MetricsError::ZeroCapacity, "zero-capacity volume must be skipped");
}

#[test]
fn gigabytes_use_binary_units_with_one_decimal() {
    const GIB: u64 = 1_073_741_824;

    let m = compute(
        &unit(3 * GIB / 2, 0),
        &VolumeFacts { total_capacity: 4 * GIB, remaining_free: GIB / 4 },
    )
    .unwrap();
    assert!((m.size_gb - 1.5).abs() < f64::EPSILON, "1.5 GiB reports as 1.5");
    // 0.25 GiB -> 2.5 tenths -> ties away from zero -> 0.3.
    assert!((m.disk_free_gb - 0.3).abs() < f64::EPSILON, "0.25 GiB rounds to 0.3");
}

#[test]
fn metrics_are_deterministic() {
    let u = unit(5000, 250);
    let facts = VolumeFacts { total_capacity: 9000, remaining_free: 1234 };
    let a = compute(&u, &facts).unwrap();
    let b = compute(&u, &facts).unwrap();
    assert_eq!(a, b, "identical inputs must produce identical metrics");
}
