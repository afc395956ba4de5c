// ==========================================
// 遥测生成器集成测试
// ==========================================
// 测试目标: 取值范围 / 网格长度 / 可复现性 / OEE 一致性
// ==========================================


use std::collections::BTreeSet;

use chrono::{Duration, NaiveDateTime};
use iiot_monitor::domain::{MonitorDomain, Reading};
use iiot_monitor::engine::DatasetProfile;
use test_helpers::{fixed_end_time, generate_bundle, lite_bundle};

fn distinct<R: Reading>(rows: &[R]) -> usize {
    rows.iter()
        .map(|r| r.entity_id().to_string())
        .collect::<BTreeSet<_>>()
        .len()
}

#[test]
fn test_numeric_fields_stay_within_bounds() {
    let bundle = generate_bundle(DatasetProfile::Standard, 11);

    for r in &bundle.machine_health {
        assert!(r.vibration_rms >= 0.0, "vibration < 0: {:?}", r);
        assert!((0.0..=100.0).contains(&r.failure_risk_score), "risk: {:?}", r);
    }
    for r in &bundle.machine_status {
        assert!(r.rpm >= 0.0 && r.energy_kwh >= 0.0, "status: {:?}", r);
    }
    for r in &bundle.zone_environment {
        assert!((30.0..=85.0).contains(&r.humidity_percent), "zone: {:?}", r);
        assert!(r.co2_ppm >= 400.0 && r.aqi >= 0.0 && r.noise_db >= 0.0);
    }
    for r in &bundle.line_oee {
        for v in [
            r.availability_percent,
            r.performance_percent,
            r.quality_percent,
            r.oee_percent,
        ] {
            assert!((0.0..=100.0).contains(&v), "oee: {:?}", r);
        }
    }
    for r in &bundle.cold_chain {
        assert!((40.0..=95.0).contains(&r.humidity), "cold chain: {:?}", r);
    }
    for r in &bundle.warehouse_environment {
        assert!((30.0..=80.0).contains(&r.humidity), "warehouse: {:?}", r);
        assert!(r.co2 >= 0.0 && r.aqi >= 0.0);
    }
    for r in &bundle.inventory {
        assert!(r.stock_level >= 0.0, "inventory: {:?}", r);
    }
    for r in &bundle.package_integrity {
        assert!(r.tilt_angle >= 0.0 && r.light_exposure_lux >= 0.0, "package: {:?}", r);
    }
}

#[test]
fn test_oee_is_product_of_components() {
    let bundle = lite_bundle();
    for r in &bundle.line_oee {
        let expected =
            r.availability_percent * r.performance_percent * r.quality_percent / 10_000.0;
        assert!(
            (r.oee_percent - expected).abs() < 0.5,
            "OEE {} vs A*P*Q {}",
            r.oee_percent,
            expected
        );
    }
}

#[test]
fn test_full_profile_grid_lengths() {
    let bundle = generate_bundle(DatasetProfile::Full, 42);

    // 7 天 = 10080 分钟
    assert_eq!(bundle.machine_health.len(), 10 * (10080 / 12 + 1));
    assert_eq!(bundle.machine_status.len(), 10 * (10080 / 10 + 1));
    assert_eq!(bundle.zone_environment.len(), 7 * (10080 / 15 + 1));
    assert_eq!(bundle.line_oee.len(), 5 * (10080 / 30 + 1));
    assert_eq!(bundle.warehouse_environment.len(), 5 * (10080 / 15 + 1));
    assert_eq!(bundle.inventory.len(), 25 * (10080 / 60 + 1));
    assert_eq!(bundle.package_integrity.len(), 50 * (10080 / 30 + 1));
    assert_eq!(bundle.cold_chain.len(), 10 * (10080 / 20 + 1));
}

#[test]
fn test_entity_counts_follow_profile() {
    let bundle = lite_bundle();
    assert_eq!(distinct(&bundle.machine_health), 10);
    assert_eq!(distinct(&bundle.zone_environment), 7);
    assert_eq!(distinct(&bundle.line_oee), 5);
    assert_eq!(distinct(&bundle.warehouse_environment), 5);
    assert_eq!(distinct(&bundle.inventory), 10);
    assert_eq!(distinct(&bundle.package_integrity), 20);
    assert_eq!(distinct(&bundle.cold_chain), 5);
}

#[test]
fn test_timestamps_inside_window() {
    let bundle = lite_bundle();
    let end = fixed_end_time();
    let start = end - Duration::days(1);

    let in_window = |ts: NaiveDateTime| ts >= start && ts <= end;
    assert!(bundle.machine_health.iter().all(|r| in_window(r.timestamp)));
    assert!(bundle.inventory.iter().all(|r| in_window(r.timestamp)));
    assert!(bundle.cold_chain.iter().all(|r| in_window(r.timestamp)));
    assert_eq!(
        bundle.machine_status.iter().map(|r| r.timestamp).max(),
        Some(end)
    );
}

#[test]
fn test_same_seed_reproduces_bundle() {
    let a = generate_bundle(DatasetProfile::Lite, 2024);
    let b = generate_bundle(DatasetProfile::Lite, 2024);

    assert_eq!(a.machine_status, b.machine_status);
    assert_eq!(a.zone_environment, b.zone_environment);
    assert_eq!(a.line_oee, b.line_oee);
    assert_eq!(a.warehouse_environment, b.warehouse_environment);
    assert_eq!(a.package_integrity, b.package_integrity);
}

#[test]
fn test_different_seed_changes_bundle() {
    let a = generate_bundle(DatasetProfile::Lite, 1);
    let b = generate_bundle(DatasetProfile::Lite, 2);
    assert_ne!(a.machine_health, b.machine_health);
    assert_eq!(
        a.row_count(MonitorDomain::MachineHealth),
        b.row_count(MonitorDomain::MachineHealth)
    );
}
