// ==========================================
// 告警评估引擎集成测试
// ==========================================
// 测试目标: 告警当且仅当最新读数越过阈值时触发
// ==========================================


use chrono::{Duration, NaiveDateTime};
use iiot_monitor::alert::{AlertEvaluator, AlertSummary, AlertThresholds};
use iiot_monitor::domain::types::{HealthTier, SealStatus};
use iiot_monitor::domain::{
    AlertKind, InventoryReading, MachineHealthReading, MonitorDomain, PackageIntegrityReading,
    Severity,
};
use iiot_monitor::query::latest_per_entity;
use test_helpers::{fixed_end_time, lite_bundle};

fn health(machine: &str, ts: NaiveDateTime, vibration: f64, temp: f64, risk: f64) -> MachineHealthReading {
    MachineHealthReading {
        timestamp: ts,
        machine_id: machine.to_string(),
        vibration_rms: vibration,
        temperature_c: temp,
        runtime_hours: 1000.0,
        failure_risk_score: risk,
        health_status: HealthTier::Good,
    }
}

fn package(id: &str, ts: NaiveDateTime, tilt: f64, light: f64, seal: SealStatus) -> PackageIntegrityReading {
    PackageIntegrityReading {
        timestamp: ts,
        package_id: id.to_string(),
        tilt_angle: tilt,
        light_exposure_lux: light,
        seal_status: seal,
    }
}

#[test]
fn test_only_latest_reading_counts() {
    let end = fixed_end_time();
    let earlier = end - Duration::hours(1);
    let rows = vec![
        // 早先越限，最新正常 → 不告警
        health("Machine_01", earlier, 20.0, 95.0, 90.0),
        health("Machine_01", end, 3.0, 60.0, 10.0),
        // 早先正常，最新越限 → 告警
        health("Machine_02", earlier, 3.0, 60.0, 10.0),
        health("Machine_02", end, 12.5, 60.0, 10.0),
    ];

    let evaluator = AlertEvaluator::new(AlertThresholds::default());
    let alerts = evaluator.evaluate_machine_health(&rows);

    assert_eq!(alerts.len(), 1);
    let alert = &alerts[0];
    assert_eq!(alert.entity_id, "Machine_02");
    assert_eq!(alert.kind, AlertKind::HighVibration);
    assert_eq!(alert.domain, MonitorDomain::MachineHealth);
    assert_eq!(alert.value, Some(12.5));
    assert_eq!(alert.threshold, Some(12.0));
    assert_eq!(alert.severity, Severity::Warning);
    assert_eq!(alert.observed_at, end);
}

#[test]
fn test_threshold_is_strict() {
    let end = fixed_end_time();
    let rows = vec![
        health("Machine_01", end, 12.0, 80.0, 70.0),
        health("Machine_02", end, 12.01, 80.01, 70.01),
    ];

    let alerts = AlertEvaluator::new(AlertThresholds::default()).evaluate_machine_health(&rows);
    assert_eq!(alerts.len(), 3);
    assert!(alerts.iter().all(|a| a.entity_id == "Machine_02"));

    let critical = alerts.iter().filter(|a| a.is_critical()).count();
    // 温度与故障风险为严重级别
    assert_eq!(critical, 2);
}

#[test]
fn test_package_alerts() {
    let end = fixed_end_time();
    let rows = vec![
        package("PKG_500000", end, 50.0, 100.0, SealStatus::Intact),
        package("PKG_500001", end, 5.0, 1500.0, SealStatus::Broken),
        package("PKG_500002", end, 5.0, 100.0, SealStatus::Intact),
    ];

    let alerts = AlertEvaluator::new(AlertThresholds::default()).evaluate_package_integrity(&rows);
    let kinds: Vec<_> = alerts.iter().map(|a| (a.entity_id.as_str(), a.kind)).collect();

    assert_eq!(alerts.len(), 3);
    assert!(kinds.contains(&("PKG_500000", AlertKind::HighTilt)));
    assert!(kinds.contains(&("PKG_500001", AlertKind::HighLightExposure)));
    assert!(kinds.contains(&("PKG_500001", AlertKind::BrokenSeal)));

    let seal = alerts
        .iter()
        .find(|a| a.kind == AlertKind::BrokenSeal)
        .unwrap();
    assert_eq!(seal.value, None);
    assert_eq!(seal.severity, Severity::Critical);
}

#[test]
fn test_low_stock_uses_row_reorder_point() {
    let end = fixed_end_time();
    let row = |sku: &str, stock: f64, reorder: f64| InventoryReading {
        timestamp: end,
        sku_id: sku.to_string(),
        warehouse_id: "WH_001".to_string(),
        stock_level: stock,
        reorder_point: reorder,
        restock_eta_hours: None,
    };
    let rows = vec![row("SKU_2000", 100.0, 100.0), row("SKU_2001", 101.0, 100.0)];

    let alerts = AlertEvaluator::new(AlertThresholds::default()).evaluate_inventory(&rows);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].entity_id, "SKU_2000");
    assert_eq!(alerts[0].threshold, Some(100.0));
}

#[test]
fn test_alerts_match_latest_rows_of_generated_data() {
    let bundle = lite_bundle();
    let thresholds = AlertThresholds::default();
    let evaluator = AlertEvaluator::new(thresholds.clone());

    let alerts = evaluator.evaluate_machine_health(&bundle.machine_health);
    let latest = latest_per_entity(&bundle.machine_health);
    let limit = thresholds.threshold(AlertKind::HighFailureRisk).unwrap();

    for row in &latest {
        let fired = alerts
            .iter()
            .any(|a| a.entity_id == row.machine_id && a.kind == AlertKind::HighFailureRisk);
        assert_eq!(fired, row.failure_risk_score > limit, "row: {:?}", row);
    }

    let alerts = evaluator.evaluate_inventory(&bundle.inventory);
    for row in latest_per_entity(&bundle.inventory) {
        let fired = alerts.iter().any(|a| a.entity_id == row.sku_id);
        assert_eq!(fired, row.stock_level <= row.reorder_point, "row: {:?}", row);
    }
}

#[test]
fn test_threshold_override_changes_outcome() {
    let end = fixed_end_time();
    let rows = vec![health("Machine_01", end, 5.0, 60.0, 10.0)];

    let default_alerts =
        AlertEvaluator::new(AlertThresholds::default()).evaluate_machine_health(&rows);
    assert!(default_alerts.is_empty());

    let mut thresholds = AlertThresholds::default();
    assert!(thresholds.set_threshold(AlertKind::HighVibration, 4.0));
    thresholds.set_severity(AlertKind::HighVibration, Severity::Critical);
    let alerts = AlertEvaluator::new(thresholds).evaluate_machine_health(&rows);

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, Severity::Critical);
    assert_eq!(alerts[0].threshold, Some(4.0));
}

#[test]
fn test_summary_totals_are_consistent() {
    let bundle = lite_bundle();
    let alerts = AlertEvaluator::new(AlertThresholds::default()).evaluate_all(&bundle);
    let summary = AlertSummary::from_alerts(&alerts);

    assert_eq!(summary.total, alerts.len());
    assert_eq!(summary.critical() + summary.warning(), summary.total);
    let per_domain: usize = MonitorDomain::ALL.iter().map(|d| summary.count_for(*d)).sum();
    assert_eq!(per_domain, summary.total);
}

#[test]
fn test_alert_ids_are_unique() {
    let bundle = lite_bundle();
    let alerts = AlertEvaluator::new(AlertThresholds::default()).evaluate_all(&bundle);
    let mut ids: Vec<_> = alerts.iter().map(|a| a.alert_id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), alerts.len());
}
