// ==========================================
// 工业物联网监控系统 - 告警评估引擎
// ==========================================
// 输入: 监控域读数表 + 阈值表
// 输出: 告警列表 (每实体只看最新读数)
// 规则: 数值类告警 value > threshold 触发 (OEE 为 < threshold)
// ==========================================

use crate::alert::thresholds::AlertThresholds;
use crate::domain::alert::Alert;
use crate::domain::environment::{WarehouseEnvironmentReading, ZoneEnvironmentReading};
use crate::domain::logistics::{ColdChainReading, InventoryReading, PackageIntegrityReading};
use crate::domain::machine::{MachineHealthReading, MachineStatusReading};
use crate::domain::production::LineOeeReading;
use crate::domain::reading::Reading;
use crate::domain::types::{AlertKind, MachineStatus, MonitorDomain, SealStatus};
use crate::engine::orchestrator::DatasetBundle;
use crate::query::latest::latest_per_entity;
use tracing::info;

// ==========================================
// AlertEvaluator - 告警评估引擎
// ==========================================
pub struct AlertEvaluator {
    thresholds: AlertThresholds,
}

impl AlertEvaluator {
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    /// 评估全部监控域
    pub fn evaluate_all(&self, bundle: &DatasetBundle) -> Vec<Alert> {
        let mut alerts = Vec::new();
        alerts.extend(self.evaluate_machine_health(&bundle.machine_health));
        alerts.extend(self.evaluate_machine_status(&bundle.machine_status));
        alerts.extend(self.evaluate_zone_environment(&bundle.zone_environment));
        alerts.extend(self.evaluate_line_oee(&bundle.line_oee));
        alerts.extend(self.evaluate_cold_chain(&bundle.cold_chain));
        alerts.extend(self.evaluate_warehouse_environment(&bundle.warehouse_environment));
        alerts.extend(self.evaluate_inventory(&bundle.inventory));
        alerts.extend(self.evaluate_package_integrity(&bundle.package_integrity));

        info!(
            alerts = alerts.len(),
            critical = alerts.iter().filter(|a| a.is_critical()).count(),
            "告警评估完成"
        );
        alerts
    }

    /// 按监控域评估
    pub fn evaluate_domain(&self, bundle: &DatasetBundle, domain: MonitorDomain) -> Vec<Alert> {
        match domain {
            MonitorDomain::MachineHealth => self.evaluate_machine_health(&bundle.machine_health),
            MonitorDomain::MachineStatus => self.evaluate_machine_status(&bundle.machine_status),
            MonitorDomain::ZoneEnvironment => {
                self.evaluate_zone_environment(&bundle.zone_environment)
            }
            MonitorDomain::LineOee => self.evaluate_line_oee(&bundle.line_oee),
            MonitorDomain::ColdChain => self.evaluate_cold_chain(&bundle.cold_chain),
            MonitorDomain::WarehouseEnvironment => {
                self.evaluate_warehouse_environment(&bundle.warehouse_environment)
            }
            MonitorDomain::Inventory => self.evaluate_inventory(&bundle.inventory),
            MonitorDomain::PackageIntegrity => {
                self.evaluate_package_integrity(&bundle.package_integrity)
            }
        }
    }

    // ==========================================
    // 各监控域
    // ==========================================

    pub fn evaluate_machine_health(&self, rows: &[MachineHealthReading]) -> Vec<Alert> {
        let mut alerts = Vec::new();
        for row in latest_per_entity(rows) {
            self.check_above(&mut alerts, &row, AlertKind::HighVibration, row.vibration_rms, "mm/s");
            self.check_above(&mut alerts, &row, AlertKind::HighTemperature, row.temperature_c, "°C");
            self.check_above(&mut alerts, &row, AlertKind::HighFailureRisk, row.failure_risk_score, "%");
        }
        alerts
    }

    pub fn evaluate_machine_status(&self, rows: &[MachineStatusReading]) -> Vec<Alert> {
        latest_per_entity(rows)
            .into_iter()
            .filter(|row| row.status == MachineStatus::Fault)
            .map(|row| {
                self.state_alert(
                    &row,
                    AlertKind::MachineFault,
                    Some(row.rpm),
                    format!("{} 处于故障状态 (转速 {:.0} rpm)", row.machine_id, row.rpm),
                )
            })
            .collect()
    }

    pub fn evaluate_zone_environment(&self, rows: &[ZoneEnvironmentReading]) -> Vec<Alert> {
        let mut alerts = Vec::new();
        for row in latest_per_entity(rows) {
            self.check_above(&mut alerts, &row, AlertKind::HighCo2, row.co2_ppm, "ppm");
            self.check_above(&mut alerts, &row, AlertKind::PoorAirQuality, row.aqi, "AQI");
            self.check_above(&mut alerts, &row, AlertKind::HighNoise, row.noise_db, "dB");
        }
        alerts
    }

    pub fn evaluate_line_oee(&self, rows: &[LineOeeReading]) -> Vec<Alert> {
        let kind = AlertKind::LowOee;
        let Some(threshold) = self.thresholds.threshold(kind) else {
            return Vec::new();
        };

        latest_per_entity(rows)
            .into_iter()
            .filter(|row| row.oee_percent < threshold)
            .map(|row| {
                Alert::new(
                    LineOeeReading::DOMAIN,
                    kind,
                    &row.line_id,
                    Some(row.oee_percent),
                    Some(threshold),
                    self.thresholds.severity(kind),
                    row.timestamp,
                    format!(
                        "{} OEE {:.1}% 低于阈值 {:.1}%",
                        row.line_id, row.oee_percent, threshold
                    ),
                )
            })
            .collect()
    }

    /// 冷链告警的 threshold 字段记录目标温度
    pub fn evaluate_cold_chain(&self, rows: &[ColdChainReading]) -> Vec<Alert> {
        let kind = AlertKind::TemperatureDeviation;
        let Some(max_deviation) = self.thresholds.threshold(kind) else {
            return Vec::new();
        };

        latest_per_entity(rows)
            .into_iter()
            .filter(|row| row.temp_deviation().abs() > max_deviation)
            .map(|row| {
                Alert::new(
                    ColdChainReading::DOMAIN,
                    kind,
                    &row.shipment_id,
                    Some(row.cold_storage_temp),
                    Some(row.target_temp),
                    self.thresholds.severity(kind),
                    row.timestamp,
                    format!(
                        "{} ({}) 温度 {:.1}°C 偏离目标 {:.1}°C 超过 {:.1}°C",
                        row.shipment_id,
                        row.truck_id,
                        row.cold_storage_temp,
                        row.target_temp,
                        max_deviation
                    ),
                )
            })
            .collect()
    }

    pub fn evaluate_warehouse_environment(
        &self,
        rows: &[WarehouseEnvironmentReading],
    ) -> Vec<Alert> {
        let mut alerts = Vec::new();
        for row in latest_per_entity(rows) {
            self.check_above(&mut alerts, &row, AlertKind::HighCo2, row.co2, "ppm");
            self.check_above(&mut alerts, &row, AlertKind::PoorAirQuality, row.aqi, "AQI");
        }
        alerts
    }

    /// 低库存按行内再订货点判定 (stock <= reorder_point)
    pub fn evaluate_inventory(&self, rows: &[InventoryReading]) -> Vec<Alert> {
        let kind = AlertKind::LowStock;
        latest_per_entity(rows)
            .into_iter()
            .filter(|row| row.is_below_reorder_point())
            .map(|row| {
                Alert::new(
                    InventoryReading::DOMAIN,
                    kind,
                    &row.sku_id,
                    Some(row.stock_level),
                    Some(row.reorder_point),
                    self.thresholds.severity(kind),
                    row.timestamp,
                    format!(
                        "{} @ {} 库存 {:.0} 不高于再订货点 {:.0}",
                        row.sku_id, row.warehouse_id, row.stock_level, row.reorder_point
                    ),
                )
            })
            .collect()
    }

    pub fn evaluate_package_integrity(&self, rows: &[PackageIntegrityReading]) -> Vec<Alert> {
        let mut alerts = Vec::new();
        for row in latest_per_entity(rows) {
            self.check_above(&mut alerts, &row, AlertKind::HighTilt, row.tilt_angle, "°");
            self.check_above(
                &mut alerts,
                &row,
                AlertKind::HighLightExposure,
                row.light_exposure_lux,
                "lux",
            );
            if row.seal_status == SealStatus::Broken {
                alerts.push(self.state_alert(
                    &row,
                    AlertKind::BrokenSeal,
                    None,
                    format!("{} 封条已破损", row.package_id),
                ));
            }
        }
        alerts
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// value > threshold 时追加告警
    fn check_above<R: Reading>(
        &self,
        alerts: &mut Vec<Alert>,
        row: &R,
        kind: AlertKind,
        value: f64,
        unit: &str,
    ) {
        let Some(threshold) = self.thresholds.threshold(kind) else {
            return;
        };
        if value <= threshold {
            return;
        }

        alerts.push(Alert::new(
            R::DOMAIN,
            kind,
            row.entity_id(),
            Some(value),
            Some(threshold),
            self.thresholds.severity(kind),
            row.timestamp(),
            format!(
                "{} {} {} {} 超过阈值 {}",
                row.entity_id(),
                kind.label(),
                value,
                unit,
                threshold
            ),
        ));
    }

    fn state_alert<R: Reading>(
        &self,
        row: &R,
        kind: AlertKind,
        value: Option<f64>,
        message: String,
    ) -> Alert {
        Alert::new(
            R::DOMAIN,
            kind,
            row.entity_id(),
            value,
            None,
            self.thresholds.severity(kind),
            row.timestamp(),
            message,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{HealthTier, Severity};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 9)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn health(id: &str, h: u32, vib: f64, temp: f64, risk: f64) -> MachineHealthReading {
        MachineHealthReading {
            timestamp: at(h),
            machine_id: id.to_string(),
            vibration_rms: vib,
            temperature_c: temp,
            runtime_hours: 100.0,
            failure_risk_score: risk,
            health_status: HealthTier::Good,
        }
    }

    #[test]
    fn test_only_latest_reading_counts() {
        let evaluator = AlertEvaluator::new(AlertThresholds::default());
        let rows = vec![
            health("Machine_01", 1, 14.0, 85.0, 90.0),
            health("Machine_01", 2, 5.0, 60.0, 20.0),
        ];
        assert!(evaluator.evaluate_machine_health(&rows).is_empty());
    }

    #[test]
    fn test_threshold_is_strict() {
        let evaluator = AlertEvaluator::new(AlertThresholds::default());
        let rows = vec![health("Machine_01", 1, 12.0, 80.0, 70.0)];
        assert!(evaluator.evaluate_machine_health(&rows).is_empty());

        let rows = vec![health("Machine_01", 1, 12.1, 80.1, 70.1)];
        let alerts = evaluator.evaluate_machine_health(&rows);
        assert_eq!(alerts.len(), 3);
        assert_eq!(alerts[0].kind, AlertKind::HighVibration);
        assert_eq!(alerts[0].severity, Severity::Warning);
        assert_eq!(alerts[1].severity, Severity::Critical);
        assert_eq!(alerts[2].threshold, Some(70.0));
    }

    #[test]
    fn test_cold_chain_records_target() {
        let evaluator = AlertEvaluator::new(AlertThresholds::default());
        let row = ColdChainReading {
            timestamp: at(3),
            shipment_id: "SHIP_1002".to_string(),
            truck_id: "TRUCK_003".to_string(),
            cargo_type: "Vaccines".to_string(),
            cold_storage_temp: 8.5,
            humidity: 70.0,
            gps_lat: 41.0,
            gps_lon: -87.0,
            door_status: crate::domain::types::DoorStatus::Closed,
            target_temp: 2.0,
            tolerance: 1.0,
        };
        let alerts = evaluator.evaluate_cold_chain(&[row]);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].value, Some(8.5));
        assert_eq!(alerts[0].threshold, Some(2.0));
        assert!(alerts[0].is_critical());
    }
}
