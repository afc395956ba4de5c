// ==========================================
// 工业物联网监控系统 - 监控域 KPI
// ==========================================
// 输入: 各实体最新读数 (已筛选)
// 输出: 均值/计数类指标，空输入时均值为 None
// ==========================================

use crate::domain::environment::{WarehouseEnvironmentReading, ZoneEnvironmentReading};
use crate::domain::logistics::{ColdChainReading, InventoryReading, PackageIntegrityReading};
use crate::domain::machine::{MachineHealthReading, MachineStatusReading};
use crate::domain::production::LineOeeReading;
use crate::domain::types::{DoorStatus, MachineStatus, SealStatus};
use crate::query::bands::{
    aqi_band, co2_band, failure_risk_band, noise_band, oee_band, package_risk_level,
    package_risk_score, temp_deviation_band, PackageRiskLevel, StatusBand,
};
use serde::Serialize;

/// 均值 (空输入返回 None)
pub fn mean_of<R, F>(rows: &[R], f: F) -> Option<f64>
where
    F: Fn(&R) -> f64,
{
    if rows.is_empty() {
        return None;
    }
    Some(rows.iter().map(f).sum::<f64>() / rows.len() as f64)
}

/// 均值的状态色带 (无均值时为 None)
fn band_of(mean: Option<f64>, band: fn(f64) -> StatusBand) -> Option<StatusBand> {
    mean.map(band)
}

fn count_where<R, F>(rows: &[R], f: F) -> usize
where
    F: Fn(&R) -> bool,
{
    rows.iter().filter(|r| f(r)).count()
}

// ==========================================
// 设备
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MachineHealthKpi {
    pub machines: usize,
    pub avg_vibration: Option<f64>,
    pub avg_temperature: Option<f64>,
    pub avg_failure_risk: Option<f64>,
    pub critical_machines: usize, // 风险分 > 70
    pub failure_risk_band: Option<StatusBand>,
}

impl MachineHealthKpi {
    pub fn from_latest(rows: &[MachineHealthReading]) -> Self {
        let avg_failure_risk = mean_of(rows, |r| r.failure_risk_score);
        Self {
            machines: rows.len(),
            avg_vibration: mean_of(rows, |r| r.vibration_rms),
            avg_temperature: mean_of(rows, |r| r.temperature_c),
            avg_failure_risk,
            critical_machines: count_where(rows, |r| {
                failure_risk_band(r.failure_risk_score) == StatusBand::Alert
            }),
            failure_risk_band: band_of(avg_failure_risk, failure_risk_band),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MachineStatusKpi {
    pub machines: usize,
    pub running: usize,
    pub stopped: usize,
    pub maintenance: usize,
    pub faults: usize,
    pub avg_running_rpm: Option<f64>,
    pub total_energy_kwh: f64,
}

impl MachineStatusKpi {
    pub fn from_latest(rows: &[MachineStatusReading]) -> Self {
        let running: Vec<&MachineStatusReading> = rows.iter().filter(|r| r.is_running()).collect();
        Self {
            machines: rows.len(),
            running: running.len(),
            stopped: count_where(rows, |r| r.status == MachineStatus::Stopped),
            maintenance: count_where(rows, |r| r.status == MachineStatus::Maintenance),
            faults: count_where(rows, |r| r.status == MachineStatus::Fault),
            avg_running_rpm: mean_of(&running, |r| r.rpm),
            total_energy_kwh: rows.iter().map(|r| r.energy_kwh).sum(),
        }
    }
}

// ==========================================
// 环境
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneEnvironmentKpi {
    pub zones: usize,
    pub avg_temperature: Option<f64>,
    pub avg_humidity: Option<f64>,
    pub avg_co2: Option<f64>,
    pub avg_aqi: Option<f64>,
    pub avg_noise: Option<f64>,

    // ===== 均值色带 =====
    pub co2_band: Option<StatusBand>,
    pub aqi_band: Option<StatusBand>,
    pub noise_band: Option<StatusBand>,
}

impl ZoneEnvironmentKpi {
    pub fn from_latest(rows: &[ZoneEnvironmentReading]) -> Self {
        let avg_co2 = mean_of(rows, |r| r.co2_ppm);
        let avg_aqi = mean_of(rows, |r| r.aqi);
        let avg_noise = mean_of(rows, |r| r.noise_db);
        Self {
            zones: rows.len(),
            avg_temperature: mean_of(rows, |r| r.temperature_c),
            avg_humidity: mean_of(rows, |r| r.humidity_percent),
            avg_co2,
            avg_aqi,
            avg_noise,
            co2_band: band_of(avg_co2, co2_band),
            aqi_band: band_of(avg_aqi, aqi_band),
            noise_band: band_of(avg_noise, noise_band),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarehouseEnvironmentKpi {
    pub warehouses: usize,
    pub avg_temp: Option<f64>,
    pub avg_humidity: Option<f64>,
    pub avg_co2: Option<f64>,
    pub avg_aqi: Option<f64>,
    pub co2_band: Option<StatusBand>,
    pub aqi_band: Option<StatusBand>,
}

impl WarehouseEnvironmentKpi {
    pub fn from_latest(rows: &[WarehouseEnvironmentReading]) -> Self {
        let avg_co2 = mean_of(rows, |r| r.co2);
        let avg_aqi = mean_of(rows, |r| r.aqi);
        Self {
            warehouses: rows.len(),
            avg_temp: mean_of(rows, |r| r.temp),
            avg_humidity: mean_of(rows, |r| r.humidity),
            avg_co2,
            avg_aqi,
            co2_band: band_of(avg_co2, co2_band),
            aqi_band: band_of(avg_aqi, aqi_band),
        }
    }
}

// ==========================================
// 生产
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineOeeKpi {
    pub lines: usize,
    pub avg_oee: Option<f64>,
    pub avg_availability: Option<f64>,
    pub avg_performance: Option<f64>,
    pub avg_quality: Option<f64>,
    pub lines_on_target: usize, // OEE >= 80
    pub oee_band: Option<StatusBand>,
}

impl LineOeeKpi {
    pub fn from_latest(rows: &[LineOeeReading]) -> Self {
        let avg_oee = mean_of(rows, |r| r.oee_percent);
        Self {
            lines: rows.len(),
            avg_oee,
            avg_availability: mean_of(rows, |r| r.availability_percent),
            avg_performance: mean_of(rows, |r| r.performance_percent),
            avg_quality: mean_of(rows, |r| r.quality_percent),
            lines_on_target: count_where(rows, |r| oee_band(r.oee_percent) == StatusBand::Normal),
            oee_band: band_of(avg_oee, oee_band),
        }
    }
}

// ==========================================
// 物流
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColdChainKpi {
    pub shipments: usize,
    pub avg_temperature: Option<f64>,
    pub avg_abs_deviation: Option<f64>,
    pub out_of_tolerance: usize, // |偏差| > 货品允许范围
    pub temp_violations: usize,  // |偏差| > 5°C (红色带)
    pub doors_open: usize,
}

impl ColdChainKpi {
    pub fn from_latest(rows: &[ColdChainReading]) -> Self {
        Self {
            shipments: rows.len(),
            avg_temperature: mean_of(rows, |r| r.cold_storage_temp),
            avg_abs_deviation: mean_of(rows, |r| r.temp_deviation().abs()),
            out_of_tolerance: count_where(rows, |r| r.temp_deviation().abs() > r.tolerance),
            temp_violations: count_where(rows, |r| {
                temp_deviation_band(r.temp_deviation()) == StatusBand::Alert
            }),
            doors_open: count_where(rows, |r| r.door_status == DoorStatus::Open),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryKpi {
    pub skus: usize,
    pub total_stock: f64,
    pub low_stock_items: usize,
    pub restocks_scheduled: usize,
}

impl InventoryKpi {
    pub fn from_latest(rows: &[InventoryReading]) -> Self {
        Self {
            skus: rows.len(),
            total_stock: rows.iter().map(|r| r.stock_level).sum(),
            low_stock_items: count_where(rows, |r| r.is_below_reorder_point()),
            restocks_scheduled: count_where(rows, |r| r.restock_eta_hours.is_some()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageIntegrityKpi {
    pub packages: usize,
    pub high_tilt: usize,
    pub high_light: usize,
    pub broken_seals: usize,
    pub avg_risk_score: Option<f64>,

    // ===== 风险等级分布 =====
    pub low_risk: usize,
    pub medium_risk: usize,
    pub high_risk: usize,
}

impl PackageIntegrityKpi {
    pub fn from_latest(rows: &[PackageIntegrityReading]) -> Self {
        let level_count = |level: PackageRiskLevel| {
            count_where(rows, |r| package_risk_level(package_risk_score(r)) == level)
        };
        Self {
            packages: rows.len(),
            high_tilt: count_where(rows, |r| r.tilt_angle > 45.0),
            high_light: count_where(rows, |r| r.light_exposure_lux > 1000.0),
            broken_seals: count_where(rows, |r| r.seal_status == SealStatus::Broken),
            avg_risk_score: mean_of(rows, |r| package_risk_score(r) as f64),
            low_risk: level_count(PackageRiskLevel::Low),
            medium_risk: level_count(PackageRiskLevel::Medium),
            high_risk: level_count(PackageRiskLevel::High),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_mean_of_empty_is_none() {
        let rows: Vec<f64> = Vec::new();
        assert_eq!(mean_of(&rows, |v| *v), None);
        assert_eq!(mean_of(&[1.0, 2.0, 6.0], |v| *v), Some(3.0));
    }

    #[test]
    fn test_machine_status_kpi() {
        let ts = NaiveDate::from_ymd_opt(2026, 3, 9)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let row = |id: &str, rpm: f64, energy: f64, status: MachineStatus| MachineStatusReading {
            timestamp: ts,
            machine_id: id.to_string(),
            rpm,
            energy_kwh: energy,
            status,
        };
        let rows = vec![
            row("Machine_01", 1500.0, 20.0, MachineStatus::Running),
            row("Machine_02", 1300.0, 18.0, MachineStatus::Running),
            row("Machine_03", 200.0, 10.0, MachineStatus::Fault),
            row("Machine_04", 0.0, 1.0, MachineStatus::Stopped),
        ];
        let kpi = MachineStatusKpi::from_latest(&rows);
        assert_eq!(kpi.running, 2);
        assert_eq!(kpi.faults, 1);
        assert_eq!(kpi.avg_running_rpm, Some(1400.0));
        assert_eq!(kpi.total_energy_kwh, 49.0);
    }

    #[test]
    fn test_empty_kpis_do_not_produce_nan() {
        let kpi = MachineStatusKpi::from_latest(&[]);
        assert_eq!(kpi.avg_running_rpm, None);
        assert_eq!(kpi.total_energy_kwh, 0.0);
        assert_eq!(ZoneEnvironmentKpi::from_latest(&[]).avg_co2, None);
        assert_eq!(ZoneEnvironmentKpi::from_latest(&[]).co2_band, None);
        assert_eq!(LineOeeKpi::from_latest(&[]).oee_band, None);
    }

    #[test]
    fn test_cold_chain_violations_vs_tolerance() {
        let ts = NaiveDate::from_ymd_opt(2026, 3, 9)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let row = |id: &str, temp: f64| ColdChainReading {
            timestamp: ts,
            shipment_id: id.to_string(),
            truck_id: "TRUCK_001".to_string(),
            cargo_type: "Vaccines".to_string(),
            cold_storage_temp: temp,
            humidity: 50.0,
            gps_lat: 0.0,
            gps_lon: 0.0,
            door_status: DoorStatus::Closed,
            target_temp: 4.0,
            tolerance: 2.0,
        };
        // 偏差 1 / 3 / 6 / 5 (恰为 5 不计入)
        let rows = vec![
            row("SHP_1", 5.0),
            row("SHP_2", 7.0),
            row("SHP_3", -2.0),
            row("SHP_4", 9.0),
        ];
        let kpi = ColdChainKpi::from_latest(&rows);
        assert_eq!(kpi.out_of_tolerance, 3);
        assert_eq!(kpi.temp_violations, 1);
    }

    #[test]
    fn test_band_fields_follow_averages() {
        let ts = NaiveDate::from_ymd_opt(2026, 3, 9)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let line = |id: &str, oee: f64| LineOeeReading {
            timestamp: ts,
            line_id: id.to_string(),
            product_type: crate::domain::types::ProductType::Electronics,
            availability_percent: 90.0,
            performance_percent: 90.0,
            quality_percent: 90.0,
            oee_percent: oee,
        };
        let kpi = LineOeeKpi::from_latest(&[line("Line_A", 90.0), line("Line_B", 50.0)]);
        assert_eq!(kpi.avg_oee, Some(70.0));
        assert_eq!(kpi.oee_band, Some(StatusBand::Caution));
        assert_eq!(kpi.lines_on_target, 1);

        let pkg = |id: &str, tilt: f64, seal: SealStatus| PackageIntegrityReading {
            timestamp: ts,
            package_id: id.to_string(),
            tilt_angle: tilt,
            light_exposure_lux: 100.0,
            seal_status: seal,
        };
        let kpi = PackageIntegrityKpi::from_latest(&[
            pkg("PKG_500000", 5.0, SealStatus::Intact),
            pkg("PKG_500001", 60.0, SealStatus::Intact),
            pkg("PKG_500002", 60.0, SealStatus::Broken),
        ]);
        assert_eq!((kpi.low_risk, kpi.medium_risk, kpi.high_risk), (1, 1, 1));
    }
}
