// ==========================================
// 工业物联网监控系统 - 设备运行状态数据生成
// ==========================================
// 采样间隔: 10 分钟
// 规则: 按日历决定运行概率，运行中按小概率转为维护/故障
// ==========================================

use crate::domain::catalog::machine_ids;
use crate::domain::machine::MachineStatusReading;
use crate::domain::reading::round_to;
use crate::domain::types::MachineStatus;
use crate::engine::sampler::Sampler;
use crate::engine::series::SeriesGenerator;
use crate::engine::timeline::{hour_of, is_operating_hour, is_weekday, TimeGrid};
use chrono::NaiveDateTime;
use std::f64::consts::PI;

const MAINTENANCE_PROBABILITY: f64 = 0.02;
const FAULT_PROBABILITY: f64 = 0.005;

pub struct MachineStatusGenerator {
    machine_ids: Vec<String>,
}

impl MachineStatusGenerator {
    pub fn new() -> Self {
        Self {
            machine_ids: machine_ids(),
        }
    }

    /// 运行概率: 工作日运营时段 0.95 / 工作日其他时段 0.10 / 周末 0.30
    pub fn running_probability(ts: NaiveDateTime) -> f64 {
        match (is_weekday(ts), is_operating_hour(ts)) {
            (true, true) => 0.95,
            (true, false) => 0.10,
            (false, _) => 0.30,
        }
    }

    fn sample(&self, ts: NaiveDateTime, sampler: &mut Sampler) -> (MachineStatus, f64, f64) {
        if !sampler.chance(Self::running_probability(ts)) {
            return (MachineStatus::Stopped, 0.0, sampler.uniform(0.5, 2.0));
        }

        let rpm =
            sampler.uniform(1200.0, 1800.0) + (hour_of(ts) as f64 * PI / 12.0).sin() * 100.0;
        let energy = sampler.uniform(15.0, 25.0) + sampler.normal(0.0, 2.0);

        if sampler.chance(MAINTENANCE_PROBABILITY) {
            (MachineStatus::Maintenance, 0.0, sampler.uniform(1.0, 3.0))
        } else if sampler.chance(FAULT_PROBABILITY) {
            (
                MachineStatus::Fault,
                sampler.uniform(0.0, 500.0),
                sampler.uniform(5.0, 15.0),
            )
        } else {
            (MachineStatus::Running, rpm, energy)
        }
    }
}

impl Default for MachineStatusGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesGenerator for MachineStatusGenerator {
    type Row = MachineStatusReading;
    const STEP_MINUTES: i64 = 10;

    fn generate(&self, grid: &TimeGrid, sampler: &mut Sampler) -> Vec<MachineStatusReading> {
        let timestamps = grid.timestamps();
        let mut rows = Vec::with_capacity(self.machine_ids.len() * timestamps.len());

        for machine_id in &self.machine_ids {
            for ts in &timestamps {
                let (status, rpm, energy) = self.sample(*ts, sampler);
                rows.push(MachineStatusReading {
                    timestamp: *ts,
                    machine_id: machine_id.clone(),
                    rpm: round_to(rpm.max(MachineStatusReading::MIN_RPM), 0),
                    energy_kwh: round_to(energy.max(MachineStatusReading::MIN_ENERGY_KWH), 2),
                    status,
                });
            }
        }

        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_running_probability_calendar() {
        assert_eq!(MachineStatusGenerator::running_probability(at(9, 10)), 0.95);
        assert_eq!(MachineStatusGenerator::running_probability(at(9, 2)), 0.10);
        assert_eq!(MachineStatusGenerator::running_probability(at(7, 10)), 0.30);
    }

    #[test]
    fn test_stopped_rows_have_zero_rpm() {
        let grid = TimeGrid::trailing(at(9, 12), 2, MachineStatusGenerator::STEP_MINUTES).unwrap();
        let rows = MachineStatusGenerator::new().generate(&grid, &mut Sampler::from_seed(21));
        assert_eq!(rows.len(), 10 * grid.len());
        for row in &rows {
            assert!(row.rpm >= 0.0);
            assert!(row.energy_kwh >= 0.0);
            match row.status {
                MachineStatus::Stopped | MachineStatus::Maintenance => assert_eq!(row.rpm, 0.0),
                MachineStatus::Fault => assert!(row.rpm <= 500.0),
                MachineStatus::Running => assert!(row.rpm >= 1100.0),
            }
        }
    }
}
