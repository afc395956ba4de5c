// ==========================================
// 工业物联网监控系统 - 预测性维护数据生成
// ==========================================
// 采样间隔: 12 分钟
// 规则: 基线由健康等级决定，运营时段放大，超阈值推高风险分
// ==========================================

use crate::domain::catalog::{machine_profiles, MachineProfile};
use crate::domain::machine::MachineHealthReading;
use crate::domain::reading::round_to;
use crate::domain::types::HealthTier;
use crate::engine::sampler::Sampler;
use crate::engine::series::SeriesGenerator;
use crate::engine::timeline::{hour_of, TimeGrid};
use std::f64::consts::PI;

/// 振动风险拐点 (mm/s)
const VIBRATION_RISK_KNEE: f64 = 12.0;
/// 温度风险拐点 (°C)
const TEMPERATURE_RISK_KNEE: f64 = 80.0;
/// 每采样步累计运行小时
const RUNTIME_STEP_HOURS: f64 = 0.2;

pub struct MachineHealthGenerator {
    profiles: Vec<MachineProfile>,
}

impl MachineHealthGenerator {
    pub fn new() -> Self {
        Self {
            profiles: machine_profiles(),
        }
    }

    /// 健康等级对应的基线区间: (振动, 温度, 风险分)
    fn baseline_ranges(tier: HealthTier) -> [(f64, f64); 3] {
        match tier {
            HealthTier::Excellent => [(2.0, 6.0), (45.0, 65.0), (5.0, 15.0)],
            HealthTier::Good => [(4.0, 8.0), (50.0, 70.0), (15.0, 30.0)],
            HealthTier::Warning => [(6.0, 11.0), (60.0, 78.0), (30.0, 55.0)],
            HealthTier::Critical => [(9.0, 15.0), (70.0, 85.0), (55.0, 85.0)],
        }
    }

    /// 运营系数: 6-22 点按正弦放大，其余时段 0.3
    pub fn operational_factor(hour: u32) -> f64 {
        if (6..=22).contains(&hour) {
            1.0 + 0.2 * (PI * (hour as f64 - 6.0) / 16.0).sin()
        } else {
            0.3
        }
    }

    /// 风险分 = 基线 + 振动超限 * 5 + 温度超限 * 3，截断到 [0, 100]
    pub fn failure_risk(base_risk: f64, vibration: f64, temperature: f64) -> f64 {
        let mut risk = base_risk;
        if vibration > VIBRATION_RISK_KNEE {
            risk += (vibration - VIBRATION_RISK_KNEE) * 5.0;
        }
        if temperature > TEMPERATURE_RISK_KNEE {
            risk += (temperature - TEMPERATURE_RISK_KNEE) * 3.0;
        }
        let (low, high) = MachineHealthReading::FAILURE_RISK_RANGE;
        risk.clamp(low, high)
    }
}

impl Default for MachineHealthGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesGenerator for MachineHealthGenerator {
    type Row = MachineHealthReading;
    const STEP_MINUTES: i64 = 12;

    fn generate(&self, grid: &TimeGrid, sampler: &mut Sampler) -> Vec<MachineHealthReading> {
        let timestamps = grid.timestamps();
        let mut rows = Vec::with_capacity(self.profiles.len() * timestamps.len());

        for profile in &self.profiles {
            let [vib_range, temp_range, risk_range] = Self::baseline_ranges(profile.health);
            let mut runtime_hours = profile.initial_runtime_hours();

            for ts in &timestamps {
                let base_vibration = sampler.uniform(vib_range.0, vib_range.1);
                let base_temp = sampler.uniform(temp_range.0, temp_range.1);
                let base_risk = sampler.uniform(risk_range.0, risk_range.1);

                let factor = Self::operational_factor(hour_of(*ts));
                let vibration = (base_vibration * factor + sampler.normal(0.0, 0.5))
                    .max(MachineHealthReading::MIN_VIBRATION);
                let temperature = base_temp * factor + sampler.normal(0.0, 2.0);
                let risk = Self::failure_risk(base_risk, vibration, temperature);
                runtime_hours += RUNTIME_STEP_HOURS;

                rows.push(MachineHealthReading {
                    timestamp: *ts,
                    machine_id: profile.machine_id.clone(),
                    vibration_rms: round_to(vibration, 2),
                    temperature_c: round_to(temperature, 1),
                    runtime_hours: round_to(runtime_hours, 1),
                    failure_risk_score: round_to(risk, 1),
                    health_status: profile.health,
                });
            }
        }

        rows
    }
}
