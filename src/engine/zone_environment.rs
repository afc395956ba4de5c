// ==========================================
// 工业物联网监控系统 - 厂区环境数据生成
// ==========================================
// 采样间隔: 15 分钟
// 规则: 活动系数驱动温度/CO2/AQI/噪声，CO2 与噪声有突发尖峰
// ==========================================

use crate::domain::catalog::{zone_profiles, ZoneProfile};
use crate::domain::environment::ZoneEnvironmentReading;
use crate::domain::reading::round_to;
use crate::engine::sampler::Sampler;
use crate::engine::series::SeriesGenerator;
use crate::engine::timeline::{hour_of, is_weekday_operating_hour, TimeGrid};
use chrono::NaiveDateTime;
use std::f64::consts::PI;

const CO2_SPIKE_PROBABILITY: f64 = 0.03;
const NOISE_SPIKE_PROBABILITY: f64 = 0.05;

pub struct ZoneEnvironmentGenerator {
    profiles: Vec<ZoneProfile>,
}

impl ZoneEnvironmentGenerator {
    pub fn new() -> Self {
        Self {
            profiles: zone_profiles(),
        }
    }

    /// 活动系数: 工作日运营时段 0.7 + 0.3·sin，其余 0.2
    pub fn activity_factor(ts: NaiveDateTime) -> f64 {
        if is_weekday_operating_hour(ts) {
            0.7 + 0.3 * (PI * (hour_of(ts) as f64 - 6.0) / 16.0).sin()
        } else {
            0.2
        }
    }

    /// 室外温度日周期
    fn external_temp(hour: u32) -> f64 {
        15.0 + 10.0 * (2.0 * PI * (hour as f64 - 6.0) / 24.0).sin()
    }

    fn sample(
        &self,
        profile: &ZoneProfile,
        ts: NaiveDateTime,
        sampler: &mut Sampler,
    ) -> ZoneEnvironmentReading {
        let activity = Self::activity_factor(ts);

        let temperature = profile.base_temp_c
            + Self::external_temp(hour_of(ts)) * 0.1
            + activity * 5.0
            + sampler.normal(0.0, 1.5);

        let (hum_low, hum_high) = ZoneEnvironmentReading::HUMIDITY_RANGE;
        let humidity =
            (60.0 - (temperature - 20.0) * 1.5 + sampler.normal(0.0, 5.0)).clamp(hum_low, hum_high);

        let mut co2 = profile.base_co2_ppm + activity * 500.0 + sampler.normal(0.0, 100.0);
        if sampler.chance(CO2_SPIKE_PROBABILITY) {
            co2 += sampler.uniform(300.0, 800.0);
        }
        let co2 = co2.max(ZoneEnvironmentReading::MIN_CO2_PPM);

        let aqi = (25.0 + (co2 - 1000.0).max(0.0) * 0.05 + activity * 20.0
            + sampler.normal(0.0, 10.0))
        .max(ZoneEnvironmentReading::MIN_AQI);

        let mut noise = profile.zone_type.base_noise_db() + activity * 15.0 + sampler.normal(0.0, 5.0);
        if sampler.chance(NOISE_SPIKE_PROBABILITY) {
            noise += sampler.uniform(10.0, 25.0);
        }
        let noise = noise.max(ZoneEnvironmentReading::MIN_NOISE_DB);

        ZoneEnvironmentReading {
            timestamp: ts,
            zone_id: profile.zone_id.clone(),
            zone_type: profile.zone_type,
            temperature_c: round_to(temperature, 1),
            humidity_percent: round_to(humidity, 1),
            co2_ppm: round_to(co2, 0),
            aqi: round_to(aqi, 0),
            noise_db: round_to(noise, 1),
        }
    }
}

impl Default for ZoneEnvironmentGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesGenerator for ZoneEnvironmentGenerator {
    type Row = ZoneEnvironmentReading;
    const STEP_MINUTES: i64 = 15;

    fn generate(&self, grid: &TimeGrid, sampler: &mut Sampler) -> Vec<ZoneEnvironmentReading> {
        let timestamps = grid.timestamps();
        let mut rows = Vec::with_capacity(self.profiles.len() * timestamps.len());

        for profile in &self.profiles {
            for ts in &timestamps {
                rows.push(self.sample(profile, *ts, sampler));
            }
        }

        rows
    }
}
