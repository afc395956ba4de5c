// ==========================================
// 工业物联网监控系统 - 仓库环境数据生成
// ==========================================
// 采样间隔: 15 分钟
// ==========================================

use crate::domain::catalog::warehouse_ids;
use crate::domain::environment::WarehouseEnvironmentReading;
use crate::domain::reading::round_to;
use crate::engine::sampler::Sampler;
use crate::engine::series::SeriesGenerator;
use crate::engine::timeline::{hour_of, is_weekday, TimeGrid};
use chrono::NaiveDateTime;

pub struct WarehouseEnvironmentGenerator {
    warehouse_ids: Vec<String>,
}

impl WarehouseEnvironmentGenerator {
    pub fn new() -> Self {
        Self {
            warehouse_ids: warehouse_ids(),
        }
    }

    /// 仓库作业强度: 白班 0.8 / 晚班 0.4 / 其他 0.1
    pub fn activity(ts: NaiveDateTime) -> f64 {
        if !is_weekday(ts) {
            return 0.1;
        }
        match hour_of(ts) {
            6..=18 => 0.8,
            19..=22 => 0.4,
            _ => 0.1,
        }
    }

    fn sample(
        warehouse_id: &str,
        ts: NaiveDateTime,
        sampler: &mut Sampler,
    ) -> WarehouseEnvironmentReading {
        let activity = Self::activity(ts);
        let (hum_low, hum_high) = WarehouseEnvironmentReading::HUMIDITY_RANGE;

        let temp = 20.0 + activity * 3.0 + sampler.normal(0.0, 2.0);
        let humidity = (50.0 + activity * 10.0 + sampler.normal(0.0, 8.0)).clamp(hum_low, hum_high);

        let mut co2 = 450.0 + activity * 600.0 + sampler.normal(0.0, 100.0);
        if sampler.chance(0.03) {
            co2 += sampler.uniform(400.0, 1000.0);
        }
        let co2 = co2.max(WarehouseEnvironmentReading::MIN_CO2);

        let aqi = (30.0 + activity * 40.0 + (co2 - 1000.0).max(0.0) * 0.03
            + sampler.normal(0.0, 15.0))
        .max(WarehouseEnvironmentReading::MIN_AQI);

        WarehouseEnvironmentReading {
            timestamp: ts,
            warehouse_id: warehouse_id.to_string(),
            temp: round_to(temp, 1),
            humidity: round_to(humidity, 1),
            co2: round_to(co2, 0),
            aqi: round_to(aqi, 0),
        }
    }
}

impl Default for WarehouseEnvironmentGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesGenerator for WarehouseEnvironmentGenerator {
    type Row = WarehouseEnvironmentReading;
    const STEP_MINUTES: i64 = 15;

    fn generate(&self, grid: &TimeGrid, sampler: &mut Sampler) -> Vec<WarehouseEnvironmentReading> {
        let timestamps = grid.timestamps();
        let mut rows = Vec::with_capacity(self.warehouse_ids.len() * timestamps.len());

        for warehouse_id in &self.warehouse_ids {
            for ts in &timestamps {
                rows.push(Self::sample(warehouse_id, *ts, sampler));
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
            .and_hms_opt(h, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_activity_shifts() {
        assert_eq!(WarehouseEnvironmentGenerator::activity(at(9, 9)), 0.8);
        assert_eq!(WarehouseEnvironmentGenerator::activity(at(9, 18)), 0.8);
        assert_eq!(WarehouseEnvironmentGenerator::activity(at(9, 19)), 0.4);
        assert_eq!(WarehouseEnvironmentGenerator::activity(at(9, 23)), 0.1);
        assert_eq!(WarehouseEnvironmentGenerator::activity(at(8, 9)), 0.1);
    }

    #[test]
    fn test_rows_within_bounds() {
        let grid = TimeGrid::trailing(at(9, 12), 2, WarehouseEnvironmentGenerator::STEP_MINUTES)
            .unwrap();
        let rows = WarehouseEnvironmentGenerator::new().generate(&grid, &mut Sampler::from_seed(3));
        assert_eq!(rows.len(), 5 * grid.len());
        for row in &rows {
            assert!((30.0..=80.0).contains(&row.humidity));
            assert!(row.co2 >= 0.0);
            assert!(row.aqi >= 0.0);
        }
    }
}
