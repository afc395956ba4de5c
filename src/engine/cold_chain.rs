// ==========================================
// 工业物联网监控系统 - 冷链运输数据生成
// ==========================================
// 采样间隔: 20 分钟
// 规则: 温度 = 目标温度 + 偏差 + 0.3 × 外部因素
// 规则: 故障高发货车温度偏移概率 8%，其余 2%
// ==========================================

use crate::domain::catalog::{shipment_profiles, ShipmentProfile};
use crate::domain::logistics::ColdChainReading;
use crate::domain::reading::round_to;
use crate::domain::types::DoorStatus;
use crate::engine::sampler::Sampler;
use crate::engine::series::SeriesGenerator;
use crate::engine::timeline::{hour_of, TimeGrid};

pub struct ColdChainGenerator {
    shipments: Vec<ShipmentProfile>,
}

impl ColdChainGenerator {
    /// # 参数
    /// - `shipment_count`: 取货运目录前 N 个
    pub fn new(shipment_count: usize) -> Self {
        Self {
            shipments: shipment_profiles().into_iter().take(shipment_count).collect(),
        }
    }

    /// 外部温度因素: 午后升温 / 凌晨降温
    fn external_factor(hour: u32, sampler: &mut Sampler) -> f64 {
        match hour {
            12..=16 => sampler.uniform(0.5, 2.0),
            2..=6 => sampler.uniform(-1.0, -0.3),
            _ => sampler.uniform(-0.5, 0.5),
        }
    }

    /// 装卸阶段 (进度 < 5% 或 > 95%) 开门概率 10%，途中 1%
    fn door_open_probability(progress: f64) -> f64 {
        if !(0.05..=0.95).contains(&progress) {
            0.10
        } else {
            0.01
        }
    }

    fn generate_shipment(
        &self,
        shipment: &ShipmentProfile,
        grid: &TimeGrid,
        sampler: &mut Sampler,
    ) -> Vec<ColdChainReading> {
        let timestamps = grid.timestamps();
        let total = timestamps.len() as f64;
        let (base_lat, base_lon) = shipment.route_origin;
        let (hum_low, hum_high) = ColdChainReading::HUMIDITY_RANGE;

        timestamps
            .iter()
            .enumerate()
            .map(|(j, ts)| {
                let progress = (j as f64 / total).min(1.0);

                let gps_lat =
                    base_lat + progress * sampler.uniform(-2.0, 2.0) + sampler.normal(0.0, 0.01);
                let gps_lon =
                    base_lon + progress * sampler.uniform(-2.0, 2.0) + sampler.normal(0.0, 0.01);

                let mut deviation = sampler.normal(0.0, shipment.tolerance_c * 0.5);
                let external = Self::external_factor(hour_of(*ts), sampler);
                if shipment.is_problem_truck() {
                    if sampler.chance(0.08) {
                        deviation += sampler.uniform(5.0, 15.0);
                    }
                } else if sampler.chance(0.02) {
                    deviation += sampler.uniform(3.0, 10.0);
                }
                let temp = shipment.target_temp_c + deviation + external * 0.3;

                let humidity = (sampler.uniform(60.0, 85.0) + sampler.normal(0.0, 5.0))
                    .clamp(hum_low, hum_high);

                let door_status = if sampler.chance(Self::door_open_probability(progress)) {
                    DoorStatus::Open
                } else {
                    DoorStatus::Closed
                };

                ColdChainReading {
                    timestamp: *ts,
                    shipment_id: shipment.shipment_id.clone(),
                    truck_id: shipment.truck_id.clone(),
                    cargo_type: shipment.cargo.to_string(),
                    cold_storage_temp: round_to(temp, 1),
                    humidity: round_to(humidity, 1),
                    gps_lat: round_to(gps_lat, 4),
                    gps_lon: round_to(gps_lon, 4),
                    door_status,
                    target_temp: shipment.target_temp_c,
                    tolerance: shipment.tolerance_c,
                }
            })
            .collect()
    }
}

impl SeriesGenerator for ColdChainGenerator {
    type Row = ColdChainReading;
    const STEP_MINUTES: i64 = 20;

    fn generate(&self, grid: &TimeGrid, sampler: &mut Sampler) -> Vec<ColdChainReading> {
        let mut rows = Vec::new();
        for shipment in &self.shipments {
            rows.extend(self.generate_shipment(shipment, grid, sampler));
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn grid() -> TimeGrid {
        let end = NaiveDate::from_ymd_opt(2026, 3, 9)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        TimeGrid::trailing(end, 2, ColdChainGenerator::STEP_MINUTES).unwrap()
    }

    #[test]
    fn test_shipment_selection_and_bounds() {
        let grid = grid();
        let rows = ColdChainGenerator::new(5).generate(&grid, &mut Sampler::from_seed(4));
        assert_eq!(rows.len(), 5 * grid.len());
        assert!(rows.iter().all(|r| r.shipment_id.as_str() <= "SHIP_1004"));
        assert!(rows.iter().all(|r| (40.0..=95.0).contains(&r.humidity)));
    }

    #[test]
    fn test_gps_starts_at_route_origin() {
        let rows = ColdChainGenerator::new(1).generate(&grid(), &mut Sampler::from_seed(4));
        let first = &rows[0];
        // 进度为 0 时仅有 N(0, 0.01) 抖动
        assert!((first.gps_lat - 40.7128).abs() < 0.1);
        assert!((first.gps_lon + 74.0060).abs() < 0.1);
        assert_eq!(first.truck_id, "TRUCK_001");
        assert_eq!(first.target_temp, -18.0);
    }

    #[test]
    fn test_door_probability_by_progress() {
        assert_eq!(ColdChainGenerator::door_open_probability(0.01), 0.10);
        assert_eq!(ColdChainGenerator::door_open_probability(0.5), 0.01);
        assert_eq!(ColdChainGenerator::door_open_probability(0.99), 0.10);
    }
}
