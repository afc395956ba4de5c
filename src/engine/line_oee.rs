// ==========================================
// 工业物联网监控系统 - 产线 OEE 数据生成
// ==========================================
// 采样间隔: 30 分钟
// 规则: OEE = 可用率 × 性能率 × 质量率 / 10000
// 说明: 突发问题缩放后统一截断到 [0, 100]
// ==========================================

use crate::domain::catalog::{line_profiles, LineProfile};
use crate::domain::production::LineOeeReading;
use crate::domain::reading::round_to;
use crate::engine::sampler::Sampler;
use crate::engine::series::SeriesGenerator;
use crate::engine::timeline::{hour_of, is_weekday_operating_hour, TimeGrid};
use chrono::NaiveDateTime;

const ISSUE_PROBABILITY: f64 = 0.05;
const QUALITY_ISSUE_PROBABILITY: f64 = 0.02;
const QUALITY_FLOOR: f64 = 70.0;

pub struct LineOeeGenerator {
    profiles: Vec<LineProfile>,
}

impl LineOeeGenerator {
    pub fn new() -> Self {
        Self {
            profiles: line_profiles(),
        }
    }

    /// 基线: (可用率, 性能率, 质量率, 班次系数)
    fn baseline(
        profile: &LineProfile,
        ts: NaiveDateTime,
        sampler: &mut Sampler,
    ) -> (f64, f64, f64, f64) {
        if is_weekday_operating_hour(ts) {
            // 早班 6-14 点最佳，晚班 15-22 点
            let shift_factor = if hour_of(ts) <= 14 { 1.0 } else { 0.95 };
            (
                profile.reliability * 100.0,
                profile.efficiency * 100.0,
                sampler.uniform(92.0, 98.0),
                shift_factor,
            )
        } else {
            (
                sampler.uniform(10.0, 30.0),
                sampler.uniform(20.0, 50.0),
                sampler.uniform(85.0, 95.0),
                0.8,
            )
        }
    }

    fn sample(&self, profile: &LineProfile, ts: NaiveDateTime, sampler: &mut Sampler) -> LineOeeReading {
        let (low, high) = LineOeeReading::PERCENT_RANGE;
        let (base_a, base_p, base_q, shift) = Self::baseline(profile, ts, sampler);

        let mut availability = (base_a * shift + sampler.normal(0.0, 3.0)).clamp(low, high);
        let mut performance = (base_p * shift + sampler.normal(0.0, 4.0)).clamp(low, high);
        let mut quality = (base_q + sampler.normal(0.0, 2.0)).clamp(QUALITY_FLOOR, high);

        if sampler.chance(ISSUE_PROBABILITY) {
            availability *= sampler.uniform(0.6, 0.9);
            performance *= sampler.uniform(0.7, 0.9);
        }
        if sampler.chance(QUALITY_ISSUE_PROBABILITY) {
            quality *= sampler.uniform(0.8, 0.95);
        }

        let availability = availability.clamp(low, high);
        let performance = performance.clamp(low, high);
        let quality = quality.clamp(low, high);
        let oee = LineOeeReading::compute_oee(availability, performance, quality);

        LineOeeReading {
            timestamp: ts,
            line_id: profile.line_id.clone(),
            product_type: profile.product,
            availability_percent: round_to(availability, 1),
            performance_percent: round_to(performance, 1),
            quality_percent: round_to(quality, 1),
            oee_percent: round_to(oee.clamp(low, high), 1),
        }
    }
}

impl Default for LineOeeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesGenerator for LineOeeGenerator {
    type Row = LineOeeReading;
    const STEP_MINUTES: i64 = 30;

    fn generate(&self, grid: &TimeGrid, sampler: &mut Sampler) -> Vec<LineOeeReading> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_oee_matches_components() {
        let end = NaiveDate::from_ymd_opt(2026, 3, 9)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap();
        let grid = TimeGrid::trailing(end, 3, LineOeeGenerator::STEP_MINUTES).unwrap();
        let rows = LineOeeGenerator::new().generate(&grid, &mut Sampler::from_seed(99));

        assert_eq!(rows.len(), 5 * grid.len());
        for row in &rows {
            for v in [
                row.availability_percent,
                row.performance_percent,
                row.quality_percent,
                row.oee_percent,
            ] {
                assert!((0.0..=100.0).contains(&v));
            }
            let recomputed = LineOeeReading::compute_oee(
                row.availability_percent,
                row.performance_percent,
                row.quality_percent,
            );
            // 各分量已取整到 0.1，允许的误差
            assert!((recomputed - row.oee_percent).abs() < 0.3);
        }
    }
}
