// ==========================================
// 工业物联网监控系统 - 包裹防拆数据生成
// ==========================================
// 采样间隔: 30 分钟
// 规则: 封条破损概率 = 0.001 + 0.02·[倾角>45] + 0.03·[光照>1000]
// ==========================================

use crate::domain::catalog::package_ids;
use crate::domain::logistics::PackageIntegrityReading;
use crate::domain::reading::round_to;
use crate::domain::types::SealStatus;
use crate::engine::sampler::Sampler;
use crate::engine::series::SeriesGenerator;
use crate::engine::timeline::TimeGrid;
use chrono::NaiveDateTime;

const TILT_RISK_DEGREES: f64 = 45.0;
const LIGHT_RISK_LUX: f64 = 1000.0;

pub struct PackageIntegrityGenerator {
    package_ids: Vec<String>,
}

impl PackageIntegrityGenerator {
    /// # 参数
    /// - `package_count`: 取包裹目录前 N 个
    pub fn new(package_count: usize) -> Self {
        Self {
            package_ids: package_ids().into_iter().take(package_count).collect(),
        }
    }

    pub fn seal_failure_probability(tilt: f64, light: f64) -> f64 {
        let mut p = 0.001;
        if tilt > TILT_RISK_DEGREES {
            p += 0.02;
        }
        if light > LIGHT_RISK_LUX {
            p += 0.03;
        }
        p
    }

    fn sample(package_id: &str, ts: NaiveDateTime, sampler: &mut Sampler) -> PackageIntegrityReading {
        // 跌落/野蛮装卸
        let mut tilt = sampler.uniform(0.0, 10.0) + sampler.normal(0.0, 2.0);
        if sampler.chance(0.02) {
            tilt += sampler.uniform(30.0, 80.0);
        }
        let tilt = tilt.max(PackageIntegrityReading::MIN_TILT);

        // 拆封尝试 (强光)
        let mut light = sampler.uniform(10.0, 150.0) + sampler.normal(0.0, 20.0);
        if sampler.chance(0.01) {
            light += sampler.uniform(800.0, 2000.0);
        }
        let light = light.max(PackageIntegrityReading::MIN_LIGHT_LUX);

        let seal_status = if sampler.chance(Self::seal_failure_probability(tilt, light)) {
            SealStatus::Broken
        } else {
            SealStatus::Intact
        };

        PackageIntegrityReading {
            timestamp: ts,
            package_id: package_id.to_string(),
            tilt_angle: round_to(tilt, 1),
            light_exposure_lux: round_to(light, 0),
            seal_status,
        }
    }
}

impl SeriesGenerator for PackageIntegrityGenerator {
    type Row = PackageIntegrityReading;
    const STEP_MINUTES: i64 = 30;

    fn generate(&self, grid: &TimeGrid, sampler: &mut Sampler) -> Vec<PackageIntegrityReading> {
        let timestamps = grid.timestamps();
        let mut rows = Vec::with_capacity(self.package_ids.len() * timestamps.len());

        for package_id in &self.package_ids {
            for ts in &timestamps {
                rows.push(Self::sample(package_id, *ts, sampler));
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
    fn test_seal_failure_probability() {
        assert_eq!(PackageIntegrityGenerator::seal_failure_probability(5.0, 100.0), 0.001);
        assert!((PackageIntegrityGenerator::seal_failure_probability(50.0, 1500.0) - 0.051).abs() < 1e-12);
    }

    #[test]
    fn test_rows_within_bounds() {
        let end = NaiveDate::from_ymd_opt(2026, 3, 9)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let grid = TimeGrid::trailing(end, 1, PackageIntegrityGenerator::STEP_MINUTES).unwrap();
        let rows = PackageIntegrityGenerator::new(20).generate(&grid, &mut Sampler::from_seed(6));
        assert_eq!(rows.len(), 20 * grid.len());
        assert!(rows.iter().all(|r| r.tilt_angle >= 0.0 && r.light_exposure_lux >= 0.0));
        assert!(rows.iter().all(|r| r.package_id.as_str() < "PKG_500020"));
    }
}
