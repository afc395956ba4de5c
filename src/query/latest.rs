// ==========================================
// 工业物联网监控系统 - 实体最新读数
// ==========================================
// 规则: 每个实体恰好一行，时间戳最大者胜出，同时间戳取位置靠后者
// 输出: 按实体编号升序
// ==========================================

use crate::domain::reading::Reading;
use std::collections::BTreeMap;

/// 取每个实体的最新读数
pub fn latest_per_entity<R: Reading + Clone>(rows: &[R]) -> Vec<R> {
    let mut latest: BTreeMap<&str, &R> = BTreeMap::new();

    for row in rows {
        match latest.get(row.entity_id()) {
            Some(current) if current.timestamp() > row.timestamp() => {}
            _ => {
                latest.insert(row.entity_id(), row);
            }
        }
    }

    latest.into_values().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::logistics::PackageIntegrityReading;
    use crate::domain::types::SealStatus;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 9)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn pkg(id: &str, h: u32, tilt: f64) -> PackageIntegrityReading {
        PackageIntegrityReading {
            timestamp: at(h),
            package_id: id.to_string(),
            tilt_angle: tilt,
            light_exposure_lux: 50.0,
            seal_status: SealStatus::Intact,
        }
    }

    #[test]
    fn test_one_row_per_entity_sorted() {
        let rows = vec![
            pkg("PKG_500002", 3, 1.0),
            pkg("PKG_500001", 5, 2.0),
            pkg("PKG_500002", 1, 3.0),
            pkg("PKG_500001", 4, 4.0),
        ];
        let latest = latest_per_entity(&rows);
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].package_id, "PKG_500001");
        assert_eq!(latest[0].tilt_angle, 2.0);
        assert_eq!(latest[1].tilt_angle, 1.0);
    }

    #[test]
    fn test_tie_prefers_later_position() {
        let rows = vec![pkg("PKG_500000", 2, 1.0), pkg("PKG_500000", 2, 9.0)];
        let latest = latest_per_entity(&rows);
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].tilt_angle, 9.0);
    }

    #[test]
    fn test_empty_input() {
        let rows: Vec<PackageIntegrityReading> = Vec::new();
        assert!(latest_per_entity(&rows).is_empty());
    }
}
