// ==========================================
// 工业物联网监控系统 - 状态色带
// ==========================================
// 职责: 数值 -> 红/黄/绿 三档状态，包裹安全风险评分
// ==========================================

use crate::domain::logistics::PackageIntegrityReading;
use crate::domain::types::SealStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 状态色带
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusBand {
    Normal,  // 绿
    Caution, // 黄
    Alert,   // 红
}

impl fmt::Display for StatusBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusBand::Normal => write!(f, "NORMAL"),
            StatusBand::Caution => write!(f, "CAUTION"),
            StatusBand::Alert => write!(f, "ALERT"),
        }
    }
}

/// 越大越差的指标: > alert 为红，> caution 为黄
fn higher_is_worse(value: f64, alert: f64, caution: f64) -> StatusBand {
    if value > alert {
        StatusBand::Alert
    } else if value > caution {
        StatusBand::Caution
    } else {
        StatusBand::Normal
    }
}

pub fn co2_band(co2_ppm: f64) -> StatusBand {
    higher_is_worse(co2_ppm, 1500.0, 1000.0)
}

pub fn aqi_band(aqi: f64) -> StatusBand {
    higher_is_worse(aqi, 100.0, 50.0)
}

pub fn noise_band(noise_db: f64) -> StatusBand {
    higher_is_worse(noise_db, 90.0, 75.0)
}

pub fn failure_risk_band(risk_score: f64) -> StatusBand {
    higher_is_worse(risk_score, 70.0, 50.0)
}

/// 冷链温度偏差色带 (按 |实际 - 目标|)
pub fn temp_deviation_band(deviation: f64) -> StatusBand {
    higher_is_worse(deviation.abs(), 5.0, 3.0)
}

/// OEE 越大越好: >= 80 为绿，>= 60 为黄
pub fn oee_band(oee_percent: f64) -> StatusBand {
    if oee_percent >= 80.0 {
        StatusBand::Normal
    } else if oee_percent >= 60.0 {
        StatusBand::Caution
    } else {
        StatusBand::Alert
    }
}

// ==========================================
// 包裹安全风险
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageRiskLevel {
    Low,
    Medium,
    High,
}

/// 风险分 = 30·[倾角>45] + 40·[光照>1000] + 50·[封条破损]
pub fn package_risk_score(row: &PackageIntegrityReading) -> u32 {
    let mut score = 0;
    if row.tilt_angle > 45.0 {
        score += 30;
    }
    if row.light_exposure_lux > 1000.0 {
        score += 40;
    }
    if row.seal_status == SealStatus::Broken {
        score += 50;
    }
    score
}

pub fn package_risk_level(score: u32) -> PackageRiskLevel {
    match score {
        0..=20 => PackageRiskLevel::Low,
        21..=50 => PackageRiskLevel::Medium,
        _ => PackageRiskLevel::High,
    }
}

/// 疑似被拆: 任一风险条件成立
pub fn is_suspected_tampering(row: &PackageIntegrityReading) -> bool {
    package_risk_score(row) > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn pkg(tilt: f64, light: f64, seal: SealStatus) -> PackageIntegrityReading {
        PackageIntegrityReading {
            timestamp: NaiveDate::from_ymd_opt(2026, 3, 9)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            package_id: "PKG_500000".to_string(),
            tilt_angle: tilt,
            light_exposure_lux: light,
            seal_status: seal,
        }
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(co2_band(1500.0), StatusBand::Caution);
        assert_eq!(co2_band(1500.1), StatusBand::Alert);
        assert_eq!(co2_band(1000.0), StatusBand::Normal);
        assert_eq!(noise_band(76.0), StatusBand::Caution);
        assert_eq!(failure_risk_band(71.0), StatusBand::Alert);
        assert_eq!(temp_deviation_band(-4.0), StatusBand::Caution);
        assert_eq!(oee_band(80.0), StatusBand::Normal);
        assert_eq!(oee_band(59.9), StatusBand::Alert);
    }

    #[test]
    fn test_package_risk_score() {
        assert_eq!(package_risk_score(&pkg(5.0, 100.0, SealStatus::Intact)), 0);
        assert_eq!(package_risk_score(&pkg(50.0, 100.0, SealStatus::Intact)), 30);
        assert_eq!(package_risk_score(&pkg(50.0, 1200.0, SealStatus::Broken)), 120);
        assert_eq!(package_risk_level(30), PackageRiskLevel::Medium);
        assert_eq!(package_risk_level(90), PackageRiskLevel::High);
        assert!(!is_suspected_tampering(&pkg(45.0, 1000.0, SealStatus::Intact)));
    }
}
