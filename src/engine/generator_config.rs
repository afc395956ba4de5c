// ==========================================
// 工业物联网监控系统 - 生成参数
// ==========================================
// 职责: 数据规模档位 (Full/Standard/Lite) + 种子 + 窗口结束时间
// ==========================================

use crate::domain::catalog::{PACKAGE_CATALOG_SIZE, SKU_CATALOG_SIZE};
use crate::domain::types::MonitorDomain;
use crate::engine::error::{EngineError, EngineResult};
use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 默认随机种子
pub const DEFAULT_SEED: u64 = 42;

// ==========================================
// DatasetProfile - 数据规模档位
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DatasetProfile {
    #[default]
    Full,     // 7 天窗口，全量实体
    Standard, // 3 天窗口
    Lite,     // 1 天窗口，少量实体
}

impl DatasetProfile {
    pub fn window_days(&self) -> i64 {
        match self {
            DatasetProfile::Full => 7,
            DatasetProfile::Standard => 3,
            DatasetProfile::Lite => 1,
        }
    }

    pub fn sku_count(&self) -> usize {
        match self {
            DatasetProfile::Full => 25,
            DatasetProfile::Standard => 15,
            DatasetProfile::Lite => 10,
        }
    }

    pub fn package_count(&self) -> usize {
        match self {
            DatasetProfile::Full => 50,
            DatasetProfile::Standard => 30,
            DatasetProfile::Lite => 20,
        }
    }

    pub fn shipment_count(&self) -> usize {
        match self {
            DatasetProfile::Full | DatasetProfile::Standard => 10,
            DatasetProfile::Lite => 5,
        }
    }
}

impl fmt::Display for DatasetProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetProfile::Full => write!(f, "FULL"),
            DatasetProfile::Standard => write!(f, "STANDARD"),
            DatasetProfile::Lite => write!(f, "LITE"),
        }
    }
}

impl FromStr for DatasetProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FULL" => Ok(DatasetProfile::Full),
            "STANDARD" => Ok(DatasetProfile::Standard),
            "LITE" => Ok(DatasetProfile::Lite),
            other => Err(format!("未知数据档位: {}", other)),
        }
    }
}

// ==========================================
// GeneratorConfig - 生成参数
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub end_time: NaiveDateTime,
    pub window_days: i64,
    pub sku_count: usize,
    pub package_count: usize,
    pub shipment_count: usize,
}

impl GeneratorConfig {
    /// 按档位构造生成参数
    pub fn from_profile(profile: DatasetProfile, seed: u64, end_time: NaiveDateTime) -> Self {
        Self {
            seed,
            end_time,
            window_days: profile.window_days(),
            sku_count: profile.sku_count(),
            package_count: profile.package_count(),
            shipment_count: profile.shipment_count(),
        }
    }

    /// 以当前本地时间 (取整到分钟) 为窗口终点
    pub fn now(profile: DatasetProfile, seed: u64) -> Self {
        let now = Local::now().naive_local();
        let end_time = now
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now);
        Self::from_profile(profile, seed, end_time)
    }

    /// 校验参数
    pub fn validate(&self) -> EngineResult<()> {
        if self.window_days <= 0 {
            return Err(EngineError::InvalidWindow(self.window_days));
        }
        check_count(MonitorDomain::Inventory, self.sku_count, SKU_CATALOG_SIZE)?;
        check_count(
            MonitorDomain::PackageIntegrity,
            self.package_count,
            PACKAGE_CATALOG_SIZE,
        )?;
        check_count(MonitorDomain::ColdChain, self.shipment_count, 10)?;
        Ok(())
    }
}

fn check_count(domain: MonitorDomain, requested: usize, available: usize) -> EngineResult<()> {
    if requested == 0 || requested > available {
        return Err(EngineError::InvalidEntityCount {
            domain: domain.to_string(),
            requested,
            available,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn end() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 9)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_profile_parameters() {
        let full = GeneratorConfig::from_profile(DatasetProfile::Full, 1, end());
        assert_eq!(full.window_days, 7);
        assert_eq!(full.sku_count, 25);
        assert_eq!(full.package_count, 50);

        let lite = GeneratorConfig::from_profile(DatasetProfile::Lite, 1, end());
        assert_eq!(lite.window_days, 1);
        assert_eq!(lite.shipment_count, 5);
        assert!(lite.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_selection() {
        let mut cfg = GeneratorConfig::from_profile(DatasetProfile::Full, 1, end());
        cfg.sku_count = SKU_CATALOG_SIZE + 1;
        assert!(matches!(
            cfg.validate(),
            Err(EngineError::InvalidEntityCount { .. })
        ));

        let mut cfg = GeneratorConfig::from_profile(DatasetProfile::Full, 1, end());
        cfg.window_days = 0;
        assert_eq!(cfg.validate(), Err(EngineError::InvalidWindow(0)));
    }

    #[test]
    fn test_profile_parse() {
        assert_eq!("lite".parse::<DatasetProfile>(), Ok(DatasetProfile::Lite));
        assert!("huge".parse::<DatasetProfile>().is_err());
    }
}
