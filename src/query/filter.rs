// ==========================================
// 工业物联网监控系统 - 数据筛选
// ==========================================
// 职责: 按实体/时间窗口/属性筛选读数表
// 红线: 筛选只做子集，不新增/修改记录
// ==========================================

use crate::domain::logistics::{ColdChainReading, InventoryReading, PackageIntegrityReading};
use crate::domain::machine::MachineStatusReading;
use crate::domain::reading::Reading;
use crate::domain::types::MachineStatus;
use crate::query::bands::is_suspected_tampering;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// TimeWindow - 时间窗口
// ==========================================
// 相对于表内最大时间戳，下界含
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeWindow {
    Last6Hours,
    Last24Hours,
    Last3Days,
    Last7Days,
    #[default]
    All,
}

impl TimeWindow {
    /// 窗口长度 (All 为 None)
    pub fn span(&self) -> Option<Duration> {
        match self {
            TimeWindow::Last6Hours => Some(Duration::hours(6)),
            TimeWindow::Last24Hours => Some(Duration::hours(24)),
            TimeWindow::Last3Days => Some(Duration::days(3)),
            TimeWindow::Last7Days => Some(Duration::days(7)),
            TimeWindow::All => None,
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeWindow::Last6Hours => write!(f, "6h"),
            TimeWindow::Last24Hours => write!(f, "24h"),
            TimeWindow::Last3Days => write!(f, "3d"),
            TimeWindow::Last7Days => write!(f, "7d"),
            TimeWindow::All => write!(f, "all"),
        }
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "6h" | "last_6_hours" => Ok(TimeWindow::Last6Hours),
            "24h" | "1d" | "last_24_hours" => Ok(TimeWindow::Last24Hours),
            "3d" | "last_3_days" => Ok(TimeWindow::Last3Days),
            "7d" | "last_7_days" => Ok(TimeWindow::Last7Days),
            "all" => Ok(TimeWindow::All),
            other => Err(format!("未知时间窗口: {}", other)),
        }
    }
}

// ==========================================
// 通用筛选
// ==========================================

/// 按谓词筛选
pub fn filter_rows<R, P>(rows: &[R], predicate: P) -> Vec<R>
where
    R: Clone,
    P: Fn(&R) -> bool,
{
    rows.iter().filter(|r| predicate(r)).cloned().collect()
}

/// 按实体编号筛选
pub fn filter_by_entity<R: Reading + Clone>(rows: &[R], entity_id: &str) -> Vec<R> {
    filter_rows(rows, |r| r.entity_id() == entity_id)
}

/// 按时间窗口筛选
///
/// 窗口相对表内最大时间戳计算，空表返回空
pub fn filter_by_window<R: Reading + Clone>(rows: &[R], window: TimeWindow) -> Vec<R> {
    let (Some(span), Some(max_ts)) = (window.span(), rows.iter().map(|r| r.timestamp()).max())
    else {
        return rows.to_vec();
    };
    let cutoff = max_ts - span;
    filter_rows(rows, |r| r.timestamp() >= cutoff)
}

// ==========================================
// 监控域专用筛选
// ==========================================

pub fn filter_machine_status(
    rows: &[MachineStatusReading],
    status: MachineStatus,
) -> Vec<MachineStatusReading> {
    filter_rows(rows, |r| r.status == status)
}

pub fn filter_cold_chain_by_truck(rows: &[ColdChainReading], truck_id: &str) -> Vec<ColdChainReading> {
    filter_rows(rows, |r| r.truck_id == truck_id)
}

pub fn filter_inventory_by_warehouse(
    rows: &[InventoryReading],
    warehouse_id: &str,
) -> Vec<InventoryReading> {
    filter_rows(rows, |r| r.warehouse_id == warehouse_id)
}

/// 疑似被拆封的包裹读数
pub fn filter_suspected_tampering(rows: &[PackageIntegrityReading]) -> Vec<PackageIntegrityReading> {
    filter_rows(rows, is_suspected_tampering)
}
