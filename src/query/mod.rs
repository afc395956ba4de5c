// ==========================================
// 工业物联网监控系统 - 查询层
// ==========================================
// 职责: 筛选 + 最新读数 + KPI + 状态色带
// 红线: 只读，不修改数据集
// ==========================================

pub mod bands;
pub mod filter;
pub mod kpi;
pub mod latest;

pub use bands::{package_risk_score, PackageRiskLevel, StatusBand};
pub use filter::{filter_by_entity, filter_by_window, filter_rows, TimeWindow};
pub use kpi::mean_of;
pub use latest::latest_per_entity;
