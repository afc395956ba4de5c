// ==========================================
// 工业物联网监控系统 - API 层
// ==========================================
// 职责: 提供监控视图/告警查询接口，供 CLI 与应用状态调用
// ==========================================

pub mod error;
pub mod monitor_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use monitor_api::{
    AttributeFilter, DomainView, MonitorApi, MonitorOverview, TableView, ViewRequest,
};
