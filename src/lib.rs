// ==========================================
// 工业物联网监控系统 - 核心库
// ==========================================
// 范围: 设备/环境/产线/冷链/仓储/库存/包裹 八个监控域
// 流程: 遥测合成 → 筛选与 KPI → 阈值告警
// 技术栈: Rust + SQLite (仅配置)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与读数
pub mod domain;

// 引擎层 - 遥测合成
pub mod engine;

// 查询层 - 筛选/最新读数/KPI/状态分级
pub mod query;

// 告警层 - 阈值与评估
pub mod alert;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 监控视图接口
pub mod api;

// 应用层 - 会话装配
pub mod app;

// CSV 导出
pub mod export;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AlertKind, MachineStatus, MonitorDomain, Severity};

// 领域实体
pub use domain::{
    Alert, ColdChainReading, InventoryReading, LineOeeReading, MachineHealthReading,
    MachineStatusReading, PackageIntegrityReading, Reading, WarehouseEnvironmentReading,
    ZoneEnvironmentReading,
};

// 引擎
pub use engine::{DatasetBundle, DatasetProfile, GeneratorConfig, TelemetryOrchestrator};

// 告警
pub use alert::{AlertEvaluator, AlertSummary, AlertThresholds};

// API
pub use api::{MonitorApi, ViewRequest};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "工业物联网与供应链监控";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
