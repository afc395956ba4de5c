// ==========================================
// 工业物联网监控系统 - 领域层
// ==========================================
// 职责: 实体目录、读数记录、告警模型
// 红线: 领域层不依赖引擎/配置
// ==========================================

pub mod alert;
pub mod catalog;
pub mod environment;
pub mod logistics;
pub mod machine;
pub mod production;
pub mod reading;
pub mod types;

pub use alert::Alert;
pub use environment::{WarehouseEnvironmentReading, ZoneEnvironmentReading};
pub use logistics::{ColdChainReading, InventoryReading, PackageIntegrityReading};
pub use machine::{MachineHealthReading, MachineStatusReading};
pub use production::LineOeeReading;
pub use reading::Reading;
pub use types::{
    AlertKind, DoorStatus, HealthTier, MachineStatus, MonitorDomain, ProductType, SealStatus,
    Severity, ZoneType,
};
