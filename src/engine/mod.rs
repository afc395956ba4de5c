// ==========================================
// 工业物联网监控系统 - 引擎层
// ==========================================
// 职责: 合成八个监控域的遥测数据 + 实时状态推送
// 红线: 生成器之间不共享状态，随机流按监控域隔离
// ==========================================

pub mod cold_chain;
pub mod error;
pub mod generator_config;
pub mod inventory;
pub mod line_oee;
pub mod live_feed;
pub mod machine_health;
pub mod machine_status;
pub mod orchestrator;
pub mod package_integrity;
pub mod sampler;
pub mod series;
pub mod timeline;
pub mod warehouse_environment;
pub mod zone_environment;

// 重导出核心引擎
pub use cold_chain::ColdChainGenerator;
pub use error::{EngineError, EngineResult};
pub use generator_config::{DatasetProfile, GeneratorConfig, DEFAULT_SEED};
pub use inventory::InventoryGenerator;
pub use line_oee::LineOeeGenerator;
pub use live_feed::{LiveSnapshot, LiveStatusFeed};
pub use machine_health::MachineHealthGenerator;
pub use machine_status::MachineStatusGenerator;
pub use orchestrator::{DatasetBundle, TelemetryOrchestrator};
pub use package_integrity::PackageIntegrityGenerator;
pub use sampler::Sampler;
pub use series::SeriesGenerator;
pub use timeline::TimeGrid;
pub use warehouse_environment::WarehouseEnvironmentGenerator;
pub use zone_environment::ZoneEnvironmentGenerator;
