// ==========================================
// 工业物联网监控系统 - 配置层
// ==========================================
// 职责: 数据档位/随机种子/告警阈值/实时推送参数
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod error;
pub mod monitor_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
pub use monitor_config_trait::{LiveFeedSettings, MonitorConfigReader};
