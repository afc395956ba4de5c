// ==========================================
// 工业物联网监控系统 - 应用层
// ==========================================
// 职责: 会话启动 (读取配置 → 生成数据集 → 装配 API)
// ==========================================

pub mod state;

// 重导出
pub use state::{get_config_db_path, AppState, SessionOverrides};
