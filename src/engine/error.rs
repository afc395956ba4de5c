// ==========================================
// 工业物联网监控系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("时间窗口无效: window_days={0}")]
    InvalidWindow(i64),

    #[error("采样间隔无效: step_minutes={0}")]
    InvalidStep(i64),

    #[error("实体数量无效 (domain={domain}): requested={requested}, available={available}")]
    InvalidEntityCount {
        domain: String,
        requested: usize,
        available: usize,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;
