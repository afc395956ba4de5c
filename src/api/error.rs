// ==========================================
// 工业物联网监控系统 - API层错误类型
// ==========================================
// 职责: 汇总配置层/引擎层/导出错误，转换为用户可读的错误消息
// ==========================================

use crate::config::error::ConfigError;
use crate::engine::error::EngineError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("筛选条件不适用于监控域 {domain}: {filter}")]
    UnsupportedFilter { domain: String, filter: String },

    // ==========================================
    // 下层错误
    // ==========================================
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    // ==========================================
    // 导出错误
    // ==========================================
    #[error("数据导出失败: {0}")]
    Export(String),

    #[error("文件读写失败: {0}")]
    Io(#[from] std::io::Error),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<csv::Error> for ApiError {
    fn from(err: csv::Error) -> Self {
        ApiError::Export(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
