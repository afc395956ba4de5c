// ==========================================
// 工业物联网监控系统 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置数据库错误: {0}")]
    Database(String),

    #[error("配置锁获取失败: {0}")]
    LockError(String),

    #[error("配置值无效 (key={key}): {message}")]
    InvalidValue { key: String, message: String },

    #[error("未知配置键: {0}")]
    UnknownKey(String),

    #[error("配置目录创建失败: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for ConfigError {
    fn from(err: rusqlite::Error) -> Self {
        ConfigError::Database(err.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
