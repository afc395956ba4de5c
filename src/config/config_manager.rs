// ==========================================
// 工业物联网监控系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、写入
// 存储: config_kv 表 (key-value + scope)，仅使用 global scope
// ==========================================

use crate::alert::thresholds::AlertThresholds;
use crate::config::error::{ConfigError, ConfigResult};
use crate::config::monitor_config_trait::{LiveFeedSettings, MonitorConfigReader};
use crate::db::{init_config_schema, open_in_memory_connection, open_sqlite_connection};
use crate::domain::types::{AlertKind, Severity};
use crate::engine::generator_config::{DatasetProfile, DEFAULT_SEED};
use crate::engine::live_feed::{DEFAULT_PERIOD_SECS, DEFAULT_TICKS};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, warn};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径（父目录不存在时自动创建）
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = open_sqlite_connection(db_path)?;
        init_config_schema(&conn)?;
        debug!(db_path, "配置库已打开");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 内存配置库 (会话结束即丢弃)
    pub fn in_memory() -> ConfigResult<Self> {
        let conn = open_in_memory_connection()?;
        init_config_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> ConfigResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.lock()?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 写入配置值
    ///
    /// 写入前校验键名与取值格式，非法值直接拒绝
    pub fn set_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let value = value.trim();
        config_keys::validate(key, value)?;

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at)
             VALUES ('global', ?1, ?2, datetime('now'))
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;

        debug!(key, value, "配置已写入");
        Ok(())
    }

    /// 删除配置值 (恢复默认)
    ///
    /// # 返回
    /// 是否删除了已存在的配置
    pub fn remove_value(&self, key: &str) -> ConfigResult<bool> {
        let conn = self.lock()?;
        let affected = conn.execute(
            "DELETE FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
        )?;
        Ok(affected > 0)
    }

    /// 列出全部 global 配置 (按键排序)
    pub fn list_values(&self) -> ConfigResult<Vec<(String, String)>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut values = Vec::new();
        for row in rows {
            values.push(row?);
        }
        Ok(values)
    }

    /// 读取并解析配置值，缺失时用默认值，解析失败时告警并回退默认值
    fn parse_or_default<T>(&self, key: &str, default: T) -> ConfigResult<T>
    where
        T: FromStr + Display,
        T::Err: Display,
    {
        let Some(raw) = self.get_global_config_value(key)? else {
            return Ok(default);
        };

        match raw.trim().parse::<T>() {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(
                    config_key = key,
                    raw_value = %raw,
                    default = %default,
                    error = %e,
                    "配置值解析失败，使用默认值"
                );
                Ok(default)
            }
        }
    }
}

#[async_trait]
impl MonitorConfigReader for ConfigManager {
    async fn get_dataset_profile(&self) -> ConfigResult<DatasetProfile> {
        self.parse_or_default(config_keys::DATASET_PROFILE, DatasetProfile::default())
    }

    async fn get_generator_seed(&self) -> ConfigResult<u64> {
        self.parse_or_default(config_keys::GENERATOR_SEED, DEFAULT_SEED)
    }

    async fn load_alert_thresholds(&self) -> ConfigResult<AlertThresholds> {
        let mut thresholds = AlertThresholds::default();

        for kind in AlertKind::ALL {
            if let Some(default) = thresholds.threshold(kind) {
                let key = config_keys::alert_threshold(kind);
                let value = self.parse_or_default(&key, default)?;
                if value.is_finite() {
                    thresholds.set_threshold(kind, value);
                } else {
                    warn!(config_key = %key, "告警阈值非有限数，使用默认值");
                }
            }

            let key = config_keys::alert_severity(kind);
            let severity: Severity = self.parse_or_default(&key, thresholds.severity(kind))?;
            thresholds.set_severity(kind, severity);
        }

        Ok(thresholds)
    }

    async fn get_live_feed_settings(&self) -> ConfigResult<LiveFeedSettings> {
        let mut period_secs =
            self.parse_or_default(config_keys::LIVE_FEED_PERIOD_SECS, DEFAULT_PERIOD_SECS)?;
        if period_secs == 0 {
            warn!(
                config_key = config_keys::LIVE_FEED_PERIOD_SECS,
                "推送周期不能为 0，使用默认值"
            );
            period_secs = DEFAULT_PERIOD_SECS;
        }
        let ticks = self.parse_or_default(config_keys::LIVE_FEED_TICKS, DEFAULT_TICKS)?;

        Ok(LiveFeedSettings {
            period: Duration::from_secs(period_secs),
            ticks,
        })
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    use crate::config::error::{ConfigError, ConfigResult};
    use crate::domain::types::{AlertKind, Severity};
    use crate::engine::generator_config::DatasetProfile;

    // 数据生成
    pub const DATASET_PROFILE: &str = "dataset_profile";
    pub const GENERATOR_SEED: &str = "generator_seed";

    // 实时推送
    pub const LIVE_FEED_PERIOD_SECS: &str = "live_feed.period_secs";
    pub const LIVE_FEED_TICKS: &str = "live_feed.ticks";

    /// alert.<kind>.threshold
    pub fn alert_threshold(kind: AlertKind) -> String {
        format!("alert.{}.threshold", kind.config_key())
    }

    /// alert.<kind>.severity
    pub fn alert_severity(kind: AlertKind) -> String {
        format!("alert.{}.severity", kind.config_key())
    }

    /// 全部可写配置键
    pub fn all_keys() -> Vec<String> {
        let mut keys = vec![
            DATASET_PROFILE.to_string(),
            GENERATOR_SEED.to_string(),
            LIVE_FEED_PERIOD_SECS.to_string(),
            LIVE_FEED_TICKS.to_string(),
        ];
        for kind in AlertKind::ALL {
            if kind_has_threshold(kind) {
                keys.push(alert_threshold(kind));
            }
            keys.push(alert_severity(kind));
        }
        keys
    }

    fn kind_has_threshold(kind: AlertKind) -> bool {
        !matches!(
            kind,
            AlertKind::MachineFault | AlertKind::LowStock | AlertKind::BrokenSeal
        )
    }

    fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.into(),
        }
    }

    /// 校验键名与取值格式
    pub fn validate(key: &str, value: &str) -> ConfigResult<()> {
        match key {
            DATASET_PROFILE => value
                .parse::<DatasetProfile>()
                .map(|_| ())
                .map_err(|e| invalid(key, e)),
            GENERATOR_SEED => value
                .parse::<u64>()
                .map(|_| ())
                .map_err(|e| invalid(key, e.to_string())),
            LIVE_FEED_TICKS => value
                .parse::<u32>()
                .map(|_| ())
                .map_err(|e| invalid(key, e.to_string())),
            LIVE_FEED_PERIOD_SECS => match value.parse::<u64>() {
                Ok(0) => Err(invalid(key, "推送周期必须大于 0")),
                Ok(_) => Ok(()),
                Err(e) => Err(invalid(key, e.to_string())),
            },
            _ => validate_alert_key(key, value),
        }
    }

    fn validate_alert_key(key: &str, value: &str) -> ConfigResult<()> {
        for kind in AlertKind::ALL {
            if kind_has_threshold(kind) && key == alert_threshold(kind) {
                return match value.parse::<f64>() {
                    Ok(v) if v.is_finite() => Ok(()),
                    Ok(_) => Err(invalid(key, "阈值必须是有限数")),
                    Err(e) => Err(invalid(key, e.to_string())),
                };
            }
            if key == alert_severity(kind) {
                return value
                    .parse::<Severity>()
                    .map(|_| ())
                    .map_err(|e| invalid(key, e));
            }
        }
        Err(ConfigError::UnknownKey(key.to_string()))
    }
}
