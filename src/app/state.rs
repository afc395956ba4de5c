// ==========================================
// 工业物联网监控系统 - 应用状态
// ==========================================
// 职责: 管理会话级别的共享状态和API实例
// 流程: 配置读取 → 一次性生成数据集 → 装配 MonitorApi
// ==========================================

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDateTime;

use crate::api::error::ApiResult;
use crate::api::monitor_api::MonitorApi;
use crate::config::monitor_config_trait::{LiveFeedSettings, MonitorConfigReader};
use crate::db::default_config_db_path;
use crate::engine::generator_config::{DatasetProfile, GeneratorConfig};
use crate::engine::orchestrator::TelemetryOrchestrator;

/// 配置库路径环境变量
pub const CONFIG_DB_ENV: &str = "IIOT_MONITOR_CONFIG_DB";

/// 会话级覆盖参数（命令行优先于配置库）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOverrides {
    pub profile: Option<DatasetProfile>,
    pub seed: Option<u64>,
    /// 数据集结束时刻（None = 当前时刻）
    pub end_time: Option<NaiveDateTime>,
}

/// 应用状态
///
/// 包含会话数据集与API实例，会话期间只读
pub struct AppState {
    /// 生成参数
    pub generator_config: GeneratorConfig,

    /// 数据档位
    pub profile: DatasetProfile,

    /// 实时推送参数
    pub live_feed: LiveFeedSettings,

    /// 监控视图API
    pub monitor_api: Arc<MonitorApi>,
}

impl AppState {
    /// 读取配置并生成会话数据集
    ///
    /// # 参数
    /// - reader: 配置读取器
    /// - overrides: 命令行覆盖参数
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(ApiError): 配置读取或数据生成失败
    pub async fn load(
        reader: &dyn MonitorConfigReader,
        overrides: SessionOverrides,
    ) -> ApiResult<Self> {
        let profile = match overrides.profile {
            Some(p) => p,
            None => reader.get_dataset_profile().await?,
        };
        let seed = match overrides.seed {
            Some(s) => s,
            None => reader.get_generator_seed().await?,
        };
        let thresholds = reader.load_alert_thresholds().await?;
        let live_feed = reader.get_live_feed_settings().await?;

        let generator_config = match overrides.end_time {
            Some(end_time) => GeneratorConfig::from_profile(profile, seed, end_time),
            None => GeneratorConfig::now(profile, seed),
        };

        tracing::info!(
            profile = %profile,
            seed,
            end_time = %generator_config.end_time,
            "初始化AppState"
        );

        let start = Instant::now();
        let bundle = TelemetryOrchestrator::new().generate_all(&generator_config)?;
        tracing::info!(
            rows = bundle.total_rows(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "会话数据集已生成"
        );

        Ok(Self {
            generator_config,
            profile,
            live_feed,
            monitor_api: Arc::new(MonitorApi::new(Arc::new(bundle), thresholds)),
        })
    }
}

/// 获取配置库路径
///
/// 优先级: 环境变量 IIOT_MONITOR_CONFIG_DB → 用户数据目录
pub fn get_config_db_path() -> String {
    if let Ok(path) = std::env::var(CONFIG_DB_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    default_config_db_path().to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config_manager::{config_keys, ConfigManager};
    use crate::domain::types::MonitorDomain;
    use chrono::NaiveDate;

    fn end() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 9)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_load_uses_configured_profile() {
        let manager = ConfigManager::in_memory().unwrap();
        manager.set_value(config_keys::DATASET_PROFILE, "LITE").unwrap();

        let overrides = SessionOverrides {
            end_time: Some(end()),
            ..Default::default()
        };
        let state = AppState::load(&manager, overrides).await.unwrap();

        assert_eq!(state.profile, DatasetProfile::Lite);
        assert_eq!(state.generator_config.window_days, 1);
        let bundle = state.monitor_api.bundle();
        assert_eq!(bundle.row_count(MonitorDomain::Inventory), 10 * 25);
    }

    #[tokio::test]
    async fn test_overrides_take_precedence() {
        let manager = ConfigManager::in_memory().unwrap();
        manager.set_value(config_keys::GENERATOR_SEED, "1").unwrap();

        let overrides = SessionOverrides {
            profile: Some(DatasetProfile::Lite),
            seed: Some(99),
            end_time: Some(end()),
        };
        let state = AppState::load(&manager, overrides).await.unwrap();
        assert_eq!(state.generator_config.seed, 99);
        assert_eq!(state.monitor_api.bundle().seed, 99);
    }
}
