// ==========================================
// 工业物联网监控系统 - 监控配置读取 Trait
// ==========================================
// 职责: 定义会话启动所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::alert::thresholds::AlertThresholds;
use crate::config::error::ConfigResult;
use crate::engine::generator_config::DatasetProfile;
use async_trait::async_trait;
use std::time::Duration;

/// 实时推送参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveFeedSettings {
    pub period: Duration,
    pub ticks: u32,
}

// ==========================================
// MonitorConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait MonitorConfigReader: Send + Sync {
    /// 获取数据规模档位
    ///
    /// # 默认值
    /// - FULL
    async fn get_dataset_profile(&self) -> ConfigResult<DatasetProfile>;

    /// 获取生成器随机种子
    ///
    /// # 默认值
    /// - 42
    async fn get_generator_seed(&self) -> ConfigResult<u64>;

    /// 加载告警阈值表（默认表 + alert.<kind>.threshold / alert.<kind>.severity 覆盖）
    async fn load_alert_thresholds(&self) -> ConfigResult<AlertThresholds>;

    /// 获取实时推送参数
    ///
    /// # 默认值
    /// - 周期 2 秒，5 次
    async fn get_live_feed_settings(&self) -> ConfigResult<LiveFeedSettings>;
}
