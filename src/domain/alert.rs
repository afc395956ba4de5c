// ==========================================
// 工业物联网监控系统 - 告警领域模型
// ==========================================
// 用途: 阈值告警结果，只读数据
// 红线: 每条告警必须带可解释的 message
// ==========================================

use crate::domain::types::{AlertKind, MonitorDomain, Severity};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// Alert - 告警
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub alert_id: String,
    pub domain: MonitorDomain,
    pub kind: AlertKind,
    pub entity_id: String,

    // ===== 触发值 =====
    pub value: Option<f64>,     // 实测值 (封条类告警为 None)
    pub threshold: Option<f64>, // 阈值 (冷链为目标温度)

    pub severity: Severity,
    pub observed_at: NaiveDateTime, // 对应读数的采样时间
    pub message: String,
}

impl Alert {
    pub fn new(
        domain: MonitorDomain,
        kind: AlertKind,
        entity_id: &str,
        value: Option<f64>,
        threshold: Option<f64>,
        severity: Severity,
        observed_at: NaiveDateTime,
        message: String,
    ) -> Self {
        Self {
            alert_id: Uuid::new_v4().to_string(),
            domain,
            kind,
            entity_id: entity_id.to_string(),
            value,
            threshold,
            severity,
            observed_at,
            message,
        }
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}
