// ==========================================
// 工业物联网监控系统 - 告警阈值表
// ==========================================
// 职责: 每类告警的阈值与级别 (默认值 + 配置覆盖)
// 说明: 低库存按行内再订货点判定，封条/故障为状态类告警，无数值阈值
// ==========================================

use crate::domain::types::{AlertKind, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 单类告警规则
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertRule {
    pub threshold: Option<f64>,
    pub severity: Severity,
}

impl AlertRule {
    fn numeric(threshold: f64, severity: Severity) -> Self {
        Self {
            threshold: Some(threshold),
            severity,
        }
    }

    fn state(severity: Severity) -> Self {
        Self {
            threshold: None,
            severity,
        }
    }
}

/// 告警阈值表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    rules: BTreeMap<AlertKind, AlertRule>,
}

impl AlertThresholds {
    /// 默认规则
    pub fn default_rule(kind: AlertKind) -> AlertRule {
        use Severity::{Critical, Warning};
        match kind {
            AlertKind::HighVibration => AlertRule::numeric(12.0, Warning),
            AlertKind::HighTemperature => AlertRule::numeric(80.0, Critical),
            AlertKind::HighFailureRisk => AlertRule::numeric(70.0, Critical),
            AlertKind::MachineFault => AlertRule::state(Critical),
            AlertKind::HighCo2 => AlertRule::numeric(1500.0, Warning),
            AlertKind::PoorAirQuality => AlertRule::numeric(100.0, Warning),
            AlertKind::HighNoise => AlertRule::numeric(90.0, Warning),
            AlertKind::LowOee => AlertRule::numeric(60.0, Warning),
            AlertKind::TemperatureDeviation => AlertRule::numeric(5.0, Critical),
            AlertKind::LowStock => AlertRule::state(Warning),
            AlertKind::HighTilt => AlertRule::numeric(45.0, Warning),
            AlertKind::HighLightExposure => AlertRule::numeric(1000.0, Warning),
            AlertKind::BrokenSeal => AlertRule::state(Critical),
        }
    }

    pub fn rule(&self, kind: AlertKind) -> AlertRule {
        self.rules
            .get(&kind)
            .copied()
            .unwrap_or_else(|| Self::default_rule(kind))
    }

    /// 数值阈值 (状态类告警返回 None)
    pub fn threshold(&self, kind: AlertKind) -> Option<f64> {
        self.rule(kind).threshold
    }

    pub fn severity(&self, kind: AlertKind) -> Severity {
        self.rule(kind).severity
    }

    /// 覆盖数值阈值
    ///
    /// 状态类告警没有数值阈值，返回 false 且不修改
    pub fn set_threshold(&mut self, kind: AlertKind, threshold: f64) -> bool {
        let mut rule = self.rule(kind);
        if rule.threshold.is_none() {
            return false;
        }
        rule.threshold = Some(threshold);
        self.rules.insert(kind, rule);
        true
    }

    pub fn set_severity(&mut self, kind: AlertKind, severity: Severity) {
        let mut rule = self.rule(kind);
        rule.severity = severity;
        self.rules.insert(kind, rule);
    }

    /// 全部规则 (按告警类型排序)
    pub fn rules(&self) -> Vec<(AlertKind, AlertRule)> {
        AlertKind::ALL.iter().map(|k| (*k, self.rule(*k))).collect()
    }
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            rules: AlertKind::ALL
                .iter()
                .map(|k| (*k, Self::default_rule(*k)))
                .collect(),
        }
    }
}
