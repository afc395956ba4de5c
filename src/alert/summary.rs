// ==========================================
// 工业物联网监控系统 - 告警汇总
// ==========================================

use crate::domain::alert::Alert;
use crate::domain::types::{MonitorDomain, Severity};
use serde::Serialize;
use std::collections::BTreeMap;

/// 告警计数: 按监控域 / 按级别
///
/// total 始终等于 by_domain 之和，也等于 by_severity 之和
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlertSummary {
    pub total: usize,
    pub by_domain: BTreeMap<MonitorDomain, usize>,
    pub by_severity: BTreeMap<Severity, usize>,
}

impl AlertSummary {
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        let mut summary = Self::default();
        for alert in alerts {
            summary.total += 1;
            *summary.by_domain.entry(alert.domain).or_insert(0) += 1;
            *summary.by_severity.entry(alert.severity).or_insert(0) += 1;
        }
        summary
    }

    pub fn count_for(&self, domain: MonitorDomain) -> usize {
        self.by_domain.get(&domain).copied().unwrap_or(0)
    }

    pub fn critical(&self) -> usize {
        self.by_severity.get(&Severity::Critical).copied().unwrap_or(0)
    }

    pub fn warning(&self) -> usize {
        self.by_severity.get(&Severity::Warning).copied().unwrap_or(0)
    }
}
