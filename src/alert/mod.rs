// ==========================================
// 工业物联网监控系统 - 告警层
// ==========================================
// 职责: 阈值表 + 最新读数告警评估 + 汇总
// ==========================================

pub mod evaluator;
pub mod summary;
pub mod thresholds;

pub use evaluator::AlertEvaluator;
pub use summary::AlertSummary;
pub use thresholds::{AlertRule, AlertThresholds};
