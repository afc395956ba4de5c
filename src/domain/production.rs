// ==========================================
// 工业物联网监控系统 - 产线 OEE 领域模型
// ==========================================
// OEE = 可用率 × 性能率 × 质量率
// ==========================================

use crate::domain::reading::Reading;
use crate::domain::types::{MonitorDomain, ProductType};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineOeeReading {
    pub timestamp: NaiveDateTime,
    pub line_id: String,
    pub product_type: ProductType,
    pub availability_percent: f64,
    pub performance_percent: f64,
    pub quality_percent: f64,
    pub oee_percent: f64,
}

impl LineOeeReading {
    pub const PERCENT_RANGE: (f64, f64) = (0.0, 100.0);

    /// 由三项百分比计算 OEE 百分比
    pub fn compute_oee(availability: f64, performance: f64, quality: f64) -> f64 {
        availability * performance * quality / 10_000.0
    }
}

impl Reading for LineOeeReading {
    const DOMAIN: MonitorDomain = MonitorDomain::LineOee;

    fn entity_id(&self) -> &str {
        &self.line_id
    }

    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}
