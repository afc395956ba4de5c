// ==========================================
// 工业物联网监控系统 - 读数通用接口
// ==========================================
// 用途: 查询层按实体/时间窗口处理任意监控域的表
// ==========================================

use crate::domain::types::MonitorDomain;
use chrono::NaiveDateTime;

// ==========================================
// Trait: Reading
// ==========================================
pub trait Reading {
    /// 所属监控域
    const DOMAIN: MonitorDomain;

    /// 实体编号 (设备/厂区/货运/SKU/包裹 ...)
    fn entity_id(&self) -> &str;

    /// 采样时间
    fn timestamp(&self) -> NaiveDateTime;
}

/// 四舍五入到指定小数位
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(12.345, 2), 12.35);
        assert_eq!(round_to(12.34, 1), 12.3);
        assert_eq!(round_to(1499.6, 0), 1500.0);
        assert_eq!(round_to(-18.26, 1), -18.3);
    }
}
