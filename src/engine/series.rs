// ==========================================
// 工业物联网监控系统 - 时间序列生成器接口
// ==========================================
// 职责: 定义各监控域生成器的统一形态
// 规则: 网格 -> 逐实体逐时间戳 -> 噪声 + 突发 -> 截断 + 取整
// ==========================================

use crate::domain::reading::Reading;
use crate::engine::sampler::Sampler;
use crate::engine::timeline::TimeGrid;

/// 时间序列生成器
///
/// 生成器之间互不依赖，不共享状态
pub trait SeriesGenerator {
    /// 输出记录类型
    type Row: Reading;

    /// 采样间隔 (分钟)
    const STEP_MINUTES: i64;

    /// 在给定时间网格上生成全部实体的读数
    ///
    /// # 参数
    /// - `grid`: 时间网格
    /// - `sampler`: 本监控域独占的随机流
    ///
    /// # 返回
    /// 按实体分组、组内按时间升序的记录
    fn generate(&self, grid: &TimeGrid, sampler: &mut Sampler) -> Vec<Self::Row>;
}
