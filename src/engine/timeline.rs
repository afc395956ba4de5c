// ==========================================
// 工业物联网监控系统 - 时间网格
// ==========================================
// 职责: 构造尾随窗口上的固定间隔时间戳序列
// 规则: start = end - window, 时间戳 = start + k * step (k >= 0, 不超过 end)
// ==========================================

use crate::engine::error::{EngineError, EngineResult};
use chrono::{Datelike, Duration, NaiveDateTime, Timelike};

#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub step: Duration,
}

impl TimeGrid {
    /// 构造尾随窗口时间网格
    ///
    /// # 参数
    /// - `end`: 窗口结束时间 (含)
    /// - `window_days`: 窗口天数 (> 0)
    /// - `step_minutes`: 采样间隔分钟 (> 0)
    pub fn trailing(end: NaiveDateTime, window_days: i64, step_minutes: i64) -> EngineResult<Self> {
        if window_days <= 0 {
            return Err(EngineError::InvalidWindow(window_days));
        }
        if step_minutes <= 0 {
            return Err(EngineError::InvalidStep(step_minutes));
        }

        Ok(Self {
            start: end - Duration::days(window_days),
            end,
            step: Duration::minutes(step_minutes),
        })
    }

    /// 网格点数量 = floor(window / step) + 1
    pub fn len(&self) -> usize {
        let span = (self.end - self.start).num_seconds();
        let step = self.step.num_seconds();
        (span / step) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// 按时间顺序生成全部时间戳
    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        (0..self.len())
            .map(|k| self.start + self.step * k as i32)
            .collect()
    }
}

// ==========================================
// 日历因子辅助函数
// ==========================================

/// 小时 (0-23)
pub fn hour_of(ts: NaiveDateTime) -> u32 {
    ts.hour()
}

/// 是否工作日 (周一至周五)
pub fn is_weekday(ts: NaiveDateTime) -> bool {
    ts.weekday().num_days_from_monday() < 5
}

/// 是否运营时段 (6:00 - 22:59)
pub fn is_operating_hour(ts: NaiveDateTime) -> bool {
    (6..=22).contains(&ts.hour())
}

/// 是否工作日运营时段
pub fn is_weekday_operating_hour(ts: NaiveDateTime) -> bool {
    is_weekday(ts) && is_operating_hour(ts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_grid_length_and_bounds() {
        let end = at(2026, 3, 9, 12, 0);
        let grid = TimeGrid::trailing(end, 7, 12).unwrap();
        // 7 天 = 10080 分钟, 10080 / 12 = 840, 含两端 841 个点
        assert_eq!(grid.len(), 841);

        let ts = grid.timestamps();
        assert_eq!(ts.first().copied(), Some(at(2026, 3, 2, 12, 0)));
        assert_eq!(ts.last().copied(), Some(end));
        assert!(ts.windows(2).all(|w| w[1] - w[0] == Duration::minutes(12)));
    }

    #[test]
    fn test_grid_unaligned_step_stops_before_end() {
        let end = at(2026, 3, 9, 12, 0);
        // 1 天 = 1440 分钟, 1440 / 7 = 205.7 -> 206 个点
        let grid = TimeGrid::trailing(end, 1, 7).unwrap();
        let ts = grid.timestamps();
        assert_eq!(ts.len(), 206);
        assert!(*ts.last().unwrap() <= end);
    }

    #[test]
    fn test_grid_rejects_invalid_params() {
        let end = at(2026, 3, 9, 12, 0);
        assert_eq!(
            TimeGrid::trailing(end, 0, 10),
            Err(EngineError::InvalidWindow(0))
        );
        assert_eq!(
            TimeGrid::trailing(end, 7, 0),
            Err(EngineError::InvalidStep(0))
        );
    }

    #[test]
    fn test_calendar_helpers() {
        // 2026-03-07 是周六
        assert!(!is_weekday(at(2026, 3, 7, 10, 0)));
        assert!(is_weekday(at(2026, 3, 9, 10, 0)));
        assert_eq!(hour_of(at(2026, 3, 9, 23, 59)), 23);
        assert!(is_weekday_operating_hour(at(2026, 3, 9, 22, 30)));
        assert!(!is_weekday_operating_hour(at(2026, 3, 9, 23, 0)));
        assert!(!is_weekday_operating_hour(at(2026, 3, 7, 10, 0)));
    }
}
