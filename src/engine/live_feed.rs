// ==========================================
// 工业物联网监控系统 - 实时状态推送
// ==========================================
// 职责: 按固定周期生成每台设备的最新运行状态快照
// 说明: 仅在完成指定次数后结束，无其他取消机制
// ==========================================

use crate::domain::catalog::machine_ids;
use crate::domain::machine::MachineStatusReading;
use crate::domain::reading::round_to;
use crate::domain::types::MachineStatus;
use crate::engine::sampler::Sampler;
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

/// 默认推送周期 (秒)
pub const DEFAULT_PERIOD_SECS: u64 = 2;
/// 默认推送次数
pub const DEFAULT_TICKS: u32 = 5;

const RUNNING_PROBABILITY: f64 = 0.9;

/// 单次推送的快照
#[derive(Debug, Clone, Serialize)]
pub struct LiveSnapshot {
    pub tick: u32,
    pub taken_at: NaiveDateTime,
    pub readings: Vec<MachineStatusReading>,
}

impl LiveSnapshot {
    pub fn running_count(&self) -> usize {
        self.readings.iter().filter(|r| r.is_running()).count()
    }
}

pub struct LiveStatusFeed {
    machine_ids: Vec<String>,
    sampler: Sampler,
}

impl LiveStatusFeed {
    pub fn new(seed: u64) -> Self {
        Self {
            machine_ids: machine_ids(),
            sampler: Sampler::from_seed(seed),
        }
    }

    /// 生成一次快照 (不等待)
    pub fn snapshot(&mut self, tick: u32) -> LiveSnapshot {
        let taken_at = Local::now().naive_local();
        let mut readings = Vec::with_capacity(self.machine_ids.len());

        for machine_id in &self.machine_ids {
            let (status, rpm, energy) = if self.sampler.chance(RUNNING_PROBABILITY) {
                (
                    MachineStatus::Running,
                    self.sampler.uniform(1400.0, 1700.0),
                    self.sampler.uniform(18.0, 23.0),
                )
            } else {
                (MachineStatus::Stopped, 0.0, self.sampler.uniform(0.5, 2.0))
            };

            readings.push(MachineStatusReading {
                timestamp: taken_at,
                machine_id: machine_id.clone(),
                rpm: round_to(rpm, 0),
                energy_kwh: round_to(energy, 2),
                status,
            });
        }

        LiveSnapshot {
            tick,
            taken_at,
            readings,
        }
    }

    /// 按周期推送快照
    ///
    /// # 参数
    /// - `ticks`: 推送次数
    /// - `period`: 推送周期
    /// - `sink`: 快照消费者
    ///
    /// # 返回
    /// 实际推送次数
    pub async fn run<F>(&mut self, ticks: u32, period: Duration, mut sink: F) -> u32
    where
        F: FnMut(LiveSnapshot),
    {
        // interval 不接受零周期
        let period = if period.is_zero() {
            Duration::from_secs(DEFAULT_PERIOD_SECS)
        } else {
            period
        };
        let mut timer = interval(period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        for tick in 1..=ticks {
            timer.tick().await;
            let snapshot = self.snapshot(tick);
            debug!(
                tick,
                running = snapshot.running_count(),
                machines = snapshot.readings.len(),
                "实时状态快照"
            );
            sink(snapshot);
        }

        ticks
    }
}
