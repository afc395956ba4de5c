// ==========================================
// 工业物联网监控系统 - 设备领域模型
// ==========================================
// 职责: 预测性维护读数 + 设备运行状态读数
// ==========================================

use crate::domain::reading::Reading;
use crate::domain::types::{HealthTier, MachineStatus, MonitorDomain};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// MachineHealthReading - 预测性维护读数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineHealthReading {
    pub timestamp: NaiveDateTime,
    pub machine_id: String,
    pub vibration_rms: f64,      // 振动有效值 (mm/s)
    pub temperature_c: f64,      // 温度 (°C)
    pub runtime_hours: f64,      // 累计运行小时
    pub failure_risk_score: f64, // 故障风险分 (0-100)
    pub health_status: HealthTier,
}

impl MachineHealthReading {
    pub const FAILURE_RISK_RANGE: (f64, f64) = (0.0, 100.0);
    pub const MIN_VIBRATION: f64 = 0.0;
}

impl Reading for MachineHealthReading {
    const DOMAIN: MonitorDomain = MonitorDomain::MachineHealth;

    fn entity_id(&self) -> &str {
        &self.machine_id
    }

    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

// ==========================================
// MachineStatusReading - 设备运行状态读数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineStatusReading {
    pub timestamp: NaiveDateTime,
    pub machine_id: String,
    pub rpm: f64,        // 转速
    pub energy_kwh: f64, // 能耗 (kWh)
    pub status: MachineStatus,
}

impl MachineStatusReading {
    pub const MIN_RPM: f64 = 0.0;
    pub const MIN_ENERGY_KWH: f64 = 0.0;

    pub fn is_running(&self) -> bool {
        self.status == MachineStatus::Running
    }
}

impl Reading for MachineStatusReading {
    const DOMAIN: MonitorDomain = MonitorDomain::MachineStatus;

    fn entity_id(&self) -> &str {
        &self.machine_id
    }

    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}
