// ==========================================
// 工业物联网监控系统 - 环境领域模型
// ==========================================
// 职责: 厂区环境读数 + 仓库环境读数
// ==========================================

use crate::domain::reading::Reading;
use crate::domain::types::{MonitorDomain, ZoneType};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// ZoneEnvironmentReading - 厂区环境读数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneEnvironmentReading {
    pub timestamp: NaiveDateTime,
    pub zone_id: String,
    pub zone_type: ZoneType,
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub co2_ppm: f64,
    pub aqi: f64,      // 空气质量指数
    pub noise_db: f64, // 噪声 (dB)
}

impl ZoneEnvironmentReading {
    pub const HUMIDITY_RANGE: (f64, f64) = (30.0, 85.0);
    pub const MIN_CO2_PPM: f64 = 400.0;
    pub const MIN_AQI: f64 = 0.0;
    pub const MIN_NOISE_DB: f64 = 0.0;
}

impl Reading for ZoneEnvironmentReading {
    const DOMAIN: MonitorDomain = MonitorDomain::ZoneEnvironment;

    fn entity_id(&self) -> &str {
        &self.zone_id
    }

    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

// ==========================================
// WarehouseEnvironmentReading - 仓库环境读数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseEnvironmentReading {
    pub timestamp: NaiveDateTime,
    pub warehouse_id: String,
    pub temp: f64,
    pub humidity: f64,
    pub co2: f64,
    pub aqi: f64,
}

impl WarehouseEnvironmentReading {
    pub const HUMIDITY_RANGE: (f64, f64) = (30.0, 80.0);
    pub const MIN_CO2: f64 = 0.0;
    pub const MIN_AQI: f64 = 0.0;
}

impl Reading for WarehouseEnvironmentReading {
    const DOMAIN: MonitorDomain = MonitorDomain::WarehouseEnvironment;

    fn entity_id(&self) -> &str {
        &self.warehouse_id
    }

    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}
