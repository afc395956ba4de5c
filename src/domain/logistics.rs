// ==========================================
// 工业物联网监控系统 - 供应链领域模型
// ==========================================
// 职责: 冷链运输 / 库存 / 包裹完整性读数
// ==========================================

use crate::domain::reading::Reading;
use crate::domain::types::{DoorStatus, MonitorDomain, SealStatus};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// ColdChainReading - 冷链读数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColdChainReading {
    pub timestamp: NaiveDateTime,
    pub shipment_id: String,
    pub truck_id: String,
    pub cargo_type: String,
    pub cold_storage_temp: f64,
    pub humidity: f64,
    pub gps_lat: f64,
    pub gps_lon: f64,
    pub door_status: DoorStatus,
    pub target_temp: f64,
    pub tolerance: f64,
}

impl ColdChainReading {
    pub const HUMIDITY_RANGE: (f64, f64) = (40.0, 95.0);

    /// 与目标温度的绝对偏差
    pub fn temp_deviation(&self) -> f64 {
        (self.cold_storage_temp - self.target_temp).abs()
    }
}

impl Reading for ColdChainReading {
    const DOMAIN: MonitorDomain = MonitorDomain::ColdChain;

    fn entity_id(&self) -> &str {
        &self.shipment_id
    }

    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

// ==========================================
// InventoryReading - 库存读数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryReading {
    pub timestamp: NaiveDateTime,
    pub sku_id: String,
    pub warehouse_id: String,
    pub stock_level: f64,
    pub reorder_point: f64,
    /// 预计补货时间 (小时)，无待补货时为 None
    pub restock_eta_hours: Option<u32>,
}

impl InventoryReading {
    pub const MIN_STOCK: f64 = 0.0;

    /// 库存是否已触及再订货点
    pub fn is_below_reorder_point(&self) -> bool {
        self.stock_level <= self.reorder_point
    }
}

impl Reading for InventoryReading {
    const DOMAIN: MonitorDomain = MonitorDomain::Inventory;

    fn entity_id(&self) -> &str {
        &self.sku_id
    }

    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

// ==========================================
// PackageIntegrityReading - 包裹完整性读数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageIntegrityReading {
    pub timestamp: NaiveDateTime,
    pub package_id: String,
    pub tilt_angle: f64,
    pub light_exposure_lux: f64,
    pub seal_status: SealStatus,
}

impl PackageIntegrityReading {
    pub const MIN_TILT: f64 = 0.0;
    pub const MIN_LIGHT_LUX: f64 = 0.0;
}

impl Reading for PackageIntegrityReading {
    const DOMAIN: MonitorDomain = MonitorDomain::PackageIntegrity;

    fn entity_id(&self) -> &str {
        &self.package_id
    }

    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}
