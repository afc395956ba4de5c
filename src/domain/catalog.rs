// ==========================================
// 工业物联网监控系统 - 实体目录
// ==========================================
// 职责: 设备/产线/厂区/仓库/货运/SKU/包裹的静态枚举与档案参数
// 说明: 档案参数决定各监控域的分布基线
// ==========================================

use crate::domain::types::{HealthTier, ProductType, ZoneType};

/// 设备数量
pub const MACHINE_COUNT: usize = 10;
/// 产线数量 (Line_A .. Line_E)
pub const LINE_COUNT: usize = 5;
/// 厂区数量
pub const ZONE_COUNT: usize = 7;
/// 仓库数量
pub const WAREHOUSE_COUNT: usize = 5;
/// 货车数量
pub const TRUCK_COUNT: usize = 15;
/// SKU 目录规模 (SKU_2000 .. SKU_2050)
pub const SKU_CATALOG_SIZE: usize = 51;
/// 包裹目录规模 (PKG_500000 .. PKG_500100)
pub const PACKAGE_CATALOG_SIZE: usize = 101;

/// 故障高发货车（冷链温度偏移概率更高）
pub const PROBLEM_TRUCKS: [&str; 3] = ["TRUCK_003", "TRUCK_007", "TRUCK_012"];

/// 冷链路线起点 (纬度, 经度)
pub const GPS_ROUTES: [(f64, f64); 10] = [
    (40.7128, -74.0060),  // New York
    (34.0522, -118.2437), // Los Angeles
    (41.8781, -87.6298),  // Chicago
    (29.7604, -95.3698),  // Houston
    (33.4484, -112.0740), // Phoenix
    (39.9526, -75.1652),  // Philadelphia
    (32.7767, -96.7970),  // Dallas
    (37.7749, -122.4194), // San Francisco
    (47.6062, -122.3321), // Seattle
    (25.7617, -80.1918),  // Miami
];

// ==========================================
// 实体编号
// ==========================================

pub fn machine_ids() -> Vec<String> {
    (1..=MACHINE_COUNT).map(|i| format!("Machine_{:02}", i)).collect()
}

pub fn line_ids() -> Vec<String> {
    (0..LINE_COUNT)
        .map(|i| format!("Line_{}", (b'A' + i as u8) as char))
        .collect()
}

pub fn zone_ids() -> Vec<String> {
    (1..=ZONE_COUNT).map(|i| format!("Zone_{}", i)).collect()
}

pub fn warehouse_ids() -> Vec<String> {
    (1..=WAREHOUSE_COUNT).map(|i| format!("WH_{:03}", i)).collect()
}

pub fn truck_ids() -> Vec<String> {
    (1..=TRUCK_COUNT).map(|i| format!("TRUCK_{:03}", i)).collect()
}

pub fn sku_ids() -> Vec<String> {
    (0..SKU_CATALOG_SIZE)
        .map(|i| format!("SKU_{:04}", 2000 + i))
        .collect()
}

pub fn package_ids() -> Vec<String> {
    (0..PACKAGE_CATALOG_SIZE)
        .map(|i| format!("PKG_{:06}", 500_000 + i))
        .collect()
}

// ==========================================
// 设备档案
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct MachineProfile {
    pub machine_id: String,
    pub health: HealthTier,
    pub age_months: u32,
}

impl MachineProfile {
    /// 初始累计运行小时 (按每天 16 小时运行估算)
    pub fn initial_runtime_hours(&self) -> f64 {
        self.age_months as f64 * 30.0 * 16.0
    }
}

pub fn machine_profiles() -> Vec<MachineProfile> {
    use HealthTier::*;
    let table: [(HealthTier, u32); MACHINE_COUNT] = [
        (Excellent, 6),
        (Good, 18),
        (Warning, 36),
        (Critical, 60),
        (Good, 12),
        (Excellent, 3),
        (Warning, 42),
        (Good, 24),
        (Critical, 72),
        (Excellent, 9),
    ];

    machine_ids()
        .into_iter()
        .zip(table)
        .map(|(machine_id, (health, age_months))| MachineProfile {
            machine_id,
            health,
            age_months,
        })
        .collect()
}

// ==========================================
// 厂区档案
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneProfile {
    pub zone_id: String,
    pub zone_type: ZoneType,
    pub base_temp_c: f64,
    pub base_co2_ppm: f64,
}

pub fn zone_profiles() -> Vec<ZoneProfile> {
    use ZoneType::*;
    let table: [(ZoneType, f64, f64); ZONE_COUNT] = [
        (ProductionFloor, 24.0, 800.0),
        (AssemblyLine, 22.0, 900.0),
        (QualityControl, 20.0, 600.0),
        (Warehouse, 18.0, 500.0),
        (OfficeArea, 23.0, 700.0),
        (ChemicalStorage, 16.0, 450.0),
        (LoadingDock, 26.0, 1000.0),
    ];

    zone_ids()
        .into_iter()
        .zip(table)
        .map(|(zone_id, (zone_type, base_temp_c, base_co2_ppm))| ZoneProfile {
            zone_id,
            zone_type,
            base_temp_c,
            base_co2_ppm,
        })
        .collect()
}

// ==========================================
// 产线档案
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct LineProfile {
    pub line_id: String,
    pub efficiency: f64,
    pub reliability: f64,
    pub product: ProductType,
}

pub fn line_profiles() -> Vec<LineProfile> {
    use ProductType::*;
    let table: [(f64, f64, ProductType); LINE_COUNT] = [
        (0.92, 0.95, Electronics),
        (0.88, 0.90, Automotive),
        (0.94, 0.97, Pharmaceuticals),
        (0.85, 0.87, FoodProcessing),
        (0.90, 0.92, Textiles),
    ];

    line_ids()
        .into_iter()
        .zip(table)
        .map(|(line_id, (efficiency, reliability, product))| LineProfile {
            line_id,
            efficiency,
            reliability,
            product,
        })
        .collect()
}

// ==========================================
// 冷链货运档案
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentProfile {
    pub shipment_id: String,
    pub truck_id: String,
    pub route_origin: (f64, f64),
    pub target_temp_c: f64,
    pub tolerance_c: f64,
    pub cargo: &'static str,
}

impl ShipmentProfile {
    pub fn is_problem_truck(&self) -> bool {
        PROBLEM_TRUCKS.contains(&self.truck_id.as_str())
    }
}

pub fn shipment_profiles() -> Vec<ShipmentProfile> {
    let table: [(f64, f64, &'static str); 10] = [
        (-18.0, 2.0, "Frozen Foods"),
        (4.0, 2.0, "Dairy Products"),
        (2.0, 1.0, "Vaccines"),
        (6.0, 3.0, "Fresh Produce"),
        (-15.0, 3.0, "Ice Cream"),
        (3.0, 1.0, "Blood Products"),
        (8.0, 2.0, "Beverages"),
        (-20.0, 2.0, "Medical Samples"),
        (5.0, 2.0, "Meat Products"),
        (7.0, 3.0, "Chemicals"),
    ];
    let trucks = truck_ids();

    table
        .iter()
        .enumerate()
        .map(|(i, (target, tolerance, cargo))| ShipmentProfile {
            shipment_id: format!("SHIP_{:04}", 1000 + i),
            truck_id: trucks[i % trucks.len()].clone(),
            route_origin: GPS_ROUTES[i % GPS_ROUTES.len()],
            target_temp_c: *target,
            tolerance_c: *tolerance,
            cargo,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_formats() {
        assert_eq!(machine_ids().first().unwrap(), "Machine_01");
        assert_eq!(machine_ids().last().unwrap(), "Machine_10");
        assert_eq!(line_ids(), vec!["Line_A", "Line_B", "Line_C", "Line_D", "Line_E"]);
        assert_eq!(warehouse_ids()[4], "WH_005");
        assert_eq!(sku_ids().last().unwrap(), "SKU_2050");
        assert_eq!(package_ids()[0], "PKG_500000");
        assert_eq!(package_ids().len(), PACKAGE_CATALOG_SIZE);
    }

    #[test]
    fn test_shipment_truck_assignment() {
        let shipments = shipment_profiles();
        assert_eq!(shipments.len(), 10);
        assert_eq!(shipments[2].truck_id, "TRUCK_003");
        assert!(shipments[2].is_problem_truck());
        assert!(!shipments[0].is_problem_truck());
        assert_eq!(shipments[9].route_origin, GPS_ROUTES[9]);
    }

    #[test]
    fn test_machine_runtime_baseline() {
        let profiles = machine_profiles();
        assert_eq!(profiles[3].health, HealthTier::Critical);
        assert_eq!(profiles[0].initial_runtime_hours(), 6.0 * 30.0 * 16.0);
    }
}
