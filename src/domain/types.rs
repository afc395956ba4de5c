// ==========================================
// 工业物联网监控系统 - 领域类型定义
// ==========================================
// 职责: 监控域、设备状态、告警级别等枚举
// 序列化格式: SCREAMING_SNAKE_CASE (与导出文件一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 监控域 (Monitor Domain)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MonitorDomain {
    MachineHealth,        // 预测性维护
    MachineStatus,        // 设备运行状态
    ZoneEnvironment,      // 厂区环境
    LineOee,              // 产线 OEE
    ColdChain,            // 冷链运输
    WarehouseEnvironment, // 仓库环境
    Inventory,            // 库存
    PackageIntegrity,     // 包裹完整性
}

impl MonitorDomain {
    /// 全部监控域（固定顺序）
    pub const ALL: [MonitorDomain; 8] = [
        MonitorDomain::MachineHealth,
        MonitorDomain::MachineStatus,
        MonitorDomain::ZoneEnvironment,
        MonitorDomain::LineOee,
        MonitorDomain::ColdChain,
        MonitorDomain::WarehouseEnvironment,
        MonitorDomain::Inventory,
        MonitorDomain::PackageIntegrity,
    ];

    /// 机器可读名称（用于导出文件名和配置键）
    pub fn as_str(&self) -> &'static str {
        match self {
            MonitorDomain::MachineHealth => "machine_health",
            MonitorDomain::MachineStatus => "machine_status",
            MonitorDomain::ZoneEnvironment => "zone_environment",
            MonitorDomain::LineOee => "line_oee",
            MonitorDomain::ColdChain => "cold_chain",
            MonitorDomain::WarehouseEnvironment => "warehouse_environment",
            MonitorDomain::Inventory => "inventory",
            MonitorDomain::PackageIntegrity => "package_integrity",
        }
    }
}

impl fmt::Display for MonitorDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MonitorDomain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        MonitorDomain::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == normalized)
            .ok_or_else(|| format!("未知监控域: {}", s))
    }
}

// ==========================================
// 设备健康等级 (Health Tier)
// ==========================================
// 顺序: Excellent < Good < Warning < Critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthTier {
    Excellent, // 优
    Good,      // 良
    Warning,   // 预警
    Critical,  // 危险
}

impl fmt::Display for HealthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthTier::Excellent => write!(f, "EXCELLENT"),
            HealthTier::Good => write!(f, "GOOD"),
            HealthTier::Warning => write!(f, "WARNING"),
            HealthTier::Critical => write!(f, "CRITICAL"),
        }
    }
}

// ==========================================
// 设备运行状态 (Machine Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MachineStatus {
    Running,     // 运行
    Stopped,     // 停机
    Maintenance, // 维护
    Fault,       // 故障
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineStatus::Running => write!(f, "RUNNING"),
            MachineStatus::Stopped => write!(f, "STOPPED"),
            MachineStatus::Maintenance => write!(f, "MAINTENANCE"),
            MachineStatus::Fault => write!(f, "FAULT"),
        }
    }
}

impl FromStr for MachineStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "RUNNING" => Ok(MachineStatus::Running),
            "STOPPED" => Ok(MachineStatus::Stopped),
            "MAINTENANCE" => Ok(MachineStatus::Maintenance),
            "FAULT" => Ok(MachineStatus::Fault),
            other => Err(format!("未知设备状态: {}", other)),
        }
    }
}

// ==========================================
// 厂区类型 (Zone Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZoneType {
    ProductionFloor, // 生产车间
    AssemblyLine,    // 装配线
    QualityControl,  // 质检区
    Warehouse,       // 仓储区
    OfficeArea,      // 办公区
    ChemicalStorage, // 化学品库
    LoadingDock,     // 装卸区
}

impl ZoneType {
    /// 区域基础噪声 (dB)
    ///
    /// 生产类区域 75，安静区域 45，其余 55
    pub fn base_noise_db(&self) -> f64 {
        match self {
            ZoneType::ProductionFloor | ZoneType::AssemblyLine | ZoneType::LoadingDock => 75.0,
            ZoneType::QualityControl | ZoneType::OfficeArea => 45.0,
            ZoneType::Warehouse | ZoneType::ChemicalStorage => 55.0,
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneType::ProductionFloor => write!(f, "PRODUCTION_FLOOR"),
            ZoneType::AssemblyLine => write!(f, "ASSEMBLY_LINE"),
            ZoneType::QualityControl => write!(f, "QUALITY_CONTROL"),
            ZoneType::Warehouse => write!(f, "WAREHOUSE"),
            ZoneType::OfficeArea => write!(f, "OFFICE_AREA"),
            ZoneType::ChemicalStorage => write!(f, "CHEMICAL_STORAGE"),
            ZoneType::LoadingDock => write!(f, "LOADING_DOCK"),
        }
    }
}

// ==========================================
// 产品类型 (Product Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    Electronics,
    Automotive,
    Pharmaceuticals,
    FoodProcessing,
    Textiles,
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductType::Electronics => write!(f, "ELECTRONICS"),
            ProductType::Automotive => write!(f, "AUTOMOTIVE"),
            ProductType::Pharmaceuticals => write!(f, "PHARMACEUTICALS"),
            ProductType::FoodProcessing => write!(f, "FOOD_PROCESSING"),
            ProductType::Textiles => write!(f, "TEXTILES"),
        }
    }
}

// ==========================================
// 车厢门状态 / 封条状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DoorStatus {
    Closed,
    Open,
}

impl fmt::Display for DoorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoorStatus::Closed => write!(f, "CLOSED"),
            DoorStatus::Open => write!(f, "OPEN"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SealStatus {
    Intact,
    Broken,
}

impl fmt::Display for SealStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SealStatus::Intact => write!(f, "INTACT"),
            SealStatus::Broken => write!(f, "BROKEN"),
        }
    }
}

// ==========================================
// 告警级别 (Severity)
// ==========================================
// 顺序: Warning < Critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Warning,  // 警告，需要关注
    Critical, // 严重，尽快处理
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "WARNING" => Ok(Severity::Warning),
            "CRITICAL" => Ok(Severity::Critical),
            other => Err(format!("未知告警级别: {}", other)),
        }
    }
}

// ==========================================
// 告警类型 (Alert Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    HighVibration,
    HighTemperature,
    HighFailureRisk,
    MachineFault,
    HighCo2,
    PoorAirQuality,
    HighNoise,
    LowOee,
    TemperatureDeviation,
    LowStock,
    HighTilt,
    HighLightExposure,
    BrokenSeal,
}

impl AlertKind {
    pub const ALL: [AlertKind; 13] = [
        AlertKind::HighVibration,
        AlertKind::HighTemperature,
        AlertKind::HighFailureRisk,
        AlertKind::MachineFault,
        AlertKind::HighCo2,
        AlertKind::PoorAirQuality,
        AlertKind::HighNoise,
        AlertKind::LowOee,
        AlertKind::TemperatureDeviation,
        AlertKind::LowStock,
        AlertKind::HighTilt,
        AlertKind::HighLightExposure,
        AlertKind::BrokenSeal,
    ];

    /// 配置键片段 (alert.<key>.threshold / alert.<key>.severity)
    pub fn config_key(&self) -> &'static str {
        match self {
            AlertKind::HighVibration => "high_vibration",
            AlertKind::HighTemperature => "high_temperature",
            AlertKind::HighFailureRisk => "high_failure_risk",
            AlertKind::MachineFault => "machine_fault",
            AlertKind::HighCo2 => "high_co2",
            AlertKind::PoorAirQuality => "poor_air_quality",
            AlertKind::HighNoise => "high_noise",
            AlertKind::LowOee => "low_oee",
            AlertKind::TemperatureDeviation => "temperature_deviation",
            AlertKind::LowStock => "low_stock",
            AlertKind::HighTilt => "high_tilt",
            AlertKind::HighLightExposure => "high_light_exposure",
            AlertKind::BrokenSeal => "broken_seal",
        }
    }

    /// 展示名称
    pub fn label(&self) -> &'static str {
        match self {
            AlertKind::HighVibration => "High Vibration",
            AlertKind::HighTemperature => "High Temperature",
            AlertKind::HighFailureRisk => "High Failure Risk",
            AlertKind::MachineFault => "Machine Fault",
            AlertKind::HighCo2 => "High CO2",
            AlertKind::PoorAirQuality => "Poor Air Quality",
            AlertKind::HighNoise => "High Noise",
            AlertKind::LowOee => "Low OEE",
            AlertKind::TemperatureDeviation => "Temperature Deviation",
            AlertKind::LowStock => "Low Stock",
            AlertKind::HighTilt => "High Tilt",
            AlertKind::HighLightExposure => "High Light Exposure",
            AlertKind::BrokenSeal => "Broken Seal",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_parse_accepts_dashes() {
        assert_eq!(
            "cold-chain".parse::<MonitorDomain>().unwrap(),
            MonitorDomain::ColdChain
        );
        assert_eq!(
            "LINE_OEE".parse::<MonitorDomain>().unwrap(),
            MonitorDomain::LineOee
        );
        assert!("plant".parse::<MonitorDomain>().is_err());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::Warning);
        assert_eq!("critical".parse::<Severity>().unwrap(), Severity::Critical);
    }

    #[test]
    fn test_zone_base_noise() {
        assert_eq!(ZoneType::LoadingDock.base_noise_db(), 75.0);
        assert_eq!(ZoneType::OfficeArea.base_noise_db(), 45.0);
        assert_eq!(ZoneType::ChemicalStorage.base_noise_db(), 55.0);
    }
}
