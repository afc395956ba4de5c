// ==========================================
// 工业物联网监控系统 - 数据生成编排器
// ==========================================
// 用途: 协调八个监控域生成器，产出一次性只读数据集
// 说明: 各生成器使用由主种子派生的独立随机流
// ==========================================

use crate::domain::environment::{WarehouseEnvironmentReading, ZoneEnvironmentReading};
use crate::domain::logistics::{ColdChainReading, InventoryReading, PackageIntegrityReading};
use crate::domain::machine::{MachineHealthReading, MachineStatusReading};
use crate::domain::production::LineOeeReading;
use crate::domain::reading::Reading;
use crate::domain::types::MonitorDomain;
use crate::engine::cold_chain::ColdChainGenerator;
use crate::engine::error::EngineResult;
use crate::engine::generator_config::GeneratorConfig;
use crate::engine::inventory::InventoryGenerator;
use crate::engine::line_oee::LineOeeGenerator;
use crate::engine::machine_health::MachineHealthGenerator;
use crate::engine::machine_status::MachineStatusGenerator;
use crate::engine::package_integrity::PackageIntegrityGenerator;
use crate::engine::sampler::Sampler;
use crate::engine::series::SeriesGenerator;
use crate::engine::timeline::TimeGrid;
use crate::engine::warehouse_environment::WarehouseEnvironmentGenerator;
use crate::engine::zone_environment::ZoneEnvironmentGenerator;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

// ==========================================
// DatasetBundle - 全部监控域数据
// ==========================================

#[derive(Debug, Clone, Serialize)]
pub struct DatasetBundle {
    pub seed: u64,
    pub end_time: NaiveDateTime,
    pub window_days: i64,

    pub machine_health: Vec<MachineHealthReading>,
    pub machine_status: Vec<MachineStatusReading>,
    pub zone_environment: Vec<ZoneEnvironmentReading>,
    pub line_oee: Vec<LineOeeReading>,
    pub cold_chain: Vec<ColdChainReading>,
    pub warehouse_environment: Vec<WarehouseEnvironmentReading>,
    pub inventory: Vec<InventoryReading>,
    pub package_integrity: Vec<PackageIntegrityReading>,
}

impl DatasetBundle {
    /// 指定监控域的记录数
    pub fn row_count(&self, domain: MonitorDomain) -> usize {
        match domain {
            MonitorDomain::MachineHealth => self.machine_health.len(),
            MonitorDomain::MachineStatus => self.machine_status.len(),
            MonitorDomain::ZoneEnvironment => self.zone_environment.len(),
            MonitorDomain::LineOee => self.line_oee.len(),
            MonitorDomain::ColdChain => self.cold_chain.len(),
            MonitorDomain::WarehouseEnvironment => self.warehouse_environment.len(),
            MonitorDomain::Inventory => self.inventory.len(),
            MonitorDomain::PackageIntegrity => self.package_integrity.len(),
        }
    }

    pub fn total_rows(&self) -> usize {
        MonitorDomain::ALL.iter().map(|d| self.row_count(*d)).sum()
    }
}

// ==========================================
// TelemetryOrchestrator - 数据生成编排器
// ==========================================

pub struct TelemetryOrchestrator {
    // 无状态编排器
}

impl TelemetryOrchestrator {
    pub fn new() -> Self {
        Self {}
    }

    /// 生成全部监控域数据
    ///
    /// # 参数
    /// - `config`: 生成参数 (种子/窗口/实体数量)
    ///
    /// # 返回
    /// - Ok(DatasetBundle): 同一种子 + 结束时间下结果完全一致
    /// - Err(EngineError): 参数非法
    pub fn generate_all(&self, config: &GeneratorConfig) -> EngineResult<DatasetBundle> {
        config.validate()?;
        let started = Instant::now();

        info!(
            seed = config.seed,
            window_days = config.window_days,
            end_time = %config.end_time,
            "开始生成监控数据"
        );

        let bundle = DatasetBundle {
            seed: config.seed,
            end_time: config.end_time,
            window_days: config.window_days,
            machine_health: self.run(&MachineHealthGenerator::new(), config)?,
            machine_status: self.run(&MachineStatusGenerator::new(), config)?,
            zone_environment: self.run(&ZoneEnvironmentGenerator::new(), config)?,
            line_oee: self.run(&LineOeeGenerator::new(), config)?,
            cold_chain: self.run(&ColdChainGenerator::new(config.shipment_count), config)?,
            warehouse_environment: self.run(&WarehouseEnvironmentGenerator::new(), config)?,
            inventory: self.run(&InventoryGenerator::new(config.sku_count), config)?,
            package_integrity: self.run(&PackageIntegrityGenerator::new(config.package_count), config)?,
        };

        info!(
            total_rows = bundle.total_rows(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "监控数据生成完成"
        );

        Ok(bundle)
    }

    /// 运行单个生成器: 构造网格 + 派生随机流
    fn run<G: SeriesGenerator>(
        &self,
        generator: &G,
        config: &GeneratorConfig,
    ) -> EngineResult<Vec<G::Row>> {
        let domain = <G::Row as Reading>::DOMAIN;
        let grid = TimeGrid::trailing(config.end_time, config.window_days, G::STEP_MINUTES)?;
        let mut sampler = Sampler::for_domain(config.seed, domain);

        let rows = generator.generate(&grid, &mut sampler);
        debug!(
            domain = %domain,
            grid_points = grid.len(),
            rows = rows.len(),
            "监控域数据生成"
        );
        Ok(rows)
    }
}

impl Default for TelemetryOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}
