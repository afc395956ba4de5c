// ==========================================
// 工业物联网监控系统 - 监控视图 API
// ==========================================
// 职责: 按监控域组装视图 (筛选后读数 + 最新读数 + KPI + 告警)
// 数据: 会话内只读数据集 (Arc 共享)
// 红线: 未知实体返回空视图，不报错；空白实体编号为无效输入
// ==========================================

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::alert::evaluator::AlertEvaluator;
use crate::alert::summary::AlertSummary;
use crate::alert::thresholds::AlertThresholds;
use crate::api::error::{ApiError, ApiResult};
use crate::domain::alert::Alert;
use crate::domain::environment::{WarehouseEnvironmentReading, ZoneEnvironmentReading};
use crate::domain::logistics::{ColdChainReading, InventoryReading, PackageIntegrityReading};
use crate::domain::machine::{MachineHealthReading, MachineStatusReading};
use crate::domain::production::LineOeeReading;
use crate::domain::reading::Reading;
use crate::domain::types::{MachineStatus, MonitorDomain};
use crate::engine::orchestrator::DatasetBundle;
use crate::query::filter::{
    filter_by_entity, filter_by_window, filter_cold_chain_by_truck, filter_inventory_by_warehouse,
    filter_machine_status, filter_suspected_tampering, TimeWindow,
};
use crate::query::kpi::{
    ColdChainKpi, InventoryKpi, LineOeeKpi, MachineHealthKpi, MachineStatusKpi,
    PackageIntegrityKpi, WarehouseEnvironmentKpi, ZoneEnvironmentKpi,
};
use crate::query::latest::latest_per_entity;

// ==========================================
// 请求 DTO
// ==========================================

/// 监控域专用属性筛选
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeFilter {
    /// 不筛选
    #[default]
    None,
    /// 设备状态 (仅 MACHINE_STATUS)
    MachineStatus(MachineStatus),
    /// 货车编号 (仅 COLD_CHAIN)
    Truck(String),
    /// 仓库编号 (仅 INVENTORY)
    Warehouse(String),
    /// 疑似被拆封 (仅 PACKAGE_INTEGRITY)
    SuspectedTampering,
}

impl fmt::Display for AttributeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeFilter::None => write!(f, "none"),
            AttributeFilter::MachineStatus(s) => write!(f, "status={}", s),
            AttributeFilter::Truck(t) => write!(f, "truck={}", t),
            AttributeFilter::Warehouse(w) => write!(f, "warehouse={}", w),
            AttributeFilter::SuspectedTampering => write!(f, "suspected_tampering"),
        }
    }
}

/// 视图查询请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRequest {
    pub domain: MonitorDomain,
    /// 实体编号 (None = 全部实体)
    pub entity: Option<String>,
    #[serde(default)]
    pub window: TimeWindow,
    #[serde(default)]
    pub filter: AttributeFilter,
}

impl ViewRequest {
    /// 全部实体、全部时间、不筛选
    pub fn all(domain: MonitorDomain) -> Self {
        Self {
            domain,
            entity: None,
            window: TimeWindow::All,
            filter: AttributeFilter::None,
        }
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_filter(mut self, filter: AttributeFilter) -> Self {
        self.filter = filter;
        self
    }
}

// ==========================================
// 响应 DTO
// ==========================================

/// 单个监控域的视图
#[derive(Debug, Clone, Serialize)]
pub struct TableView<R, K> {
    /// 筛选后的读数
    pub rows: Vec<R>,
    /// 每实体最新读数
    pub latest: Vec<R>,
    /// 基于最新读数的 KPI
    pub kpi: K,
    /// 所选实体的告警
    pub alerts: Vec<Alert>,
}

/// 按监控域区分的视图
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "domain", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainView {
    MachineHealth(TableView<MachineHealthReading, MachineHealthKpi>),
    MachineStatus(TableView<MachineStatusReading, MachineStatusKpi>),
    ZoneEnvironment(TableView<ZoneEnvironmentReading, ZoneEnvironmentKpi>),
    LineOee(TableView<LineOeeReading, LineOeeKpi>),
    ColdChain(TableView<ColdChainReading, ColdChainKpi>),
    WarehouseEnvironment(TableView<WarehouseEnvironmentReading, WarehouseEnvironmentKpi>),
    Inventory(TableView<InventoryReading, InventoryKpi>),
    PackageIntegrity(TableView<PackageIntegrityReading, PackageIntegrityKpi>),
}

impl DomainView {
    pub fn domain(&self) -> MonitorDomain {
        match self {
            DomainView::MachineHealth(_) => MonitorDomain::MachineHealth,
            DomainView::MachineStatus(_) => MonitorDomain::MachineStatus,
            DomainView::ZoneEnvironment(_) => MonitorDomain::ZoneEnvironment,
            DomainView::LineOee(_) => MonitorDomain::LineOee,
            DomainView::ColdChain(_) => MonitorDomain::ColdChain,
            DomainView::WarehouseEnvironment(_) => MonitorDomain::WarehouseEnvironment,
            DomainView::Inventory(_) => MonitorDomain::Inventory,
            DomainView::PackageIntegrity(_) => MonitorDomain::PackageIntegrity,
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            DomainView::MachineHealth(v) => v.rows.len(),
            DomainView::MachineStatus(v) => v.rows.len(),
            DomainView::ZoneEnvironment(v) => v.rows.len(),
            DomainView::LineOee(v) => v.rows.len(),
            DomainView::ColdChain(v) => v.rows.len(),
            DomainView::WarehouseEnvironment(v) => v.rows.len(),
            DomainView::Inventory(v) => v.rows.len(),
            DomainView::PackageIntegrity(v) => v.rows.len(),
        }
    }

    pub fn latest_count(&self) -> usize {
        match self {
            DomainView::MachineHealth(v) => v.latest.len(),
            DomainView::MachineStatus(v) => v.latest.len(),
            DomainView::ZoneEnvironment(v) => v.latest.len(),
            DomainView::LineOee(v) => v.latest.len(),
            DomainView::ColdChain(v) => v.latest.len(),
            DomainView::WarehouseEnvironment(v) => v.latest.len(),
            DomainView::Inventory(v) => v.latest.len(),
            DomainView::PackageIntegrity(v) => v.latest.len(),
        }
    }

    pub fn alerts(&self) -> &[Alert] {
        match self {
            DomainView::MachineHealth(v) => &v.alerts,
            DomainView::MachineStatus(v) => &v.alerts,
            DomainView::ZoneEnvironment(v) => &v.alerts,
            DomainView::LineOee(v) => &v.alerts,
            DomainView::ColdChain(v) => &v.alerts,
            DomainView::WarehouseEnvironment(v) => &v.alerts,
            DomainView::Inventory(v) => &v.alerts,
            DomainView::PackageIntegrity(v) => &v.alerts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

/// 数据集总览
#[derive(Debug, Clone, Serialize)]
pub struct MonitorOverview {
    pub seed: u64,
    pub end_time: NaiveDateTime,
    pub window_days: i64,
    pub rows_per_domain: BTreeMap<MonitorDomain, usize>,
    pub total_rows: usize,
    pub alerts: AlertSummary,
}

// ==========================================
// MonitorApi - 监控视图 API
// ==========================================

/// 监控视图API
///
/// 职责：
/// 1. 按监控域组装视图（实体/时间窗口/属性筛选）
/// 2. 告警查询与汇总
/// 3. 实体选择列表
pub struct MonitorApi {
    bundle: Arc<DatasetBundle>,
    evaluator: AlertEvaluator,
}

impl MonitorApi {
    /// 创建新的MonitorApi实例
    ///
    /// # 参数
    /// - bundle: 会话数据集（只读共享）
    /// - thresholds: 告警阈值表
    pub fn new(bundle: Arc<DatasetBundle>, thresholds: AlertThresholds) -> Self {
        Self {
            bundle,
            evaluator: AlertEvaluator::new(thresholds),
        }
    }

    pub fn bundle(&self) -> &Arc<DatasetBundle> {
        &self.bundle
    }

    pub fn thresholds(&self) -> &AlertThresholds {
        self.evaluator.thresholds()
    }

    /// 替换阈值表 (后续视图/告警按新阈值评估)
    pub fn set_thresholds(&mut self, thresholds: AlertThresholds) {
        self.evaluator = AlertEvaluator::new(thresholds);
    }

    /// 查询监控域视图
    ///
    /// # 参数
    /// - request: 视图请求（实体、时间窗口、属性筛选）
    ///
    /// # 返回
    /// - Ok(DomainView): 视图（实体不存在时为空视图）
    /// - Err(ApiError::InvalidInput): 实体编号为空白
    /// - Err(ApiError::UnsupportedFilter): 属性筛选与监控域不匹配
    pub fn view(&self, request: &ViewRequest) -> ApiResult<DomainView> {
        let entity = match request.entity.as_deref() {
            Some(raw) if raw.trim().is_empty() => {
                return Err(ApiError::InvalidInput("实体编号不能为空".to_string()));
            }
            Some(raw) => Some(raw.trim()),
            None => None,
        };

        let bundle = &self.bundle;
        let view = match (request.domain, &request.filter) {
            (MonitorDomain::MachineHealth, AttributeFilter::None) => {
                DomainView::MachineHealth(self.build_view(
                    &bundle.machine_health,
                    entity,
                    request.window,
                    keep_all,
                    MachineHealthKpi::from_latest,
                    AlertEvaluator::evaluate_machine_health,
                ))
            }
            (MonitorDomain::MachineStatus, AttributeFilter::None | AttributeFilter::MachineStatus(_)) => {
                let status = match &request.filter {
                    AttributeFilter::MachineStatus(s) => Some(*s),
                    _ => None,
                };
                DomainView::MachineStatus(self.build_view(
                    &bundle.machine_status,
                    entity,
                    request.window,
                    |rows: &[MachineStatusReading]| match status {
                        Some(s) => filter_machine_status(rows, s),
                        None => rows.to_vec(),
                    },
                    MachineStatusKpi::from_latest,
                    AlertEvaluator::evaluate_machine_status,
                ))
            }
            (MonitorDomain::ZoneEnvironment, AttributeFilter::None) => {
                DomainView::ZoneEnvironment(self.build_view(
                    &bundle.zone_environment,
                    entity,
                    request.window,
                    keep_all,
                    ZoneEnvironmentKpi::from_latest,
                    AlertEvaluator::evaluate_zone_environment,
                ))
            }
            (MonitorDomain::LineOee, AttributeFilter::None) => DomainView::LineOee(self.build_view(
                &bundle.line_oee,
                entity,
                request.window,
                keep_all,
                LineOeeKpi::from_latest,
                AlertEvaluator::evaluate_line_oee,
            )),
            (MonitorDomain::ColdChain, AttributeFilter::None | AttributeFilter::Truck(_)) => {
                let truck = match &request.filter {
                    AttributeFilter::Truck(t) => Some(t.as_str()),
                    _ => None,
                };
                DomainView::ColdChain(self.build_view(
                    &bundle.cold_chain,
                    entity,
                    request.window,
                    |rows: &[ColdChainReading]| match truck {
                        Some(t) => filter_cold_chain_by_truck(rows, t),
                        None => rows.to_vec(),
                    },
                    ColdChainKpi::from_latest,
                    AlertEvaluator::evaluate_cold_chain,
                ))
            }
            (MonitorDomain::WarehouseEnvironment, AttributeFilter::None) => {
                DomainView::WarehouseEnvironment(self.build_view(
                    &bundle.warehouse_environment,
                    entity,
                    request.window,
                    keep_all,
                    WarehouseEnvironmentKpi::from_latest,
                    AlertEvaluator::evaluate_warehouse_environment,
                ))
            }
            (MonitorDomain::Inventory, AttributeFilter::None | AttributeFilter::Warehouse(_)) => {
                let warehouse = match &request.filter {
                    AttributeFilter::Warehouse(w) => Some(w.as_str()),
                    _ => None,
                };
                DomainView::Inventory(self.build_view(
                    &bundle.inventory,
                    entity,
                    request.window,
                    |rows: &[InventoryReading]| match warehouse {
                        Some(w) => filter_inventory_by_warehouse(rows, w),
                        None => rows.to_vec(),
                    },
                    InventoryKpi::from_latest,
                    AlertEvaluator::evaluate_inventory,
                ))
            }
            (
                MonitorDomain::PackageIntegrity,
                AttributeFilter::None | AttributeFilter::SuspectedTampering,
            ) => {
                let tampering_only = request.filter == AttributeFilter::SuspectedTampering;
                DomainView::PackageIntegrity(self.build_view(
                    &bundle.package_integrity,
                    entity,
                    request.window,
                    |rows: &[PackageIntegrityReading]| {
                        if tampering_only {
                            filter_suspected_tampering(rows)
                        } else {
                            rows.to_vec()
                        }
                    },
                    PackageIntegrityKpi::from_latest,
                    AlertEvaluator::evaluate_package_integrity,
                ))
            }
            (domain, filter) => {
                return Err(ApiError::UnsupportedFilter {
                    domain: domain.to_string(),
                    filter: filter.to_string(),
                });
            }
        };

        info!(
            domain = %request.domain,
            entity = entity.unwrap_or("*"),
            window = %request.window,
            rows = view.row_count(),
            alerts = view.alerts().len(),
            "监控视图已生成"
        );
        Ok(view)
    }

    /// 告警列表
    ///
    /// # 参数
    /// - domain: 指定监控域（None = 全部）
    pub fn alerts(&self, domain: Option<MonitorDomain>) -> Vec<Alert> {
        match domain {
            Some(d) => self.evaluator.evaluate_domain(&self.bundle, d),
            None => self.evaluator.evaluate_all(&self.bundle),
        }
    }

    /// 告警汇总
    pub fn alert_summary(&self) -> AlertSummary {
        AlertSummary::from_alerts(&self.alerts(None))
    }

    /// 数据集总览
    pub fn overview(&self) -> MonitorOverview {
        let rows_per_domain = MonitorDomain::ALL
            .iter()
            .map(|d| (*d, self.bundle.row_count(*d)))
            .collect();

        MonitorOverview {
            seed: self.bundle.seed,
            end_time: self.bundle.end_time,
            window_days: self.bundle.window_days,
            rows_per_domain,
            total_rows: self.bundle.total_rows(),
            alerts: self.alert_summary(),
        }
    }

    /// 监控域内的实体编号（去重、排序），用于实体选择
    pub fn entities(&self, domain: MonitorDomain) -> Vec<String> {
        let bundle = &self.bundle;
        match domain {
            MonitorDomain::MachineHealth => distinct_entities(&bundle.machine_health),
            MonitorDomain::MachineStatus => distinct_entities(&bundle.machine_status),
            MonitorDomain::ZoneEnvironment => distinct_entities(&bundle.zone_environment),
            MonitorDomain::LineOee => distinct_entities(&bundle.line_oee),
            MonitorDomain::ColdChain => distinct_entities(&bundle.cold_chain),
            MonitorDomain::WarehouseEnvironment => {
                distinct_entities(&bundle.warehouse_environment)
            }
            MonitorDomain::Inventory => distinct_entities(&bundle.inventory),
            MonitorDomain::PackageIntegrity => distinct_entities(&bundle.package_integrity),
        }
    }

    // ==========================================
    // 内部方法
    // ==========================================

    /// 时间窗口 → 实体筛选后先取最新读数并评估告警，再按属性筛选
    ///
    /// 属性筛选作用于读数明细与最新读数；告警只保留最新读数仍满足属性条件的实体
    fn build_view<R, K>(
        &self,
        table: &[R],
        entity: Option<&str>,
        window: TimeWindow,
        attribute: impl Fn(&[R]) -> Vec<R>,
        kpi: impl Fn(&[R]) -> K,
        evaluate: impl Fn(&AlertEvaluator, &[R]) -> Vec<Alert>,
    ) -> TableView<R, K>
    where
        R: Reading + Clone,
    {
        let mut scoped = filter_by_window(table, window);
        if let Some(id) = entity {
            scoped = filter_by_entity(&scoped, id);
        }

        // 告警按实体真实的最新读数判定
        let alerts = evaluate(&self.evaluator, &scoped);
        let latest = attribute(&latest_per_entity(&scoped));
        let rows = attribute(&scoped);

        let kept: BTreeSet<&str> = latest.iter().map(|r| r.entity_id()).collect();
        let alerts: Vec<Alert> = alerts
            .into_iter()
            .filter(|a| kept.contains(a.entity_id.as_str()))
            .collect();
        let kpi = kpi(&latest);

        TableView {
            rows,
            latest,
            kpi,
            alerts,
        }
    }
}

/// 不做属性筛选
fn keep_all<R: Clone>(rows: &[R]) -> Vec<R> {
    rows.to_vec()
}

fn distinct_entities<R: Reading>(rows: &[R]) -> Vec<String> {
    rows.iter()
        .map(|r| r.entity_id().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::generator_config::{DatasetProfile, GeneratorConfig};
    use crate::engine::orchestrator::TelemetryOrchestrator;
    use chrono::NaiveDate;

    fn api() -> MonitorApi {
        let end = NaiveDate::from_ymd_opt(2026, 3, 9)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let cfg = GeneratorConfig::from_profile(DatasetProfile::Lite, 7, end);
        let bundle = TelemetryOrchestrator::new().generate_all(&cfg).unwrap();
        MonitorApi::new(Arc::new(bundle), AlertThresholds::default())
    }

    #[test]
    fn test_blank_entity_is_invalid_input() {
        let api = api();
        let request = ViewRequest::all(MonitorDomain::MachineHealth).with_entity("   ");
        assert!(matches!(api.view(&request), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_unknown_entity_yields_empty_view() {
        let api = api();
        let request = ViewRequest::all(MonitorDomain::LineOee).with_entity("Line_Z");
        let view = api.view(&request).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.latest_count(), 0);
        assert!(view.alerts().is_empty());
    }

    #[test]
    fn test_filter_must_match_domain() {
        let api = api();
        let request = ViewRequest::all(MonitorDomain::MachineHealth)
            .with_filter(AttributeFilter::Truck("TRUCK_003".to_string()));
        assert!(matches!(
            api.view(&request),
            Err(ApiError::UnsupportedFilter { .. })
        ));
    }

    #[test]
    fn test_entities_are_sorted_and_distinct() {
        let api = api();
        let machines = api.entities(MonitorDomain::MachineHealth);
        assert_eq!(machines.len(), 10);
        assert_eq!(machines.first().map(String::as_str), Some("Machine_01"));
        assert!(machines.windows(2).all(|w| w[0] < w[1]));
    }
}
