// ==========================================
// 工业物联网监控系统 - CSV 导出
// ==========================================
// 职责: 每个监控域一张表，表头取记录字段名
// 文件名: <domain>.csv (如 machine_health.csv)
// ==========================================

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::api::error::ApiResult;
use crate::domain::types::MonitorDomain;
use crate::engine::orchestrator::DatasetBundle;

/// 单表导出结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedTable {
    pub domain: MonitorDomain,
    pub path: PathBuf,
    pub rows: usize,
}

/// 导出文件名
pub fn table_file_name(domain: MonitorDomain) -> String {
    format!("{}.csv", domain.as_str())
}

/// 写出单张表
///
/// # 返回
/// 写出的数据行数（不含表头）
pub fn write_table<R: Serialize>(rows: &[R], path: &Path) -> ApiResult<usize> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_path(path)?;

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = rows.len(), "表已写出");
    Ok(rows.len())
}

/// 导出全部监控域
///
/// # 参数
/// - bundle: 会话数据集
/// - dir: 输出目录（不存在时自动创建）
pub fn export_bundle(bundle: &DatasetBundle, dir: &Path) -> ApiResult<Vec<ExportedTable>> {
    fs::create_dir_all(dir)?;

    let mut exported = Vec::with_capacity(MonitorDomain::ALL.len());
    for domain in MonitorDomain::ALL {
        let path = dir.join(table_file_name(domain));
        let rows = match domain {
            MonitorDomain::MachineHealth => write_table(&bundle.machine_health, &path)?,
            MonitorDomain::MachineStatus => write_table(&bundle.machine_status, &path)?,
            MonitorDomain::ZoneEnvironment => write_table(&bundle.zone_environment, &path)?,
            MonitorDomain::LineOee => write_table(&bundle.line_oee, &path)?,
            MonitorDomain::ColdChain => write_table(&bundle.cold_chain, &path)?,
            MonitorDomain::WarehouseEnvironment => {
                write_table(&bundle.warehouse_environment, &path)?
            }
            MonitorDomain::Inventory => write_table(&bundle.inventory, &path)?,
            MonitorDomain::PackageIntegrity => write_table(&bundle.package_integrity, &path)?,
        };
        exported.push(ExportedTable { domain, path, rows });
    }

    info!(
        dir = %dir.display(),
        tables = exported.len(),
        rows = bundle.total_rows(),
        "数据集已导出"
    );
    Ok(exported)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_file_names() {
        assert_eq!(table_file_name(MonitorDomain::LineOee), "line_oee.csv");
        assert_eq!(
            table_file_name(MonitorDomain::WarehouseEnvironment),
            "warehouse_environment.csv"
        );
    }
}
