// ==========================================
// 工业物联网监控系统 - 命令行入口
// ==========================================
// 命令: summary / alerts / view / export / watch / config
// 输出: table (默认) 或 json；日志写 stderr
// ==========================================

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use iiot_monitor::api::{AttributeFilter, DomainView, ViewRequest};
use iiot_monitor::app::{get_config_db_path, AppState, SessionOverrides};
use iiot_monitor::config::{config_keys, ConfigManager};
use iiot_monitor::domain::{Alert, MachineStatus, MonitorDomain};
use iiot_monitor::engine::{DatasetProfile, LiveStatusFeed};
use iiot_monitor::export::export_bundle;
use iiot_monitor::query::TimeWindow;

#[derive(Parser)]
#[command(
    name = "iiot-monitor",
    about = "工业物联网与供应链监控 - 遥测合成与阈值告警",
    version,
    long_about = None
)]
struct Cli {
    /// 数据档位 (FULL / STANDARD / LITE)，缺省读取配置库
    #[arg(short, long, global = true)]
    profile: Option<DatasetProfile>,

    /// 随机种子，缺省读取配置库
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// 配置库路径
    #[arg(long, global = true, env = "IIOT_MONITOR_CONFIG_DB")]
    config_db: Option<PathBuf>,

    /// 输出格式
    #[arg(short, long, value_enum, global = true, default_value = "table")]
    format: OutputFormat,

    /// 详细日志 (debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 数据集总览与告警汇总
    Summary,

    /// 告警列表
    Alerts {
        /// 只看指定监控域
        #[arg(short, long)]
        domain: Option<MonitorDomain>,
    },

    /// 监控域视图 (筛选后读数 + KPI + 告警)
    #[command(group(ArgGroup::new("attribute").multiple(false)))]
    View {
        /// 监控域，如 machine_health / cold_chain
        domain: MonitorDomain,

        /// 实体编号
        #[arg(short, long)]
        entity: Option<String>,

        /// 时间窗口 (6h / 24h / 3d / 7d / all)
        #[arg(short, long, default_value = "all")]
        window: TimeWindow,

        /// 按设备状态筛选 (machine_status)
        #[arg(long, group = "attribute")]
        status: Option<MachineStatus>,

        /// 按货车筛选 (cold_chain)
        #[arg(long, group = "attribute")]
        truck: Option<String>,

        /// 按仓库筛选 (inventory)
        #[arg(long, group = "attribute")]
        warehouse: Option<String>,

        /// 只看疑似被拆封的包裹 (package_integrity)
        #[arg(long, group = "attribute")]
        tampering: bool,

        /// 显示读数明细
        #[arg(long)]
        rows: bool,
    },

    /// 导出全部监控域为 CSV
    Export {
        /// 输出目录
        dir: PathBuf,
    },

    /// 实时设备状态推送
    Watch {
        /// 推送次数，缺省读取配置库
        #[arg(short, long)]
        ticks: Option<u32>,

        /// 推送周期 (秒)，缺省读取配置库
        #[arg(long)]
        period_secs: Option<u64>,
    },

    /// 配置管理
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// 读取配置值
    Get { key: String },
    /// 写入配置值
    Set { key: String, value: String },
    /// 删除配置值 (恢复默认)
    Unset { key: String },
    /// 列出已写入的配置
    List,
    /// 列出全部可用配置键
    Keys,
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        iiot_monitor::logging::init_with_default("debug");
    } else {
        iiot_monitor::logging::init_with_default("warn");
    }

    let db_path = cli
        .config_db
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(get_config_db_path);
    let config = ConfigManager::new(&db_path)
        .with_context(|| format!("无法打开配置库: {}", db_path))?;
    tracing::debug!(db_path = %db_path, "使用配置库");

    if let Commands::Config(cmd) = &cli.command {
        return run_config(&config, cmd, cli.format);
    }

    let overrides = SessionOverrides {
        profile: cli.profile,
        seed: cli.seed,
        end_time: None,
    };
    let state = AppState::load(&config, overrides).await?;
    let api = &state.monitor_api;

    match cli.command {
        Commands::Summary => {
            let overview = api.overview();
            if cli.format == OutputFormat::Json {
                return print_json(&overview);
            }
            println!(
                "数据档位: {}  种子: {}  窗口: {} 天  截止: {}",
                state.profile, overview.seed, overview.window_days, overview.end_time
            );
            println!("{:<24} {:>8} {:>8}", "监控域", "记录数", "告警数");
            for (domain, rows) in &overview.rows_per_domain {
                println!(
                    "{:<24} {:>8} {:>8}",
                    domain.as_str(),
                    rows,
                    overview.alerts.count_for(*domain)
                );
            }
            println!(
                "合计: {} 条记录, {} 条告警 (严重 {}, 警告 {})",
                overview.total_rows,
                overview.alerts.total,
                overview.alerts.critical(),
                overview.alerts.warning()
            );
        }
        Commands::Alerts { domain } => {
            let alerts = api.alerts(domain);
            if cli.format == OutputFormat::Json {
                return print_json(&alerts);
            }
            print_alerts(&alerts);
        }
        Commands::View {
            domain,
            entity,
            window,
            status,
            truck,
            warehouse,
            tampering,
            rows,
        } => {
            let filter = match (status, truck, warehouse, tampering) {
                (Some(s), _, _, _) => AttributeFilter::MachineStatus(s),
                (_, Some(t), _, _) => AttributeFilter::Truck(t),
                (_, _, Some(w), _) => AttributeFilter::Warehouse(w),
                (_, _, _, true) => AttributeFilter::SuspectedTampering,
                _ => AttributeFilter::None,
            };
            let request = ViewRequest {
                domain,
                entity,
                window,
                filter,
            };
            let view = api.view(&request)?;
            if cli.format == OutputFormat::Json {
                return print_json(&view);
            }
            print_view(&view, rows)?;
        }
        Commands::Export { dir } => {
            let tables = export_bundle(api.bundle(), &dir)?;
            if cli.format == OutputFormat::Json {
                return print_json(&tables);
            }
            for table in &tables {
                println!(
                    "{:<24} {:>8}  {}",
                    table.domain.as_str(),
                    table.rows,
                    table.path.display()
                );
            }
        }
        Commands::Watch { ticks, period_secs } => {
            let ticks = ticks.unwrap_or(state.live_feed.ticks);
            let period = period_secs
                .map(Duration::from_secs)
                .unwrap_or(state.live_feed.period);
            let json = cli.format == OutputFormat::Json;

            let mut feed = LiveStatusFeed::new(state.generator_config.seed);
            feed.run(ticks, period, |snapshot| {
                if json {
                    match serde_json::to_string(&snapshot) {
                        Ok(line) => println!("{}", line),
                        Err(e) => tracing::warn!(error = %e, "快照序列化失败"),
                    }
                    return;
                }
                println!(
                    "[{}] #{} 运行 {}/{}",
                    snapshot.taken_at.format("%H:%M:%S"),
                    snapshot.tick,
                    snapshot.running_count(),
                    snapshot.readings.len()
                );
                for r in &snapshot.readings {
                    println!(
                        "  {:<12} {:<12} {:>6.0} rpm {:>6.2} kWh",
                        r.machine_id,
                        r.status.to_string(),
                        r.rpm,
                        r.energy_kwh
                    );
                }
            })
            .await;
        }
        Commands::Config(cmd) => run_config(&config, &cmd, cli.format)?,
    }

    Ok(())
}

fn run_config(
    config: &ConfigManager,
    cmd: &ConfigCommands,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::Get { key } => match config.get_global_config_value(key)? {
            Some(value) => println!("{}", value),
            None => println!("{} 未设置 (使用默认值)", key),
        },
        ConfigCommands::Set { key, value } => {
            config.set_value(key, value)?;
            println!("已写入 {} = {}", key, value.trim());
        }
        ConfigCommands::Unset { key } => {
            if config.remove_value(key)? {
                println!("已删除 {}", key);
            } else {
                println!("{} 未设置", key);
            }
        }
        ConfigCommands::List => {
            let values = config.list_values()?;
            if format == OutputFormat::Json {
                let map: std::collections::BTreeMap<_, _> = values.into_iter().collect();
                return print_json(&map);
            }
            for (key, value) in values {
                println!("{:<36} {}", key, value);
            }
        }
        ConfigCommands::Keys => {
            for key in config_keys::all_keys() {
                println!("{}", key);
            }
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_alerts(alerts: &[Alert]) {
    if alerts.is_empty() {
        println!("无告警");
        return;
    }
    for alert in alerts {
        println!(
            "{:<9} {:<22} {:<20} {:<14} {}",
            alert.severity.as_str(),
            alert.domain.as_str(),
            alert.kind.label(),
            alert.entity_id,
            alert.message
        );
    }
}

fn print_view(view: &DomainView, show_rows: bool) -> anyhow::Result<()> {
    println!(
        "{}: {} 条读数, {} 个实体, {} 条告警",
        view.domain(),
        view.row_count(),
        view.latest_count(),
        view.alerts().len()
    );

    // KPI 与明细按字段名输出，各监控域共用
    let value = serde_json::to_value(view)?;
    if let Some(kpi) = value.get("kpi").and_then(|v| v.as_object()) {
        println!("KPI:");
        for (name, v) in kpi {
            println!("  {:<24} {}", name, v);
        }
    }
    if show_rows {
        if let Some(rows) = value.get("rows").and_then(|v| v.as_array()) {
            for row in rows {
                println!("  {}", row);
            }
        }
    }

    print_alerts(view.alerts());
    Ok(())
}
