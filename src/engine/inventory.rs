// ==========================================
// 工业物联网监控系统 - 库存水位数据生成
// ==========================================
// 采样间隔: 60 分钟
// 规则: 库存按消耗速率递减，不低于 0
// 规则: 库存 <= 再订货点时，10% 概率补货，否则给出补货 ETA
// ==========================================

use crate::domain::catalog::{sku_ids, warehouse_ids};
use crate::domain::logistics::InventoryReading;
use crate::domain::reading::round_to;
use crate::engine::sampler::Sampler;
use crate::engine::series::SeriesGenerator;
use crate::engine::timeline::{hour_of, is_weekday, TimeGrid};
use chrono::NaiveDateTime;

const RESTOCK_PROBABILITY: f64 = 0.1;

/// SKU 库存参数 (初始化时随机抽取)
#[derive(Debug, Clone)]
struct SkuPlan {
    sku_id: String,
    warehouse_id: String,
    initial_stock: f64,
    reorder_point: f64,
    consumption_rate: f64,
}

pub struct InventoryGenerator {
    sku_count: usize,
}

impl InventoryGenerator {
    /// # 参数
    /// - `sku_count`: 取 SKU 目录前 N 个，仓库轮流分配
    pub fn new(sku_count: usize) -> Self {
        Self { sku_count }
    }

    /// 消耗倍率: 工作日 8-17 点 1.0 / 工作日其他 0.3 / 周末 0.5
    pub fn consumption_multiplier(ts: NaiveDateTime) -> f64 {
        if !is_weekday(ts) {
            0.5
        } else if (8..=17).contains(&hour_of(ts)) {
            1.0
        } else {
            0.3
        }
    }

    fn plan_skus(&self, sampler: &mut Sampler) -> Vec<SkuPlan> {
        let warehouses = warehouse_ids();
        sku_ids()
            .into_iter()
            .take(self.sku_count)
            .enumerate()
            .map(|(i, sku_id)| SkuPlan {
                sku_id,
                warehouse_id: warehouses[i % warehouses.len()].clone(),
                initial_stock: sampler.int_range(100, 1000) as f64,
                reorder_point: sampler.int_range(50, 200) as f64,
                consumption_rate: sampler.uniform(0.5, 5.0),
            })
            .collect()
    }
}

impl SeriesGenerator for InventoryGenerator {
    type Row = InventoryReading;
    const STEP_MINUTES: i64 = 60;

    fn generate(&self, grid: &TimeGrid, sampler: &mut Sampler) -> Vec<InventoryReading> {
        let timestamps = grid.timestamps();
        let plans = self.plan_skus(sampler);
        let mut rows = Vec::with_capacity(plans.len() * timestamps.len());

        for plan in &plans {
            let mut stock = plan.initial_stock;

            for ts in &timestamps {
                let consumption = (plan.consumption_rate * Self::consumption_multiplier(*ts)
                    + sampler.normal(0.0, 0.5))
                .max(0.0);
                stock = (stock - consumption).max(InventoryReading::MIN_STOCK);

                let mut restock_eta_hours = None;
                if stock <= plan.reorder_point {
                    if sampler.chance(RESTOCK_PROBABILITY) {
                        stock += sampler.int_range(200, 800) as f64;
                    } else {
                        restock_eta_hours = Some(sampler.int_range(6, 48));
                    }
                }

                rows.push(InventoryReading {
                    timestamp: *ts,
                    sku_id: plan.sku_id.clone(),
                    warehouse_id: plan.warehouse_id.clone(),
                    stock_level: round_to(stock, 0),
                    reorder_point: plan.reorder_point,
                    restock_eta_hours,
                });
            }
        }

        rows
    }
}
