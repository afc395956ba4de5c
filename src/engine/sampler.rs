// ==========================================
// 工业物联网监控系统 - 随机采样器
// ==========================================
// 职责: 封装可复现的伪随机流 (均匀/正态/伯努利/整数)
// 说明: 每个监控域使用独立的随机流，互不干扰
// ==========================================

use crate::domain::types::MonitorDomain;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// 监控域随机流盐值步长
const DOMAIN_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    /// 从种子创建采样器
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// 为指定监控域派生独立随机流
    pub fn for_domain(master_seed: u64, domain: MonitorDomain) -> Self {
        let index = MonitorDomain::ALL
            .iter()
            .position(|d| *d == domain)
            .unwrap_or(0) as u64;
        Self::from_seed(master_seed.wrapping_add((index + 1).wrapping_mul(DOMAIN_SALT)))
    }

    /// 均匀分布 [low, high)
    ///
    /// high <= low 时直接返回 low
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }

    /// 正态分布 N(mean, std_dev)
    ///
    /// std_dev 非法 (负数/NaN) 时退化为常数 mean
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        match Normal::new(mean, std_dev) {
            Ok(dist) => dist.sample(&mut self.rng),
            Err(_) => mean,
        }
    }

    /// 以概率 p 返回 true
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    /// 整数均匀分布 [low, high)
    pub fn int_range(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }
}
