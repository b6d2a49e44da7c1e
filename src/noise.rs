//! # 高斯噪声模块
//!
//! 使用 Box-Muller 变换生成高斯偏差值，并逐通道叠加到像素上。
//! 每次调用都重新抽取一对均匀随机数，只使用余弦分支，不缓存配对的正弦值。

use crate::constants::{STDDEV_FALLBACK, STDDEV_MAX, STDDEV_MIN};
use crate::pixel::{PixelGrid, clamp};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use std::f64::consts::PI;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// 均匀随机整数源，产生 [0, max] 范围内的值。
pub trait UniformSource {
    /// 可能产生的最大原始值。
    fn max(&self) -> u64;

    /// 抽取下一个原始值。
    fn next_raw(&mut self) -> u64;

    /// 抽取开区间 (0, 1] 内的均匀值: `(raw + 1) / (max + 1)`，保证 `ln(u)` 有定义。
    fn next_unit(&mut self) -> f64 {
        (self.next_raw() as f64 + 1.0) / (self.max() as f64 + 1.0)
    }
}

/// 基于 `StdRng` 的均匀随机源，每次运行播种一次。
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// 以当前时间 (Unix 纪元以来的秒数) 作为种子。
    pub fn from_time() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        debug!(seed, "seeding noise generator from wall-clock time");
        Self::from_seed(seed)
    }
}

impl UniformSource for SeededSource {
    fn max(&self) -> u64 {
        u64::from(u32::MAX)
    }

    fn next_raw(&mut self) -> u64 {
        u64::from(self.rng.next_u32())
    }
}

/// 标准差校验的结果。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StdDev {
    /// 值位于 [5, 20] 内，原样采用。
    Accepted(f64),
    /// 值超出范围 (或不是数字)，已替换为 5。
    Coerced { requested: f64 },
}

impl StdDev {
    pub fn validate(requested: f64) -> Self {
        if (STDDEV_MIN..=STDDEV_MAX).contains(&requested) {
            Self::Accepted(requested)
        } else {
            Self::Coerced { requested }
        }
    }

    /// 实际使用的标准差。
    pub fn value(self) -> f64 {
        match self {
            Self::Accepted(value) => value,
            Self::Coerced { .. } => STDDEV_FALLBACK,
        }
    }

    pub fn was_coerced(self) -> bool {
        matches!(self, Self::Coerced { .. })
    }
}

/// 生成一个均值为 `mean`、标准差为 `stddev` 的高斯偏差值。
///
/// `z0 = sqrt(-2 ln u1) * cos(2 pi u2)`，返回 `z0 * stddev + mean`。
pub fn gaussian<S: UniformSource + ?Sized>(source: &mut S, mean: f64, stddev: f64) -> f64 {
    let u1 = source.next_unit();
    let u2 = source.next_unit();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    z0 * stddev + mean
}

/// 为网格中每个像素的每个通道独立叠加四舍五入后的高斯噪声，并饱和到 [0, 255]。
///
/// 噪声只依赖像素自身的原值，因此直接原地修改。
/// 超出 [5, 20] 的标准差会被替换为 5，返回实际使用的值。
pub fn add_gaussian_noise<S: UniformSource + ?Sized>(
    grid: &mut PixelGrid,
    stddev: f64,
    source: &mut S,
) -> f64 {
    let checked = StdDev::validate(stddev);
    if checked.was_coerced() {
        warn!(requested = stddev, "standard deviation out of range, using 5");
    }
    let stddev = checked.value();

    let mut perturb = |channel: u8| {
        let delta = gaussian(source, 0.0, stddev).round() as i64;
        clamp(i64::from(channel).saturating_add(delta))
    };

    for pixel in grid.pixels_mut() {
        pixel.red = perturb(pixel.red);
        pixel.green = perturb(pixel.green);
        pixel.blue = perturb(pixel.blue);
    }

    stddev
}
