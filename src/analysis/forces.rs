//! # 受力与能量统计
//!
//! - 每轴受力分量的范围与最大绝对值
//! - 受力矢量模
//! - 相邻离子步能量差
//!
//! ## 依赖关系
//! - 被 `commands/`, `plot/` 使用
//! - 使用 `models/atom.rs`

use crate::models::AtomRecord;

/// 受力矢量模 (eV/Å)
pub fn force_norms(records: &[AtomRecord]) -> Vec<f64> {
    records.iter().map(AtomRecord::force_norm).collect()
}

/// 相邻步之间的能量变化，第一个元素对应第 2 步
pub fn energy_deltas(energies: &[f64]) -> Vec<f64> {
    energies.windows(2).map(|w| w[1] - w[0]).collect()
}

/// 数值范围
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// 空序列返回 `None`
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(AxisRange { min: v, max: v }),
            Some(r) => Some(AxisRange {
                min: r.min.min(v),
                max: r.max.max(v),
            }),
        })
    }

    /// 最大绝对值
    pub fn max_abs(&self) -> f64 {
        self.min.abs().max(self.max.abs())
    }

    /// 将 `v` 归一化到 [0, 1]，范围退化时返回 0
    pub fn normalize(&self, v: f64) -> f64 {
        let span = self.max - self.min;
        if span.abs() < f64::EPSILON {
            0.0
        } else {
            ((v - self.min) / span).clamp(0.0, 1.0)
        }
    }
}

/// 一个状态的受力统计
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceStats {
    /// Fx, Fy, Fz 各自的范围
    pub axes: [AxisRange; 3],
    /// |F| 的范围
    pub norm: AxisRange,
}

impl ForceStats {
    /// 无原子时返回 `None`
    pub fn from_records(records: &[AtomRecord]) -> Option<Self> {
        let axis = |k: usize| AxisRange::of(records.iter().map(|r| r.force[k]));
        Some(ForceStats {
            axes: [axis(0)?, axis(1)?, axis(2)?],
            norm: AxisRange::of(records.iter().map(AtomRecord::force_norm))?,
        })
    }

    /// (max |Fx|, max |Fy|, max |Fz|)
    pub fn max_abs(&self) -> [f64; 3] {
        [
            self.axes[0].max_abs(),
            self.axes[1].max_abs(),
            self.axes[2].max_abs(),
        ]
    }
}
