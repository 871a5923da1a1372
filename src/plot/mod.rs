//! # 图表生成模块
//!
//! 使用 `plotters` 将受力、位移与能量收敛绘制为 PNG/SVG 文件。
//!
//! ## 图表
//! - `forces_components`: 初态/末态 Fx, Fy, Fz 三维散点图 (2×3)
//! - `forces_vectors`: 受力矢量场 (1×2)
//! - `displacement`: 原子位移热图
//! - `energy`: 能量随离子步变化曲线
//!
//! ## 依赖关系
//! - 被 `commands/compare.rs`, `commands/energy.rs` 调用
//! - 使用 `analysis/` 计算颜色范围
//! - 子模块: colormap, energy, forces

pub mod colormap;
pub mod energy;
pub mod forces;

use crate::error::VaspForceError;
use crate::models::AtomRecord;

use std::ops::Range;

/// 将 plotters 错误转换为 `PlotError`
pub(crate) fn plot_err<E: std::fmt::Debug>(e: E) -> VaspForceError {
    VaspForceError::PlotError(format!("{:?}", e))
}

/// 三维坐标范围
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds3 {
    pub x: Range<f64>,
    pub y: Range<f64>,
    pub z: Range<f64>,
}

impl Bounds3 {
    /// 包含所有点的范围，四周留出 5% 余量；空输入返回 `None`
    pub fn enclosing(points: impl IntoIterator<Item = [f64; 3]>) -> Option<Self> {
        let mut lo = [f64::INFINITY; 3];
        let mut hi = [f64::NEG_INFINITY; 3];
        let mut any = false;

        for p in points {
            any = true;
            for k in 0..3 {
                lo[k] = lo[k].min(p[k]);
                hi[k] = hi[k].max(p[k]);
            }
        }
        if !any {
            return None;
        }

        let padded = |k: usize| {
            let span = hi[k] - lo[k];
            let pad = if span > 1e-9 { span * 0.05 } else { 0.5 };
            (lo[k] - pad)..(hi[k] + pad)
        };

        Some(Bounds3 {
            x: padded(0),
            y: padded(1),
            z: padded(2),
        })
    }

    /// 两个状态所有原子位置的范围
    pub fn of_positions(initial: &[AtomRecord], last: &[AtomRecord]) -> Option<Self> {
        Self::enclosing(initial.iter().chain(last).map(|r| r.position))
    }
}
