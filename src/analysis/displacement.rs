//! # 原子位移
//!
//! 初态与末态对应原子之间的欧氏距离。
//!
//! ## 依赖关系
//! - 被 `commands/compare.rs`, `plot/`, `export.rs` 使用

use crate::error::{Result, VaspForceError};
use crate::models::AtomRecord;

/// 逐原子位移 (Å)，两态原子数必须一致
pub fn displacements(initial: &[AtomRecord], last: &[AtomRecord]) -> Result<Vec<f64>> {
    if initial.len() != last.len() {
        return Err(VaspForceError::AtomCountMismatch {
            initial: initial.len(),
            last: last.len(),
        });
    }

    Ok(initial
        .iter()
        .zip(last)
        .map(|(a, b)| a.distance_to(b))
        .collect())
}

/// 最大值及其下标；空序列或全部为 NaN 时返回 `None`
pub fn max_with_index(values: &[f64]) -> Option<(usize, f64)> {
    values
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .fold(None, |best, (i, v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
}
