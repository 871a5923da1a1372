//! # 原子位置/受力记录
//!
//! OUTCAR 中 `TOTAL-FORCE` 块的每一行对应一个 `AtomRecord`。
//!
//! ## 依赖关系
//! - 被 `parsers/outcar.rs` 创建
//! - 被 `analysis/`, `plot/`, `export.rs` 使用

use serde::Serialize;

/// 单个原子的位置 (Å) 与受力 (eV/Å)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AtomRecord {
    /// 笛卡尔坐标 (x, y, z)，单位 Å
    pub position: [f64; 3],

    /// 受力分量 (fx, fy, fz)，单位 eV/Å
    pub force: [f64; 3],
}

impl AtomRecord {
    pub fn new(position: [f64; 3], force: [f64; 3]) -> Self {
        AtomRecord { position, force }
    }

    /// 由一行的前 6 个数值构造
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.len() < 6 {
            return None;
        }
        Some(AtomRecord::new(
            [values[0], values[1], values[2]],
            [values[3], values[4], values[5]],
        ))
    }

    /// 受力矢量的模
    pub fn force_norm(&self) -> f64 {
        let [fx, fy, fz] = self.force;
        (fx * fx + fy * fy + fz * fz).sqrt()
    }

    /// 与另一原子位置之间的欧氏距离
    pub fn distance_to(&self, other: &AtomRecord) -> f64 {
        let dx = other.position[0] - self.position[0];
        let dy = other.position[1] - self.position[1];
        let dz = other.position[2] - self.position[2];
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}
