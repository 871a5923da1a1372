//! # 派生量计算模块
//!
//! 由两个状态的原子记录计算位移、受力统计与能量变化。
//!
//! ## 依赖关系
//! - 被 `commands/`, `plot/`, `export.rs` 使用
//! - 使用 `models/`
//! - 子模块: displacement, forces

pub mod displacement;
pub mod forces;

pub use displacement::{displacements, max_with_index};
pub use forces::{energy_deltas, force_norms, AxisRange, ForceStats};
