//! # 模拟状态数据模型
//!
//! - `StateSnapshot`: 一个状态（初态或末态）的原子记录与能量序列
//! - `FolderPair`: 初态/末态两个文件夹
//!
//! ## 依赖关系
//! - 被 `commands/compare.rs` 创建
//! - 使用 `models/atom.rs`

use super::AtomRecord;
use std::path::PathBuf;

/// 单个模拟状态
#[derive(Debug, Clone)]
pub struct StateSnapshot {
    /// 状态标签（"Initial state" / "Final state"）
    pub label: String,

    /// 数据所在目录
    pub dir: PathBuf,

    /// 按文件顺序排列的原子记录
    pub atoms: Vec<AtomRecord>,

    /// 每个离子步的总能量 (eV)
    pub energies: Vec<f64>,
}

impl StateSnapshot {
    pub fn new(
        label: impl Into<String>,
        dir: PathBuf,
        atoms: Vec<AtomRecord>,
        energies: Vec<f64>,
    ) -> Self {
        StateSnapshot {
            label: label.into(),
            dir,
            atoms,
            energies,
        }
    }

    /// 最后一个（收敛程度最高的）能量
    pub fn final_energy(&self) -> Option<f64> {
        self.energies.last().copied()
    }
}

/// 初态与末态文件夹
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderPair {
    pub initial: PathBuf,
    pub last: PathBuf,
}

impl FolderPair {
    pub fn new(initial: PathBuf, last: PathBuf) -> Self {
        FolderPair { initial, last }
    }
}
