//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `compare`: 初态/末态受力与位移对比（主流程）
//! - `energy`: 单个状态的能量收敛分析
//! - `grep`: 提取文件中包含指定字符串的行
//! - `folders`: 列出名称包含指定字符串的子文件夹
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: compare, energy, search

pub mod compare;
pub mod energy;
pub mod search;

use clap::{Parser, Subcommand};

/// vaspforce - VASP 初态/末态受力与位移对比工具
#[derive(Parser)]
#[command(name = "vaspforce")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Compare VASP forces, positions and energies between an initial and a final state",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Compare forces and displacements between the initial and final state folders
    Compare(compare::CompareArgs),

    /// Show the energy convergence of a single state folder
    Energy(energy::EnergyArgs),

    /// Print every line of a file that contains a string
    Grep(search::GrepArgs),

    /// List sub-folders whose name contains a string
    Folders(search::FoldersArgs),
}
