//! # energy 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/energy.rs`

use clap::Args;
use std::path::PathBuf;

/// energy 子命令参数
#[derive(Args, Debug)]
pub struct EnergyArgs {
    /// Folder containing the OUTCAR file
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Marker of the per-step energy lines in OUTCAR
    #[arg(long, default_value = "free  energy   TOTEN")]
    pub energy_keyword: String,

    /// 0-based whitespace token holding the energy value
    #[arg(long, default_value_t = 4)]
    pub energy_token: usize,

    /// Render the convergence chart to this file (.png or .svg)
    #[arg(long)]
    pub plot: Option<PathBuf>,
}
