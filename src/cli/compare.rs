//! # compare 子命令 CLI 定义
//!
//! 初态/末态对比的全部可调参数，转换为 `config::ReportConfig` 后交给
//! `commands/compare.rs` 执行。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 被 `config.rs` 转换

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 图像输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum PlotFormat {
    /// PNG image
    #[default]
    Png,
    /// SVG vector image
    Svg,
}

impl PlotFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            PlotFormat::Png => "png",
            PlotFormat::Svg => "svg",
        }
    }
}

/// compare 子命令参数
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Working directory containing the two state folders
    #[arg(default_value = ".")]
    pub work_dir: PathBuf,

    /// Substring identifying the two state folders (auto mode)
    #[arg(long, default_value = "state", env = "VASPFORCE_STATE_PATTERN")]
    pub state_pattern: String,

    /// Use fixed folder names instead of auto-detection
    #[arg(long, default_value_t = false)]
    pub manual: bool,

    /// Initial state folder (manual mode, relative to WORK_DIR)
    #[arg(long, default_value = "ini_state")]
    pub ini_dir: PathBuf,

    /// Final state folder (manual mode, relative to WORK_DIR)
    #[arg(long, default_value = "end_state")]
    pub end_dir: PathBuf,

    /// 1-based line of POSCAR holding the per-species atom counts
    #[arg(long, default_value_t = 7)]
    pub poscar_line: usize,

    /// Keyword marking the position/force block in OUTCAR
    #[arg(long, default_value = "TOTAL-FORCE")]
    pub keyword: String,

    /// Lines skipped between the keyword line and the data
    #[arg(long, default_value_t = 1)]
    pub lines_ignored: usize,

    /// Which occurrence of the keyword to read in the initial state ('first' or 'last')
    #[arg(long, default_value = "last")]
    pub ini_position: String,

    /// Which occurrence of the keyword to read in the final state ('first' or 'last')
    #[arg(long, default_value = "last")]
    pub end_position: String,

    /// Marker of the per-step energy lines in OUTCAR
    #[arg(long, default_value = "free  energy   TOTEN")]
    pub energy_keyword: String,

    /// 0-based whitespace token holding the energy value
    #[arg(long, default_value_t = 4)]
    pub energy_token: usize,

    /// Skip plot generation
    #[arg(long, default_value_t = false)]
    pub no_plot: bool,

    /// Directory for the generated figures
    #[arg(long, default_value = "vaspforce_plots", env = "VASPFORCE_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Figure format
    #[arg(long, value_enum, default_value = "png")]
    pub format: PlotFormat,

    /// Figure width in pixels (PNG) or points (SVG)
    #[arg(long, default_value_t = 1800)]
    pub width: u32,

    /// Figure height in pixels (PNG) or points (SVG)
    #[arg(long, default_value_t = 1000)]
    pub height: u32,

    /// Atom marker radius in pixels
    #[arg(long, default_value_t = 6)]
    pub marker_size: u32,

    /// Arrow length per eV/Angst in the force vector plot
    #[arg(long, default_value_t = 50.0)]
    pub vector_length: f64,

    /// Write per-atom positions, forces and displacement to this CSV file
    #[arg(long)]
    pub output_csv: Option<PathBuf>,
}
