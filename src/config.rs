//! # 运行配置
//!
//! compare 流程的全部参数集中在 `ReportConfig` 中，由命令行参数构建，
//! 显式传入 `commands::compare::run_report`。
//!
//! ## 依赖关系
//! - 使用 `cli/compare.rs`
//! - 被 `commands/compare.rs`, `plot/` 使用

use crate::cli::compare::{CompareArgs, PlotFormat};
use crate::parsers::outcar::{
    DEFAULT_ENERGY_KEYWORD, DEFAULT_ENERGY_TOKEN, DEFAULT_FORCE_KEYWORD, DEFAULT_LINES_IGNORED,
};
use crate::parsers::poscar::DEFAULT_ATOM_COUNT_LINE;

use std::path::PathBuf;

/// 状态文件夹的确定方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderMode {
    /// 在工作目录下查找名称包含 `pattern` 的两个文件夹
    Auto { pattern: String },
    /// 固定的初态/末态文件夹
    Manual { initial: PathBuf, last: PathBuf },
}

/// 绘图参数
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub enabled: bool,
    pub output_dir: PathBuf,
    pub format: PlotFormat,
    pub width: u32,
    pub height: u32,
    /// 原子标记半径（像素）
    pub marker_size: u32,
    /// 受力箭头长度缩放（Å per eV/Å）
    pub vector_length: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            enabled: true,
            output_dir: PathBuf::from("vaspforce_plots"),
            format: PlotFormat::Png,
            width: 1800,
            height: 1000,
            marker_size: 6,
            vector_length: 50.0,
        }
    }
}

impl PlotConfig {
    /// 输出目录下的图像路径
    pub fn figure_path(&self, stem: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", stem, self.format.extension()))
    }
}

/// compare 流程配置
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub work_dir: PathBuf,
    pub folders: FolderMode,
    pub poscar_line: usize,
    pub keyword: String,
    pub lines_ignored: usize,
    /// 初态读取关键字的第几次出现（"first" / "last"）
    pub ini_position: String,
    pub end_position: String,
    pub energy_keyword: String,
    pub energy_token: usize,
    pub plot: PlotConfig,
    pub output_csv: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            work_dir: PathBuf::from("."),
            folders: FolderMode::Auto {
                pattern: "state".to_string(),
            },
            poscar_line: DEFAULT_ATOM_COUNT_LINE,
            keyword: DEFAULT_FORCE_KEYWORD.to_string(),
            lines_ignored: DEFAULT_LINES_IGNORED,
            ini_position: "last".to_string(),
            end_position: "last".to_string(),
            energy_keyword: DEFAULT_ENERGY_KEYWORD.to_string(),
            energy_token: DEFAULT_ENERGY_TOKEN,
            plot: PlotConfig::default(),
            output_csv: None,
        }
    }
}

impl From<CompareArgs> for ReportConfig {
    fn from(args: CompareArgs) -> Self {
        let folders = if args.manual {
            FolderMode::Manual {
                initial: args.ini_dir,
                last: args.end_dir,
            }
        } else {
            FolderMode::Auto {
                pattern: args.state_pattern,
            }
        };

        ReportConfig {
            work_dir: args.work_dir,
            folders,
            poscar_line: args.poscar_line,
            keyword: args.keyword,
            lines_ignored: args.lines_ignored,
            ini_position: args.ini_position,
            end_position: args.end_position,
            energy_keyword: args.energy_keyword,
            energy_token: args.energy_token,
            plot: PlotConfig {
                enabled: !args.no_plot,
                output_dir: args.output_dir,
                format: args.format,
                width: args.width,
                height: args.height,
                marker_size: args.marker_size,
                vector_length: args.vector_length,
            },
            output_csv: args.output_csv,
        }
    }
}
