//! # vaspforce - VASP 初态/末态受力与位移对比
//!
//! 从两个 VASP 计算（初态、末态）的 POSCAR/OUTCAR 中提取原子数、
//! 位置、受力与能量，打印汇总并绘制对比图。
//!
//! ## 子命令
//! - `compare` - 初态/末态对比（主流程）
//! - `energy`  - 单个状态的能量收敛
//! - `grep`    - 提取文件中包含指定字符串的行
//! - `folders` - 列出名称包含指定字符串的子文件夹
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── config.rs   (运行配置)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (POSCAR/OUTCAR 解析)
//!   │     ├── analysis/  (位移、受力统计)
//!   │     ├── plot/      (图表生成)
//!   │     ├── export.rs  (CSV 导出)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod analysis;
mod cli;
mod commands;
mod config;
mod error;
mod export;
mod models;
mod parsers;
mod plot;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
