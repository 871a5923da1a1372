//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `config.rs`, `parsers/`, `analysis/`, `plot/`, `utils/`
//! - 子模块: compare, energy, search

pub mod compare;
pub mod energy;
pub mod search;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Compare(args) => compare::execute(args),
        Commands::Energy(args) => energy::execute(args),
        Commands::Grep(args) => search::execute_grep(args),
        Commands::Folders(args) => search::execute_folders(args),
    }
}
