//! # grep / folders 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/search.rs`

use clap::Args;
use std::path::PathBuf;

/// grep 子命令参数
#[derive(Args, Debug)]
pub struct GrepArgs {
    /// File to scan
    pub file: PathBuf,

    /// String that matching lines must contain
    pub pattern: String,
}

/// folders 子命令参数
#[derive(Args, Debug)]
pub struct FoldersArgs {
    /// Parent directory
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// String that folder names must contain
    #[arg(long, default_value = "state", env = "VASPFORCE_STATE_PATTERN")]
    pub pattern: String,
}
