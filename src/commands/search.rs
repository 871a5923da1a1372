//! # grep / folders 命令实现
//!
//! 直接暴露文本行检索与文件夹检索。
//!
//! ## 依赖关系
//! - 使用 `cli/search.rs` 定义的参数
//! - 使用 `parsers/text.rs`, `utils/folders.rs`

use crate::cli::search::{FoldersArgs, GrepArgs};
use crate::error::Result;
use crate::parsers::text;
use crate::utils::{folders, output};

use colored::Colorize;

/// 执行 grep 命令
pub fn execute_grep(args: GrepArgs) -> Result<()> {
    let lines = text::find_string_in_file(&args.file, &args.pattern)?;

    if lines.is_empty() {
        output::print_warning(&format!(
            "No lines containing '{}' in '{}'",
            args.pattern,
            args.file.display()
        ));
        return Ok(());
    }

    for (i, line) in lines.iter().enumerate() {
        println!("{:>6}  {}", (i + 1).to_string().dimmed(), line);
    }
    output::print_info(&format!("{} matching lines", lines.len()));

    Ok(())
}

/// 执行 folders 命令
pub fn execute_folders(args: FoldersArgs) -> Result<()> {
    let found = folders::find_folders_with_string(&args.dir, &args.pattern)?;

    if found.is_empty() {
        output::print_warning(&format!(
            "No folders containing '{}' in '{}'",
            args.pattern,
            args.dir.display()
        ));
        return Ok(());
    }

    for name in &found {
        println!("{}", name);
    }
    output::print_info(&format!("{} matching folders", found.len()));

    Ok(())
}
