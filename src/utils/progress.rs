//! # 进度提示工具
//!
//! 封装 `indicatif`，在读取大型 OUTCAR 时显示 spinner。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `indicatif` crate

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// 创建 spinner（用于不确定进度的任务）
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {elapsed_precise} {msg}") {
        pb.set_style(style.tick_strings(&["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"]));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// 在 spinner 期间执行 `f`，完成后清除 spinner
pub fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> T {
    let pb = create_spinner(message);
    let out = f();
    pb.finish_and_clear();
    out
}
