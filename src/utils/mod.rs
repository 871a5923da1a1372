//! # 工具函数模块
//!
//! 提供美化输出、进度提示、文件夹检索等工具。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 子模块: output, progress, folders

pub mod folders;
pub mod output;
pub mod progress;
