//! # 数据模型模块
//!
//! 定义原子记录与模拟状态数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`analysis/` 和 `commands/` 使用
//! - 子模块: atom, state

pub mod atom;
pub mod state;

pub use atom::AtomRecord;
pub use state::{FolderPair, StateSnapshot};
