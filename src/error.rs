//! # 统一错误处理模块
//!
//! 定义 vaspforce 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分类
//! - 配置错误：状态文件夹数量不为 2
//! - 数据缺失：POSCAR 原子数为 0、OUTCAR 中找不到关键字
//! - I/O 错误：文件缺失、权限等
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// vaspforce 统一错误类型
#[derive(Error, Debug)]
pub enum VaspForceError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Line {line} requested from {path}, but the file only has {total} lines")]
    LineOutOfRange {
        path: String,
        line: usize,
        total: usize,
    },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 配置 / 数据缺失错误
    // ─────────────────────────────────────────────────────────────
    #[error(
        "Expected exactly 2 folders containing '{pattern}', found {}: {found:?}",
        .found.len()
    )]
    StateFolderCount { pattern: String, found: Vec<String> },

    #[error("No atoms found on line {line} of {path}")]
    NoAtoms { path: String, line: usize },

    #[error("Keyword '{keyword}' not found in {path}")]
    KeywordNotFound { keyword: String, path: String },

    #[error("Invalid scan position '{0}' (expected 'first' or 'last')")]
    InvalidPosition(String),

    #[error("Atom count mismatch: initial state has {initial}, final state has {last}")]
    AtomCountMismatch { initial: usize, last: usize },

    // ─────────────────────────────────────────────────────────────
    // 输出错误
    // ─────────────────────────────────────────────────────────────
    #[error("Plot rendering failed: {0}")]
    PlotError(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, VaspForceError>;
