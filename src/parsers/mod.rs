//! # 解析器模块
//!
//! 从 VASP 输入/输出文件中提取原子数、位置、受力与能量。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: poscar, outcar, text

pub mod outcar;
pub mod poscar;
pub mod text;

use crate::error::{Result, VaspForceError};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// 读取整个文本文件；文件不存在时返回 `FileNotFound`
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => VaspForceError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => VaspForceError::FileReadError {
            path: path.display().to_string(),
            source: e,
        },
    })
}
