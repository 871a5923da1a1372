//! # 文本行检索
//!
//! 逐行流式读取文本文件，返回包含指定子串的所有行（去除首尾空白）。
//!
//! ## 依赖关系
//! - 被 `parsers/outcar.rs`, `commands/search.rs` 使用

use crate::error::{Result, VaspForceError};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

/// 返回文件中所有包含 `substring` 的行，保持文件顺序
pub fn find_string_in_file(path: &Path, substring: &str) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => VaspForceError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => VaspForceError::FileReadError {
            path: path.display().to_string(),
            source: e,
        },
    })?;

    find_string_in_reader(BufReader::new(file), substring).map_err(|e| {
        VaspForceError::FileReadError {
            path: path.display().to_string(),
            source: e,
        }
    })
}

/// 对任意 `BufRead` 执行相同的检索
pub fn find_string_in_reader<R: BufRead>(
    reader: R,
    substring: &str,
) -> std::io::Result<Vec<String>> {
    let mut found = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.contains(substring) {
            found.push(line.trim().to_string());
        }
    }
    Ok(found)
}
