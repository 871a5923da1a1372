//! # 状态文件夹检索
//!
//! 列出工作目录下名称包含指定子串的直接子文件夹（不递归），
//! 并据此确定初态/末态文件夹。
//!
//! ## 依赖关系
//! - 被 `commands/compare.rs`, `commands/search.rs` 使用
//! - 使用 `walkdir` 遍历目录

use crate::error::{Result, VaspForceError};
use crate::models::FolderPair;

use std::path::Path;
use walkdir::WalkDir;

/// 返回 `path` 下所有名称包含 `substring` 的直接子文件夹名
///
/// 顺序与目录列举顺序一致（由操作系统决定）。
pub fn find_folders_with_string(path: &Path, substring: &str) -> Result<Vec<String>> {
    if !path.is_dir() {
        return Err(VaspForceError::DirectoryNotFound {
            path: path.display().to_string(),
        });
    }

    let mut folders = Vec::new();
    for entry in WalkDir::new(path).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| VaspForceError::FileReadError {
            path: path.display().to_string(),
            source: e.into(),
        })?;

        // 跟随符号链接判断是否为目录
        if !entry.path().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if name.contains(substring) {
            folders.push(name.into_owned());
        }
    }

    Ok(folders)
}

/// 自动模式：要求恰好两个匹配文件夹，前者为初态，后者为末态
pub fn resolve_state_folders(work_dir: &Path, substring: &str) -> Result<FolderPair> {
    let found = find_folders_with_string(work_dir, substring)?;

    match found.as_slice() {
        [initial, last] => Ok(FolderPair::new(work_dir.join(initial), work_dir.join(last))),
        _ => Err(VaspForceError::StateFolderCount {
            pattern: substring.to_string(),
            found,
        }),
    }
}
