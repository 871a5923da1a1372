//! # VASP POSCAR 原子数提取
//!
//! 只读取 POSCAR 中记录各元素原子数的那一行（VASP 5+ 为第 7 行）。
//!
//! ## POSCAR 格式说明
//! ```text
//! Comment line (structure name)
//! 1.0                    # scaling factor
//! a1 a2 a3               # lattice vector a
//! b1 b2 b3               # lattice vector b
//! c1 c2 c3               # lattice vector c
//! Element1 Element2 ...  # element symbols (VASP 5+)
//! n1 n2 ...              # number of atoms per element  <- line 7
//! Direct/Cartesian       # coordinate type
//! ...
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/compare.rs` 使用
//! - 使用 `parsers::read_text`

use crate::error::{Result, VaspForceError};
use std::path::Path;

/// POSCAR 文件名
pub const POSCAR_FILE: &str = "POSCAR";

/// 原子数所在的默认行号（从 1 开始）
pub const DEFAULT_ATOM_COUNT_LINE: usize = 7;

/// 读取 `poscar_dir/POSCAR` 第 `line_number` 行，并对其中所有整数求和
///
/// 非整数的词（元素符号、"Cartesian" 等）被忽略。没有整数时返回 0，
/// 由调用者判定为"未找到原子数"。
pub fn total_atoms(poscar_dir: &Path, line_number: usize) -> Result<i64> {
    let path = poscar_dir.join(POSCAR_FILE);
    let content = super::read_text(&path)?;
    let total_lines = content.lines().count();

    count_atoms_on_line(&content, line_number).ok_or_else(|| VaspForceError::LineOutOfRange {
        path: path.display().to_string(),
        line: line_number,
        total: total_lines,
    })
}

/// 对内容第 `line_number` 行（从 1 开始）的整数求和；行不存在时返回 `None`
pub fn count_atoms_on_line(content: &str, line_number: usize) -> Option<i64> {
    let line = content.lines().nth(line_number.checked_sub(1)?)?;

    Some(
        line.split_whitespace()
            .filter_map(|token| token.parse::<i64>().ok())
            .sum(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const NACL: &str = r#"NaCl
1.0
5.64 0.0 0.0
0.0 5.64 0.0
0.0 0.0 5.64
Na Cl
4 4
Direct
0.0 0.0 0.0
"#;

    #[test]
    fn test_count_atoms_vasp5() {
        assert_eq!(count_atoms_on_line(NACL, 7), Some(8));
    }

    #[test]
    fn test_count_skips_non_integer_tokens() {
        let content = "a\nb\nc\nd\ne\nf\n8 4 2 Cartesian\n";
        assert_eq!(count_atoms_on_line(content, 7), Some(14));
    }

    #[test]
    fn test_element_line_gives_zero() {
        // 第 6 行是元素符号
        assert_eq!(count_atoms_on_line(NACL, 6), Some(0));
    }

    #[test]
    fn test_line_out_of_range() {
        assert_eq!(count_atoms_on_line(NACL, 42), None);
        assert_eq!(count_atoms_on_line(NACL, 0), None);
    }

    #[test]
    fn test_total_atoms_from_dir() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("POSCAR"), NACL).unwrap();

        assert_eq!(total_atoms(dir.path(), DEFAULT_ATOM_COUNT_LINE).unwrap(), 8);
    }

    #[test]
    fn test_total_atoms_missing_file() {
        let dir = tempdir().unwrap();
        let err = total_atoms(dir.path(), DEFAULT_ATOM_COUNT_LINE).unwrap_err();
        assert!(matches!(err, VaspForceError::FileNotFound { .. }));
    }

    #[test]
    fn test_total_atoms_short_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("POSCAR"), "only\nthree\nlines\n").unwrap();

        let err = total_atoms(dir.path(), DEFAULT_ATOM_COUNT_LINE).unwrap_err();
        assert!(matches!(
            err,
            VaspForceError::LineOutOfRange {
                line: 7,
                total: 3,
                ..
            }
        ));
    }
}
