//! # VASP OUTCAR 位置/受力块提取
//!
//! 在 OUTCAR 中查找关键字（默认 `TOTAL-FORCE`）第一次或最后一次出现的位置，
//! 跳过若干行后读取固定行数的 `x y z fx fy fz` 数据。
//!
//! ```text
//!  POSITION                                       TOTAL-FORCE (eV/Angst)
//!  -----------------------------------------------------------------------------------
//!       0.00000      0.00000      0.00000         0.000000      0.000000     -0.012345
//!       ...
//! ```
//!
//! 同时提供能量序列（`TOTEN`）与收敛判据（`EDIFF` / `EDIFFG`）的解析。
//!
//! ## 依赖关系
//! - 被 `commands/compare.rs`, `commands/energy.rs` 使用
//! - 使用 `models/atom.rs`, `parsers/text.rs`

use crate::error::{Result, VaspForceError};
use crate::models::AtomRecord;

use regex::Regex;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

/// OUTCAR 文件名
pub const OUTCAR_FILE: &str = "OUTCAR";

/// 位置/受力块的默认关键字
pub const DEFAULT_FORCE_KEYWORD: &str = "TOTAL-FORCE";

/// 关键字行与数据之间的分隔线数
pub const DEFAULT_LINES_IGNORED: usize = 1;

/// 每个离子步的自由能所在行
pub const DEFAULT_ENERGY_KEYWORD: &str = "free  energy   TOTEN";

/// `free  energy   TOTEN  =     -123.456 eV` 中能量值的词序号
pub const DEFAULT_ENERGY_TOKEN: usize = 4;

/// 关键字的查找方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPosition {
    /// 从文件开头查找第一次出现
    First,
    /// 从文件末尾查找最后一次出现
    Last,
}

impl FromStr for ScanPosition {
    type Err = VaspForceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "first" => Ok(ScanPosition::First),
            "last" => Ok(ScanPosition::Last),
            other => Err(VaspForceError::InvalidPosition(other.to_string())),
        }
    }
}

/// 位置/受力块的提取结果
#[derive(Debug, Clone, PartialEq)]
pub enum ForceBlock {
    /// 找到关键字，按文件顺序返回数据行
    Found(Vec<AtomRecord>),
    /// 文件中没有关键字
    KeywordNotFound,
    /// 查找方向既不是 `first` 也不是 `last`
    InvalidPosition(String),
}

impl ForceBlock {
    /// 将未找到/参数错误转换为致命错误
    pub fn into_records(self, keyword: &str, path: &Path) -> Result<Vec<AtomRecord>> {
        match self {
            ForceBlock::Found(records) => Ok(records),
            ForceBlock::KeywordNotFound => Err(VaspForceError::KeywordNotFound {
                keyword: keyword.to_string(),
                path: path.display().to_string(),
            }),
            ForceBlock::InvalidPosition(p) => Err(VaspForceError::InvalidPosition(p)),
        }
    }
}

/// 从 `outcar_dir/OUTCAR` 提取位置与受力
///
/// `position` 必须为 `"first"` 或 `"last"`，否则返回
/// `ForceBlock::InvalidPosition` 而不读取文件。
pub fn positions_forces(
    outcar_dir: &Path,
    total_lines: usize,
    lines_ignored: usize,
    position: &str,
    keyword: &str,
) -> Result<ForceBlock> {
    match position.parse::<ScanPosition>() {
        Ok(pos) => positions_forces_at(outcar_dir, total_lines, lines_ignored, pos, keyword),
        Err(_) => Ok(ForceBlock::InvalidPosition(position.to_string())),
    }
}

/// `positions_forces` 的强类型版本
pub fn positions_forces_at(
    outcar_dir: &Path,
    total_lines: usize,
    lines_ignored: usize,
    position: ScanPosition,
    keyword: &str,
) -> Result<ForceBlock> {
    let path = outcar_dir.join(OUTCAR_FILE);
    let content = super::read_text(&path)?;
    let lines: Vec<&str> = content.lines().collect();

    extract_block(
        &lines,
        total_lines,
        lines_ignored,
        position,
        keyword,
        &path.display().to_string(),
    )
}

/// 在内存中的行列表上执行块提取
pub fn extract_block(
    lines: &[&str],
    total_lines: usize,
    lines_ignored: usize,
    position: ScanPosition,
    keyword: &str,
    source: &str,
) -> Result<ForceBlock> {
    let Some(keyword_idx) = find_keyword_line(lines, keyword, position) else {
        return Ok(ForceBlock::KeywordNotFound);
    };

    let start = keyword_idx + lines_ignored + 1;
    let end = start.saturating_add(total_lines).min(lines.len());

    let mut records = Vec::with_capacity(end.saturating_sub(start));
    for (idx, line) in lines.iter().enumerate().take(end).skip(start) {
        records.push(parse_record_line(line, idx + 1, source)?);
    }

    Ok(ForceBlock::Found(records))
}

/// 返回关键字所在行的下标（从 0 开始）
pub fn find_keyword_line(lines: &[&str], keyword: &str, position: ScanPosition) -> Option<usize> {
    match position {
        ScanPosition::First => lines.iter().position(|l| l.contains(keyword)),
        ScanPosition::Last => lines.iter().rposition(|l| l.contains(keyword)),
    }
}

/// 解析一行 `x y z fx fy fz`
fn parse_record_line(line: &str, line_no: usize, source: &str) -> Result<AtomRecord> {
    let values = line
        .split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| VaspForceError::ParseError {
                format: "outcar".to_string(),
                path: source.to_string(),
                reason: format!("Invalid number '{}' at line {}", token, line_no),
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    AtomRecord::from_values(&values).ok_or_else(|| VaspForceError::ParseError {
        format: "outcar".to_string(),
        path: source.to_string(),
        reason: format!(
            "Expected 6 values (x y z fx fy fz) at line {}, found {}",
            line_no,
            values.len()
        ),
    })
}

/// 解析每行第 `token` 个词为能量值
pub fn parse_energy_series(lines: &[String], token: usize, source: &str) -> Result<Vec<f64>> {
    lines
        .iter()
        .map(|line| {
            line.split_whitespace()
                .nth(token)
                .and_then(|t| t.parse::<f64>().ok())
                .ok_or_else(|| VaspForceError::ParseError {
                    format: "outcar".to_string(),
                    path: source.to_string(),
                    reason: format!("No numeric value at token {} in '{}'", token, line),
                })
        })
        .collect()
}

/// 读取 `outcar_dir/OUTCAR` 中的能量序列
pub fn energy_series(outcar_dir: &Path, keyword: &str, token: usize) -> Result<Vec<f64>> {
    let path = outcar_dir.join(OUTCAR_FILE);
    let lines = super::text::find_string_in_file(&path, keyword)?;
    parse_energy_series(&lines, token, &path.display().to_string())
}

static EDIFF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\bEDIFF\s*=\s*{}", NUMBER_PATTERN)).unwrap());
static EDIFFG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\bEDIFFG\s*=\s*{}", NUMBER_PATTERN)).unwrap());

const NUMBER_PATTERN: &str = r"([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)";

/// OUTCAR 中回显的收敛判据
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConvergenceCriteria {
    /// 电子步能量收敛判据 (eV)
    pub ediff: Option<f64>,
    /// 离子步收敛判据（负值表示受力判据，eV/Å）
    pub ediffg: Option<f64>,
}

impl ConvergenceCriteria {
    /// 从包含 `EDIFF` 的行中解析；每个参数取第一次出现的值
    pub fn from_lines(lines: &[String]) -> Self {
        let first_match = |re: &Regex| -> Option<f64> {
            lines.iter().find_map(|line| {
                re.captures(line)
                    .and_then(|c| c.get(1))
                    .and_then(|m| m.as_str().parse().ok())
            })
        };

        ConvergenceCriteria {
            ediff: first_match(&*EDIFF_RE),
            ediffg: first_match(&*EDIFFG_RE),
        }
    }

    /// 读取 `outcar_dir/OUTCAR` 中的 EDIFF / EDIFFG
    pub fn from_outcar(outcar_dir: &Path) -> Result<Self> {
        let path = outcar_dir.join(OUTCAR_FILE);
        let lines = super::text::find_string_in_file(&path, "EDIFF")?;
        Ok(Self::from_lines(&lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const TWO_BLOCKS: &str = r#" POSITION                                       TOTAL-FORCE (eV/Angst)
 -----------------------------------------------------------------------------------
      0.00000      0.00000      0.00000         0.100000      0.200000     -0.300000
      1.50000      1.50000      1.50000        -0.100000     -0.200000      0.300000
 -----------------------------------------------------------------------------------
    total drift:                                0.000000      0.000000      0.000000
  free  energy   TOTEN  =       -10.50000000 eV
 POSITION                                       TOTAL-FORCE (eV/Angst)
 -----------------------------------------------------------------------------------
      0.01000      0.02000      0.03000         0.010000      0.020000     -0.030000
      1.49000      1.48000      1.47000        -0.010000     -0.020000      0.030000
 -----------------------------------------------------------------------------------
  free  energy   TOTEN  =       -10.75000000 eV
"#;

    fn lines() -> Vec<&'static str> {
        TWO_BLOCKS.lines().collect()
    }

    #[test]
    fn test_scan_position_from_str() {
        assert_eq!("first".parse::<ScanPosition>().unwrap(), ScanPosition::First);
        assert_eq!("last".parse::<ScanPosition>().unwrap(), ScanPosition::Last);
        assert!("middle".parse::<ScanPosition>().is_err());
    }

    #[test]
    fn test_extract_last_block() {
        let block = extract_block(&lines(), 2, 1, ScanPosition::Last, "TOTAL-FORCE", "t").unwrap();
        let ForceBlock::Found(records) = block else {
            panic!("expected block");
        };
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].position, [0.01, 0.02, 0.03]);
        assert_eq!(records[1].force, [-0.01, -0.02, 0.03]);
    }

    #[test]
    fn test_extract_first_block() {
        let block =
            extract_block(&lines(), 2, 1, ScanPosition::First, "TOTAL-FORCE", "t").unwrap();
        let ForceBlock::Found(records) = block else {
            panic!("expected block");
        };
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].force, [0.1, 0.2, -0.3]);
        assert_eq!(records[1].position, [1.5, 1.5, 1.5]);
    }

    #[test]
    fn test_keyword_not_found() {
        let block = extract_block(&lines(), 2, 1, ScanPosition::Last, "NOPE", "t").unwrap();
        assert_eq!(block, ForceBlock::KeywordNotFound);
    }

    #[test]
    fn test_truncated_at_end_of_file() {
        let content = "TOTAL-FORCE\n----\n1 2 3 4 5 6\n";
        let lines: Vec<&str> = content.lines().collect();
        let block = extract_block(&lines, 10, 1, ScanPosition::Last, "TOTAL-FORCE", "t").unwrap();
        assert_eq!(
            block,
            ForceBlock::Found(vec![AtomRecord::new([1.0, 2.0, 3.0], [4.0, 5.0, 6.0])])
        );
    }

    #[test]
    fn test_keyword_on_last_line_gives_empty_block() {
        let lines = vec!["header", "TOTAL-FORCE"];
        let block = extract_block(&lines, 4, 1, ScanPosition::Last, "TOTAL-FORCE", "t").unwrap();
        assert_eq!(block, ForceBlock::Found(vec![]));
    }

    #[test]
    fn test_malformed_line_is_error() {
        let lines = vec!["TOTAL-FORCE", "----", "1.0 2.0 abc 4.0 5.0 6.0"];
        let err = extract_block(&lines, 1, 1, ScanPosition::First, "TOTAL-FORCE", "t");
        assert!(matches!(err, Err(VaspForceError::ParseError { .. })));
    }

    #[test]
    fn test_short_line_is_error() {
        let lines = vec!["TOTAL-FORCE", "----", "1.0 2.0 3.0"];
        let err = extract_block(&lines, 1, 1, ScanPosition::First, "TOTAL-FORCE", "t");
        assert!(matches!(err, Err(VaspForceError::ParseError { .. })));
    }

    #[test]
    fn test_synthetic_block_reproduces_values() {
        let expected: Vec<AtomRecord> = (0..5)
            .map(|i| {
                let x = i as f64 * 1.234567;
                AtomRecord::new([x, x + 0.5, -x], [0.001 * i as f64, -0.25, 1.0e-4])
            })
            .collect();

        let mut content = String::from(" POSITION   TOTAL-FORCE (eV/Angst)\n -------\n");
        for rec in &expected {
            content.push_str(&format!(
                "  {:12.5} {:12.5} {:12.5} {:14.6} {:14.6} {:14.6}\n",
                rec.position[0],
                rec.position[1],
                rec.position[2],
                rec.force[0],
                rec.force[1],
                rec.force[2]
            ));
        }
        let lines: Vec<&str> = content.lines().collect();

        let ForceBlock::Found(parsed) =
            extract_block(&lines, 5, 1, ScanPosition::Last, "TOTAL-FORCE", "t").unwrap()
        else {
            panic!("expected block");
        };

        assert_eq!(parsed.len(), expected.len());
        for (p, e) in parsed.iter().zip(&expected) {
            for k in 0..3 {
                assert!((p.position[k] - e.position[k]).abs() < 1e-5);
                assert!((p.force[k] - e.force[k]).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_positions_forces_from_dir() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("OUTCAR"), TWO_BLOCKS).unwrap();

        let last = positions_forces(dir.path(), 2, 1, "last", DEFAULT_FORCE_KEYWORD).unwrap();
        let first = positions_forces(dir.path(), 2, 1, "first", DEFAULT_FORCE_KEYWORD).unwrap();
        assert_ne!(last, first);

        let missing = positions_forces(dir.path(), 2, 1, "last", "MISSING").unwrap();
        assert_eq!(missing, ForceBlock::KeywordNotFound);
    }

    #[test]
    fn test_invalid_position() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("OUTCAR"), TWO_BLOCKS).unwrap();

        let block = positions_forces(dir.path(), 2, 1, "middle", DEFAULT_FORCE_KEYWORD).unwrap();
        assert_eq!(block, ForceBlock::InvalidPosition("middle".to_string()));
    }

    #[test]
    fn test_invalid_position_checked_before_reading() {
        let dir = tempdir().unwrap();

        let block = positions_forces(dir.path(), 2, 1, "middle", DEFAULT_FORCE_KEYWORD).unwrap();
        assert_eq!(block, ForceBlock::InvalidPosition("middle".to_string()));

        let err = positions_forces(dir.path(), 2, 1, "last", DEFAULT_FORCE_KEYWORD).unwrap_err();
        assert!(matches!(err, VaspForceError::FileNotFound { .. }));
    }

    #[test]
    fn test_into_records() {
        let path = Path::new("OUTCAR");
        assert!(matches!(
            ForceBlock::KeywordNotFound.into_records("TOTAL-FORCE", path),
            Err(VaspForceError::KeywordNotFound { .. })
        ));
        assert!(matches!(
            ForceBlock::InvalidPosition("x".into()).into_records("TOTAL-FORCE", path),
            Err(VaspForceError::InvalidPosition(_))
        ));
        assert!(ForceBlock::Found(vec![])
            .into_records("TOTAL-FORCE", path)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_energy_series() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("OUTCAR"), TWO_BLOCKS).unwrap();

        let energies =
            energy_series(dir.path(), DEFAULT_ENERGY_KEYWORD, DEFAULT_ENERGY_TOKEN).unwrap();
        assert_eq!(energies, vec![-10.5, -10.75]);
    }

    #[test]
    fn test_energy_series_bad_token() {
        let lines = vec!["free  energy   TOTEN  =".to_string()];
        assert!(parse_energy_series(&lines, DEFAULT_ENERGY_TOKEN, "t").is_err());
    }

    #[test]
    fn test_convergence_criteria() {
        let lines = vec![
            "EDIFF  = 0.1E-05   stopping-criterion for ELM".to_string(),
            "EDIFFG = -.2E-01   stopping-criterion for IOM".to_string(),
        ];
        let criteria = ConvergenceCriteria::from_lines(&lines);
        assert_eq!(criteria.ediff, Some(1e-6));
        assert_eq!(criteria.ediffg, Some(-0.02));
    }

    #[test]
    fn test_convergence_criteria_absent() {
        let criteria = ConvergenceCriteria::from_lines(&[]);
        assert_eq!(criteria, ConvergenceCriteria::default());
    }
}
