//! # 逐原子数据导出
//!
//! 将初态/末态的位置、受力与位移写入 CSV，每个原子一行。
//!
//! ## 依赖关系
//! - 被 `commands/compare.rs` 调用
//! - 使用 `csv` + `serde` 写入

use crate::error::{Result, VaspForceError};
use crate::models::AtomRecord;

use serde::Serialize;
use std::path::Path;

/// CSV 中的一行
#[derive(Debug, Serialize)]
struct AtomRow {
    atom: usize,
    x_ini: f64,
    y_ini: f64,
    z_ini: f64,
    fx_ini: f64,
    fy_ini: f64,
    fz_ini: f64,
    x_end: f64,
    y_end: f64,
    z_end: f64,
    fx_end: f64,
    fy_end: f64,
    fz_end: f64,
    displacement: f64,
}

impl AtomRow {
    fn new(index: usize, ini: &AtomRecord, end: &AtomRecord, displacement: f64) -> Self {
        AtomRow {
            atom: index + 1,
            x_ini: ini.position[0],
            y_ini: ini.position[1],
            z_ini: ini.position[2],
            fx_ini: ini.force[0],
            fy_ini: ini.force[1],
            fz_ini: ini.force[2],
            x_end: end.position[0],
            y_end: end.position[1],
            z_end: end.position[2],
            fx_end: end.force[0],
            fy_end: end.force[1],
            fz_end: end.force[2],
            displacement,
        }
    }
}

/// 导出逐原子数据（原子编号从 1 开始）
pub fn atoms_to_csv(
    output_path: &Path,
    initial: &[AtomRecord],
    last: &[AtomRecord],
    displacements: &[f64],
) -> Result<()> {
    if initial.len() != last.len() || initial.len() != displacements.len() {
        return Err(VaspForceError::AtomCountMismatch {
            initial: initial.len(),
            last: last.len(),
        });
    }

    let mut wtr = csv::Writer::from_path(output_path)?;

    for (i, ((ini, end), d)) in initial.iter().zip(last).zip(displacements).enumerate() {
        wtr.serialize(AtomRow::new(i, ini, end, *d))?;
    }

    wtr.flush().map_err(|e| VaspForceError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
