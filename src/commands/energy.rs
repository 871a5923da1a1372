//! # energy 命令实现
//!
//! 单个状态的能量收敛分析：TOTEN 序列、相邻步能量差与收敛判据。
//!
//! ## 依赖关系
//! - 使用 `cli/energy.rs` 定义的参数
//! - 使用 `parsers/outcar.rs`, `analysis/forces.rs`, `plot/energy.rs`

use crate::analysis;
use crate::cli::energy::EnergyArgs;
use crate::error::{Result, VaspForceError};
use crate::parsers::outcar::{self, ConvergenceCriteria};
use crate::plot::energy::{self as energy_plot, EnergySeries};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 能量表的一行
#[derive(Debug, Clone, Tabled)]
struct EnergyRow {
    #[tabled(rename = "Step")]
    step: usize,
    #[tabled(rename = "TOTEN (eV)")]
    energy: String,
    #[tabled(rename = "ΔE (eV)")]
    delta: String,
}

/// 由能量序列构建表格行
fn energy_rows(energies: &[f64]) -> Vec<EnergyRow> {
    let deltas = analysis::energy_deltas(energies);
    energies
        .iter()
        .enumerate()
        .map(|(i, e)| EnergyRow {
            step: i + 1,
            energy: format!("{:.8}", e),
            delta: i
                .checked_sub(1)
                .and_then(|j| deltas.get(j))
                .map(|d| format!("{:+.3e}", d))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

/// 执行 energy 命令
pub fn execute(args: EnergyArgs) -> Result<()> {
    output::print_header("Energy Convergence");

    if !args.dir.is_dir() {
        return Err(VaspForceError::DirectoryNotFound {
            path: args.dir.display().to_string(),
        });
    }

    let energies = outcar::energy_series(&args.dir, &args.energy_keyword, args.energy_token)?;
    if energies.is_empty() {
        output::print_warning(&format!(
            "No lines containing '{}' found in '{}'",
            args.energy_keyword,
            args.dir.join(outcar::OUTCAR_FILE).display()
        ));
        return Ok(());
    }

    println!("{}", Table::new(&energy_rows(&energies)));
    println!();

    if let Some(last) = energies.last() {
        output::print_info(&format!(
            "Final energy = {:.8} (eV) after {} ionic steps",
            last,
            energies.len()
        ));
    }

    let criteria = ConvergenceCriteria::from_outcar(&args.dir)?;
    if let Some(ediff) = criteria.ediff {
        output::print_info(&format!("EDIFF  = {:e} (eV)", ediff));
    }
    if let Some(ediffg) = criteria.ediffg {
        output::print_info(&format!("EDIFFG = {:e}", ediffg));

        // EDIFFG > 0 为能量判据
        if ediffg > 0.0 {
            if let Some(d) = analysis::energy_deltas(&energies).last() {
                if d.abs() <= ediffg {
                    output::print_success(&format!(
                        "Energy converged: |ΔE| = {:.3e} <= {:e}",
                        d.abs(),
                        ediffg
                    ));
                } else {
                    output::print_warning(&format!(
                        "Energy not converged: |ΔE| = {:.3e} > {:e}",
                        d.abs(),
                        ediffg
                    ));
                }
            }
        }
    }

    if let Some(ref plot_path) = args.plot {
        let series = [EnergySeries {
            label: "TOTEN",
            energies: &energies,
        }];
        let format = energy_plot::format_from_path(plot_path);
        energy_plot::render_energy(&series, plot_path, format, (1000, 700))?;
        output::print_saved("energy convergence", &plot_path.display().to_string());
    }

    Ok(())
}
