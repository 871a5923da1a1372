//! # compare 命令实现
//!
//! 初态/末态对比主流程。
//!
//! ## 流程
//! 1. 确定初态/末态文件夹（自动检索或固定名称）
//! 2. 从初态 POSCAR 读取原子总数（为 0 则终止）
//! 3. 从两个 OUTCAR 提取位置/受力块与能量序列
//! 4. 计算逐原子位移
//! 5. 打印汇总表，可选导出 CSV 与绘图
//!
//! ## 依赖关系
//! - 使用 `cli/compare.rs` 定义的参数，经 `config.rs` 转换
//! - 使用 `parsers/`, `analysis/`, `plot/`, `export.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`, `utils/folders.rs`

use crate::analysis::{self, ForceStats};
use crate::cli::compare::CompareArgs;
use crate::config::{FolderMode, PlotConfig, ReportConfig};
use crate::error::{Result, VaspForceError};
use crate::export;
use crate::models::{FolderPair, StateSnapshot};
use crate::parsers::outcar::{self, ConvergenceCriteria, OUTCAR_FILE};
use crate::parsers::poscar::{self, POSCAR_FILE};
use crate::plot::{self, energy::EnergySeries};
use crate::utils::{folders, output, progress};

use std::fs;
use std::path::Path;
use tabled::{Table, Tabled};

/// 汇总表的一行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "max |Fx| (eV/Angst)")]
    fx: String,
    #[tabled(rename = "max |Fy| (eV/Angst)")]
    fy: String,
    #[tabled(rename = "max |Fz| (eV/Angst)")]
    fz: String,
    #[tabled(rename = "max |F| (eV/Angst)")]
    norm: String,
    #[tabled(rename = "Energy (eV)")]
    energy: String,
}

impl SummaryRow {
    fn from_state(state: &StateSnapshot) -> Self {
        let stats = ForceStats::from_records(&state.atoms);
        let max_abs = stats.map(|s| s.max_abs());
        let component = |k: usize| {
            max_abs
                .map(|m| format!("{:.6}", m[k]))
                .unwrap_or_else(|| "n/a".to_string())
        };

        SummaryRow {
            state: state.label.clone(),
            fx: component(0),
            fy: component(1),
            fz: component(2),
            norm: stats
                .map(|s| format!("{:.6}", s.norm.max))
                .unwrap_or_else(|| "n/a".to_string()),
            energy: state
                .final_energy()
                .map(|e| format!("{:.6}", e))
                .unwrap_or_else(|| "n/a".to_string()),
        }
    }
}

/// compare 流程的结果
#[derive(Debug, Clone)]
pub struct Report {
    pub folders: FolderPair,
    pub total_atoms: usize,
    pub initial: StateSnapshot,
    pub last: StateSnapshot,
    pub displacements: Vec<f64>,
}

/// 执行 compare 命令
pub fn execute(args: CompareArgs) -> Result<()> {
    let config = ReportConfig::from(args);
    let report = run_report(&config)?;

    let energies = (report.initial.final_energy(), report.last.final_energy());
    if let (Some(e_ini), Some(e_end)) = energies {
        output::print_info(&format!("ΔE (final - initial) = {:.6} (eV)", e_end - e_ini));
    }
    output::print_success(&format!(
        "Compared {} of {} atoms: '{}' -> '{}'",
        report.displacements.len(),
        report.total_atoms,
        report.folders.initial.display(),
        report.folders.last.display()
    ));

    Ok(())
}

/// 按配置执行完整的对比流程
pub fn run_report(config: &ReportConfig) -> Result<Report> {
    output::print_header("Comparing Initial and Final States");

    let pair = resolve_folders(config)?;
    output::print_info(&format!("Initial state: '{}'", pair.initial.display()));
    output::print_info(&format!("Final state:   '{}'", pair.last.display()));

    let total_atoms = poscar::total_atoms(&pair.initial, config.poscar_line)?;
    if total_atoms <= 0 {
        return Err(VaspForceError::NoAtoms {
            path: pair.initial.join(POSCAR_FILE).display().to_string(),
            line: config.poscar_line,
        });
    }
    let total_atoms = total_atoms as usize;
    output::print_info(&format!("Total number of atoms = {}", total_atoms));

    let initial = load_state(
        "Initial state",
        &pair.initial,
        total_atoms,
        &config.ini_position,
        config,
    )?;
    let last = load_state(
        "Final state",
        &pair.last,
        total_atoms,
        &config.end_position,
        config,
    )?;

    let displacements = analysis::displacements(&initial.atoms, &last.atoms)?;

    print_summary(&initial, &last, &displacements);
    print_criteria(&last);

    if let Some(ref csv_path) = config.output_csv {
        export::atoms_to_csv(csv_path, &initial.atoms, &last.atoms, &displacements)?;
        output::print_saved("per-atom CSV", &csv_path.display().to_string());
    }

    if config.plot.enabled {
        render_figures(&config.plot, &initial, &last, &displacements)?;
    }

    Ok(Report {
        folders: pair,
        total_atoms,
        initial,
        last,
        displacements,
    })
}

/// 确定初态/末态文件夹
pub fn resolve_folders(config: &ReportConfig) -> Result<FolderPair> {
    match &config.folders {
        FolderMode::Auto { pattern } => folders::resolve_state_folders(&config.work_dir, pattern),
        FolderMode::Manual { initial, last } => Ok(FolderPair::new(
            config.work_dir.join(initial),
            config.work_dir.join(last),
        )),
    }
}

/// 读取一个状态的位置/受力块与能量序列
fn load_state(
    label: &str,
    dir: &Path,
    total_atoms: usize,
    position: &str,
    config: &ReportConfig,
) -> Result<StateSnapshot> {
    let outcar_path = dir.join(OUTCAR_FILE);

    let atoms = progress::with_spinner(&format!("Reading {}", outcar_path.display()), || {
        outcar::positions_forces(
            dir,
            total_atoms,
            config.lines_ignored,
            position,
            &config.keyword,
        )
    })?
    .into_records(&config.keyword, &outcar_path)?;

    if atoms.len() < total_atoms {
        output::print_warning(&format!(
            "{}: expected {} atoms after '{}' ({} occurrence), got {}",
            label,
            total_atoms,
            config.keyword,
            position,
            atoms.len()
        ));
    }

    let energies = outcar::energy_series(dir, &config.energy_keyword, config.energy_token)?;

    Ok(StateSnapshot::new(label, dir.to_path_buf(), atoms, energies))
}

fn print_summary(initial: &StateSnapshot, last: &StateSnapshot, displacements: &[f64]) {
    output::print_header("Summary");

    let rows = vec![SummaryRow::from_state(initial), SummaryRow::from_state(last)];
    println!("{}", Table::new(&rows));
    println!();

    match analysis::max_with_index(displacements) {
        Some((idx, d)) => output::print_info(&format!(
            "Max. displacement = {:.4} (Angst) at atom #{}",
            d,
            idx + 1
        )),
        None => output::print_warning("No atoms to compare"),
    }
}

/// 读取状态目录下 OUTCAR 的收敛判据；失败时给出警告
fn load_criteria(state: &StateSnapshot) -> Option<ConvergenceCriteria> {
    match ConvergenceCriteria::from_outcar(&state.dir) {
        Ok(c) => Some(c),
        Err(e) => {
            output::print_warning(&format!(
                "{}: cannot read EDIFF/EDIFFG from '{}': {}",
                state.label,
                state.dir.display(),
                e
            ));
            None
        }
    }
}

/// 打印末态的收敛判据，并检查受力判据（EDIFFG < 0）是否满足
fn print_criteria(last: &StateSnapshot) {
    let Some(criteria) = load_criteria(last) else {
        return;
    };

    if let Some(ediff) = criteria.ediff {
        output::print_info(&format!("EDIFF  = {:e} (eV)", ediff));
    }
    if let Some(ediffg) = criteria.ediffg {
        output::print_info(&format!("EDIFFG = {:e}", ediffg));

        if ediffg < 0.0 {
            if let Some(stats) = ForceStats::from_records(&last.atoms) {
                let max_norm = stats.norm.max;
                if max_norm <= ediffg.abs() {
                    output::print_success(&format!(
                        "Final state forces converged: max |F| = {:.4} <= {:.4} (eV/Angst)",
                        max_norm,
                        ediffg.abs()
                    ));
                } else {
                    output::print_warning(&format!(
                        "Final state forces not converged: max |F| = {:.4} > {:.4} (eV/Angst)",
                        max_norm,
                        ediffg.abs()
                    ));
                }
            }
        }
    }
}

fn render_figures(
    plot_cfg: &PlotConfig,
    initial: &StateSnapshot,
    last: &StateSnapshot,
    displacements: &[f64],
) -> Result<()> {
    fs::create_dir_all(&plot_cfg.output_dir).map_err(|e| VaspForceError::FileWriteError {
        path: plot_cfg.output_dir.display().to_string(),
        source: e,
    })?;

    let path = plot_cfg.figure_path("forces_components");
    plot::forces::render_components(initial, last, &path, plot_cfg)?;
    output::print_saved("force components", &path.display().to_string());

    let path = plot_cfg.figure_path("forces_vectors");
    plot::forces::render_vectors(initial, last, &path, plot_cfg)?;
    output::print_saved("force vectors", &path.display().to_string());

    let path = plot_cfg.figure_path("displacement");
    plot::forces::render_displacement(initial, displacements, &path, plot_cfg)?;
    output::print_saved("displacement", &path.display().to_string());

    let path = plot_cfg.figure_path("energy");
    let series = [
        EnergySeries {
            label: &initial.label,
            energies: &initial.energies,
        },
        EnergySeries {
            label: &last.label,
            energies: &last.energies,
        },
    ];
    if plot::energy::render_energy(
        &series,
        &path,
        plot_cfg.format,
        (plot_cfg.width, plot_cfg.height),
    )? {
        output::print_saved("energy convergence", &path.display().to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    const POSCAR: &str = "Si2\n1.0\n5.4 0 0\n0 5.4 0\n0 0 5.4\nSi\n2\nCartesian\n0 0 0\n1.35 1.35 1.35\n";

    fn outcar(shift: f64, energies: &[f64]) -> String {
        let mut s = String::from("   EDIFF  = 0.1E-05   stopping-criterion for ELM\n");
        s.push_str("   EDIFFG = -.2E-01   stopping-criterion for IOM\n");
        for (step, e) in energies.iter().enumerate() {
            let f = 0.1 / (step + 1) as f64;
            s.push_str(" POSITION                                       TOTAL-FORCE (eV/Angst)\n");
            s.push_str(" -----------------------------------------------------------------------------------\n");
            s.push_str(&format!(
                "      0.00000      0.00000      0.00000   {:12.6}  0.000000  0.000000\n",
                f
            ));
            s.push_str(&format!(
                "      {:.5}      1.35000      1.35000   {:12.6}  0.000000  0.000000\n",
                1.35 + shift,
                -f
            ));
            s.push_str(" -----------------------------------------------------------------------------------\n");
            s.push_str(&format!("  free  energy   TOTEN  =   {:16.8} eV\n", e));
        }
        s
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn work_dir() -> TempDir {
        let dir = tempdir().unwrap();
        write(dir.path(), "ini_state/POSCAR", POSCAR);
        write(dir.path(), "ini_state/OUTCAR", &outcar(0.0, &[-10.0]));
        write(dir.path(), "end_state/POSCAR", POSCAR);
        write(dir.path(), "end_state/OUTCAR", &outcar(0.25, &[-10.2, -10.4, -10.5]));
        dir
    }

    fn manual_config(dir: &TempDir) -> ReportConfig {
        ReportConfig {
            work_dir: dir.path().to_path_buf(),
            folders: FolderMode::Manual {
                initial: "ini_state".into(),
                last: "end_state".into(),
            },
            plot: PlotConfig {
                enabled: false,
                ..PlotConfig::default()
            },
            ..ReportConfig::default()
        }
    }

    #[test]
    fn test_run_report_manual() {
        let dir = work_dir();
        let report = run_report(&manual_config(&dir)).unwrap();

        assert_eq!(report.total_atoms, 2);
        assert_eq!(report.last.dir, dir.path().join("end_state"));
        assert_eq!(report.initial.atoms.len(), 2);
        assert_eq!(report.last.atoms.len(), 2);
        assert_eq!(report.last.energies, vec![-10.2, -10.4, -10.5]);
        assert_eq!(report.last.final_energy(), Some(-10.5));

        // 末态读取最后一个块：受力为 0.1 / 3
        assert!((report.last.atoms[0].force[0] - 0.033333).abs() < 1e-6);

        assert_eq!(report.displacements[0], 0.0);
        assert!((report.displacements[1] - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_run_report_auto_with_csv() {
        let dir = work_dir();
        let csv_path = dir.path().join("atoms.csv");
        let config = ReportConfig {
            work_dir: dir.path().to_path_buf(),
            output_csv: Some(csv_path.clone()),
            plot: PlotConfig {
                enabled: false,
                ..PlotConfig::default()
            },
            ..ReportConfig::default()
        };

        let report = run_report(&config).unwrap();
        assert_eq!(report.displacements.len(), 2);
        assert!(csv_path.exists());
    }

    #[test]
    fn test_first_block_of_final_state() {
        let dir = work_dir();
        let config = ReportConfig {
            end_position: "first".to_string(),
            ..manual_config(&dir)
        };

        let report = run_report(&config).unwrap();
        assert!((report.last.atoms[0].force[0] - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_identical_states_have_zero_displacement() {
        let dir = tempdir().unwrap();
        write(dir.path(), "ini_state/POSCAR", POSCAR);
        write(dir.path(), "ini_state/OUTCAR", &outcar(0.0, &[-10.0]));
        write(dir.path(), "end_state/POSCAR", POSCAR);
        write(dir.path(), "end_state/OUTCAR", &outcar(0.0, &[-10.0]));

        let report = run_report(&manual_config(&dir)).unwrap();
        assert!(report.displacements.iter().all(|d| *d == 0.0));
    }

    #[test]
    fn test_wrong_folder_count_is_fatal() {
        let dir = work_dir();
        fs::create_dir_all(dir.path().join("extra_state")).unwrap();
        let config = ReportConfig {
            work_dir: dir.path().to_path_buf(),
            ..ReportConfig::default()
        };

        let err = run_report(&config).unwrap_err();
        assert!(matches!(err, VaspForceError::StateFolderCount { .. }));
    }

    #[test]
    fn test_zero_atoms_is_fatal() {
        let dir = work_dir();
        let config = ReportConfig {
            poscar_line: 6,
            ..manual_config(&dir)
        };

        let err = run_report(&config).unwrap_err();
        assert!(matches!(err, VaspForceError::NoAtoms { line: 6, .. }));
    }

    #[test]
    fn test_missing_keyword_is_fatal() {
        let dir = work_dir();
        let config = ReportConfig {
            keyword: "NOT-IN-OUTCAR".to_string(),
            ..manual_config(&dir)
        };

        let err = run_report(&config).unwrap_err();
        assert!(matches!(err, VaspForceError::KeywordNotFound { .. }));
    }

    #[test]
    fn test_invalid_position_is_fatal() {
        let dir = work_dir();
        let config = ReportConfig {
            ini_position: "middle".to_string(),
            ..manual_config(&dir)
        };

        let err = run_report(&config).unwrap_err();
        assert!(matches!(err, VaspForceError::InvalidPosition(ref p) if p == "middle"));
    }

    #[test]
    fn test_missing_outcar_propagates() {
        let dir = tempdir().unwrap();
        write(dir.path(), "ini_state/POSCAR", POSCAR);
        fs::create_dir_all(dir.path().join("end_state")).unwrap();

        let err = run_report(&manual_config(&dir)).unwrap_err();
        assert!(matches!(err, VaspForceError::FileNotFound { .. }));
    }

    #[test]
    fn test_criteria_from_state_dir() {
        let dir = work_dir();
        let report = run_report(&manual_config(&dir)).unwrap();

        let criteria = load_criteria(&report.last).unwrap();
        assert_eq!(criteria.ediff, Some(1e-6));
        assert_eq!(criteria.ediffg, Some(-0.02));
    }

    #[test]
    fn test_unreadable_criteria_give_none() {
        let dir = tempdir().unwrap();
        let state = StateSnapshot::new("Final state", dir.path().join("gone"), vec![], vec![]);
        assert!(load_criteria(&state).is_none());
    }
}
