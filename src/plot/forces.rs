//! # 受力与位移三维图
//!
//! - 分量散点图：颜色表示 Fx / Fy / Fz
//! - 矢量场：从原子位置出发、沿受力方向的箭头，颜色表示 |F|
//! - 位移热图：颜色表示初态到末态的位移
//!
//! ## 依赖关系
//! - 被 `commands/compare.rs` 调用
//! - 使用 `plot/colormap.rs`, `analysis/forces.rs`
//! - 使用 `plotters` 渲染图表

use super::colormap::jet;
use super::{plot_err, Bounds3};
use crate::analysis::{force_norms, max_with_index, AxisRange};
use crate::cli::compare::PlotFormat;
use crate::config::PlotConfig;
use crate::error::Result;
use crate::models::{AtomRecord, StateSnapshot};

use plotters::coord::cartesian::Cartesian3d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

const AXIS_NAMES: [&str; 3] = ["X", "Y", "Z"];

/// 生成 2×3 受力分量散点图
pub fn render_components(
    initial: &StateSnapshot,
    last: &StateSnapshot,
    path: &Path,
    plot: &PlotConfig,
) -> Result<()> {
    match plot.format {
        PlotFormat::Png => {
            let root = BitMapBackend::new(path, (plot.width, plot.height)).into_drawing_area();
            draw_components(&root, initial, last, plot.marker_size)?;
            root.present().map_err(plot_err)
        }
        PlotFormat::Svg => {
            let root = SVGBackend::new(path, (plot.width, plot.height)).into_drawing_area();
            draw_components(&root, initial, last, plot.marker_size)?;
            root.present().map_err(plot_err)
        }
    }
}

/// 生成 1×2 受力矢量场
pub fn render_vectors(
    initial: &StateSnapshot,
    last: &StateSnapshot,
    path: &Path,
    plot: &PlotConfig,
) -> Result<()> {
    match plot.format {
        PlotFormat::Png => {
            let root = BitMapBackend::new(path, (plot.width, plot.height)).into_drawing_area();
            draw_vectors(&root, initial, last, plot.vector_length)?;
            root.present().map_err(plot_err)
        }
        PlotFormat::Svg => {
            let root = SVGBackend::new(path, (plot.width, plot.height)).into_drawing_area();
            draw_vectors(&root, initial, last, plot.vector_length)?;
            root.present().map_err(plot_err)
        }
    }
}

/// 生成位移热图（画在初态位置上）
pub fn render_displacement(
    initial: &StateSnapshot,
    displacements: &[f64],
    path: &Path,
    plot: &PlotConfig,
) -> Result<()> {
    let size = (plot.height, plot.height);
    match plot.format {
        PlotFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_displacement(&root, &initial.atoms, displacements, plot.marker_size)?;
            root.present().map_err(plot_err)
        }
        PlotFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_displacement(&root, &initial.atoms, displacements, plot.marker_size)?;
            root.present().map_err(plot_err)
        }
    }
}

fn draw_components<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    initial: &StateSnapshot,
    last: &StateSnapshot,
    marker_size: u32,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let Some(bounds) = Bounds3::of_positions(&initial.atoms, &last.atoms) else {
        return Ok(());
    };

    let panels = root.split_evenly((2, 3));
    for (row, snap) in [initial, last].into_iter().enumerate() {
        for k in 0..3 {
            let values: Vec<f64> = snap.atoms.iter().map(|a| a.force[k]).collect();
            let Some(range) = AxisRange::of(values.iter().copied()) else {
                continue;
            };

            let caption = format!(
                "{}: {}-Forces = [{:.4}, {:.4}] (eV/Angst)",
                snap.label, AXIS_NAMES[k], range.min, range.max
            );
            let colors = values.iter().map(|v| jet(range.normalize(*v)));
            scatter_3d(
                &panels[row * 3 + k],
                &caption,
                &bounds,
                &snap.atoms,
                colors,
                marker_size,
            )?;
        }
    }

    Ok(())
}

fn draw_vectors<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    initial: &StateSnapshot,
    last: &StateSnapshot,
    vector_length: f64,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let tip = |a: &AtomRecord| -> [f64; 3] {
        [
            a.position[0] + a.force[0] * vector_length,
            a.position[1] + a.force[1] * vector_length,
            a.position[2] + a.force[2] * vector_length,
        ]
    };

    let all = initial.atoms.iter().chain(&last.atoms);
    let Some(bounds) = Bounds3::enclosing(all.flat_map(|a| [a.position, tip(a)])) else {
        return Ok(());
    };

    let panels = root.split_evenly((1, 2));
    for (panel, snap) in panels.iter().zip([initial, last]) {
        let magnitudes = force_norms(&snap.atoms);
        let Some(norms) = AxisRange::of(magnitudes.iter().copied()) else {
            continue;
        };

        let caption = format!(
            "{}: Forces = [{:.3}, {:.3}] (eV/Angst)",
            snap.label, norms.min, norms.max
        );
        let mut chart = chart_3d(panel, &caption, &bounds)?;

        chart
            .draw_series(
                snap.atoms
                    .iter()
                    .map(|a| Circle::new(tuple(a.position), 2, BLACK.filled())),
            )
            .map_err(plot_err)?;

        // |F| 按最大值归一化着色
        let max_norm = norms.max;
        chart
            .draw_series(snap.atoms.iter().zip(&magnitudes).map(|(a, m)| {
                let t = if max_norm > 0.0 { m / max_norm } else { 0.0 };
                PathElement::new(
                    vec![tuple(a.position), tuple(tip(a))],
                    jet(t).stroke_width(2),
                )
            }))
            .map_err(plot_err)?;
    }

    Ok(())
}

fn draw_displacement<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    atoms: &[AtomRecord],
    displacements: &[f64],
    marker_size: u32,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let (Some(bounds), Some(range), Some((_, max_d))) = (
        Bounds3::of_positions(atoms, &[]),
        AxisRange::of(displacements.iter().copied()),
        max_with_index(displacements),
    ) else {
        return Ok(());
    };

    let caption = format!("Max. Displacement = {:.4} (Angst)", max_d);
    let colors = displacements.iter().map(|d| jet(range.normalize(*d)));
    scatter_3d(root, &caption, &bounds, atoms, colors, marker_size)
}

/// 带坐标轴与 a/b/c 标签的三维图
fn chart_3d<'a, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    caption: &str,
    bounds: &Bounds3,
) -> Result<ChartContext<'a, DB, Cartesian3d<RangedCoordf64, RangedCoordf64, RangedCoordf64>>>
where
    DB::ErrorType: 'static,
{
    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 16).into_font())
        .margin(10)
        .build_cartesian_3d(bounds.x.clone(), bounds.y.clone(), bounds.z.clone())
        .map_err(plot_err)?;

    chart.with_projection(|mut pb| {
        pb.yaw = 0.6;
        pb.pitch = 0.35;
        pb.scale = 0.8;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.1))
        .max_light_lines(3)
        .label_style(("sans-serif", 11))
        .draw()
        .map_err(plot_err)?;

    let label_style = ("sans-serif", 13).into_font().color(&BLACK);
    let labels = [
        ("a-axis", (bounds.x.end, bounds.y.start, bounds.z.start)),
        ("b-axis", (bounds.x.start, bounds.y.end, bounds.z.start)),
        ("c-axis", (bounds.x.start, bounds.y.start, bounds.z.end)),
    ];
    chart
        .draw_series(
            labels
                .into_iter()
                .map(|(text, at)| Text::new(text, at, label_style.clone())),
        )
        .map_err(plot_err)?;

    Ok(chart)
}

fn scatter_3d<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    caption: &str,
    bounds: &Bounds3,
    atoms: &[AtomRecord],
    colors: impl Iterator<Item = RGBColor>,
    marker_size: u32,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let mut chart = chart_3d(area, caption, bounds)?;
    chart
        .draw_series(
            atoms
                .iter()
                .zip(colors)
                .map(|(a, c)| Circle::new(tuple(a.position), marker_size, c.filled())),
        )
        .map_err(plot_err)?;
    Ok(())
}

fn tuple(p: [f64; 3]) -> (f64, f64, f64) {
    (p[0], p[1], p[2])
}
