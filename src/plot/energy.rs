//! # 能量收敛曲线
//!
//! 横轴为离子步（从 1 开始），纵轴为 TOTEN (eV)，每个状态一条曲线。
//!
//! ## 依赖关系
//! - 被 `commands/compare.rs`, `commands/energy.rs` 调用
//! - 使用 `plotters` 渲染图表

use super::plot_err;
use crate::cli::compare::PlotFormat;
use crate::error::Result;

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

const SERIES_COLORS: [RGBColor; 2] = [RGBColor(0, 102, 204), RGBColor(204, 51, 0)];

/// 一条能量曲线
pub struct EnergySeries<'a> {
    pub label: &'a str,
    pub energies: &'a [f64],
}

/// 生成能量收敛图；所有序列为空时不生成文件并返回 `false`
pub fn render_energy(
    series: &[EnergySeries<'_>],
    path: &Path,
    format: PlotFormat,
    size: (u32, u32),
) -> Result<bool> {
    if series.iter().all(|s| s.energies.is_empty()) {
        return Ok(false);
    }

    match format {
        PlotFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_energy(&root, series)?;
            root.present().map_err(plot_err)?;
        }
        PlotFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_energy(&root, series)?;
            root.present().map_err(plot_err)?;
        }
    }
    Ok(true)
}

/// 由文件扩展名推断格式（非 .svg 一律按 PNG）
pub fn format_from_path(path: &Path) -> PlotFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("svg") => PlotFormat::Svg,
        _ => PlotFormat::Png,
    }
}

fn draw_energy<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &[EnergySeries<'_>],
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let steps = series.iter().map(|s| s.energies.len()).max().unwrap_or(1);
    let (y_min, y_max) = series
        .iter()
        .flat_map(|s| s.energies.iter().copied())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), e| {
            (lo.min(e), hi.max(e))
        });
    let y_margin = ((y_max - y_min).abs() * 0.1).max(1e-3);

    let mut chart = ChartBuilder::on(root)
        .caption("Energy convergence", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(
            0.5..(steps as f64 + 0.5),
            (y_min - y_margin)..(y_max + y_margin),
        )
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Ionic step")
        .y_desc("TOTEN (eV)")
        .draw()
        .map_err(plot_err)?;

    for (s, color) in series.iter().zip(SERIES_COLORS.iter().cycle()) {
        if s.energies.is_empty() {
            continue;
        }
        let points: Vec<(f64, f64)> = s
            .energies
            .iter()
            .enumerate()
            .map(|(i, e)| ((i + 1) as f64, *e))
            .collect();

        let color = *color;
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
            .map_err(plot_err)?
            .label(s.label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });

        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
            )
            .map_err(plot_err)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;

    Ok(())
}
