//! Jet 色图：0 为深蓝，1 为深红。

use plotters::style::RGBColor;

/// 将 [0, 1] 上的值映射为 jet 颜色
pub fn jet(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

    let channel = |offset: f64| -> u8 {
        let v = 1.5 - (4.0 * t - offset).abs();
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    };

    RGBColor(channel(3.0), channel(2.0), channel(1.0))
}
