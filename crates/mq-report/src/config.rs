//! Render configuration and color palettes.

use serde::{Deserialize, Serialize};

use crate::{RenderError, Result};

/// Smallest plot that still leaves room for axes and labels.
pub const MIN_WIDTH: u32 = 160;
pub const MIN_HEIGHT: u32 = 120;

/// Report color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportTheme {
    #[default]
    Light,
    Dark,
}

impl ReportTheme {
    /// CSS class for the `<html>` element.
    pub fn css_class(&self) -> &'static str {
        match self {
            ReportTheme::Light => "light",
            ReportTheme::Dark => "dark",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            ReportTheme::Light => Palette {
                background: [0xff, 0xff, 0xff],
                foreground: [0x11, 0x18, 0x27],
                grid: [0xe5, 0xe7, 0xeb],
                accent: [0x1f, 0x77, 0xb4],
                diagonal: [0x9c, 0xa3, 0xaf],
                cell_low: [0xf7, 0xfb, 0xff],
                cell_high: [0x08, 0x30, 0x6b],
            },
            ReportTheme::Dark => Palette {
                background: [0x11, 0x18, 0x27],
                foreground: [0xf9, 0xfa, 0xfb],
                grid: [0x37, 0x41, 0x51],
                accent: [0x60, 0xa5, 0xfa],
                diagonal: [0x6b, 0x72, 0x80],
                cell_low: [0x1f, 0x29, 0x37],
                cell_high: [0x25, 0x63, 0xeb],
            },
        }
    }
}

/// RGB colors used by the SVG panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: [u8; 3],
    pub foreground: [u8; 3],
    pub grid: [u8; 3],
    pub accent: [u8; 3],
    pub diagonal: [u8; 3],
    /// Confusion-matrix color at 0% of the row.
    pub cell_low: [u8; 3],
    /// Confusion-matrix color at 100% of the row.
    pub cell_high: [u8; 3],
}

impl Palette {
    /// Linear blend between `cell_low` and `cell_high`, `t` clamped to [0, 1].
    pub fn cell(&self, t: f64) -> [u8; 3] {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mut out = [0u8; 3];
        for (i, c) in out.iter_mut().enumerate() {
            let lo = self.cell_low[i] as f64;
            let hi = self.cell_high[i] as f64;
            *c = (lo + (hi - lo) * t).round() as u8;
        }
        out
    }
}

/// `#rrggbb` for an RGB triple.
pub fn hex_color(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Rendering options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Width of each SVG panel in pixels.
    pub width: u32,
    /// Height of each SVG panel in pixels.
    pub height: u32,
    pub theme: ReportTheme,
    /// Minify the HTML page.
    pub minify: bool,
    /// Produce the HTML page in addition to the SVG panels.
    pub include_html: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 360,
            theme: ReportTheme::Light,
            minify: true,
            include_html: true,
        }
    }
}

impl ReportConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width < MIN_WIDTH {
            return Err(RenderError::InvalidConfig(format!(
                "width {} is below the minimum of {}",
                self.width, MIN_WIDTH
            )));
        }
        if self.height < MIN_HEIGHT {
            return Err(RenderError::InvalidConfig(format!(
                "height {} is below the minimum of {}",
                self.height, MIN_HEIGHT
            )));
        }
        Ok(())
    }

    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ReportConfig::default().validate().is_ok());
    }

    #[test]
    fn small_dimensions_rejected() {
        let cfg = ReportConfig {
            height: 50,
            ..ReportConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn cell_color_endpoints() {
        let p = ReportTheme::Light.palette();
        assert_eq!(p.cell(0.0), p.cell_low);
        assert_eq!(p.cell(1.0), p.cell_high);
        assert_eq!(p.cell(7.0), p.cell_high);
        assert_eq!(p.cell(f64::NAN), p.cell_low);
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(hex_color([0x08, 0x30, 0x6b]), "#08306b");
        assert_eq!(ReportTheme::Dark.css_class(), "dark");
    }
}
