//! Minimal SVG document builder.

use crate::config::{hex_color, Palette};

pub(crate) fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Pixel rectangle that a unit square is mapped onto.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    /// Plot area inside the standard margins: title above, axis labels left and below.
    pub fn for_plot(width: u32, height: u32) -> Self {
        let (left, right, top, bottom) = (56.0, 16.0, 36.0, 48.0);
        Frame {
            left,
            top,
            width: (width as f64 - left - right).max(1.0),
            height: (height as f64 - top - bottom).max(1.0),
        }
    }

    pub fn x(&self, u: f64) -> f64 {
        self.left + u.clamp(0.0, 1.0) * self.width
    }

    /// SVG y grows downward.
    pub fn y(&self, v: f64) -> f64 {
        self.top + (1.0 - v.clamp(0.0, 1.0)) * self.height
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

pub(crate) struct SvgDoc {
    width: u32,
    height: u32,
    body: String,
}

impl SvgDoc {
    pub fn new(width: u32, height: u32, palette: &Palette) -> Self {
        let mut doc = SvgDoc {
            width,
            height,
            body: String::new(),
        };
        doc.push(&format!(
            r#"<rect width="{}" height="{}" fill="{}"/>"#,
            width,
            height,
            hex_color(palette.background)
        ));
        doc
    }

    pub fn push(&mut self, element: &str) {
        self.body.push_str(element);
        self.body.push('\n');
    }

    pub fn text(&mut self, x: f64, y: f64, anchor: &str, size: u32, fill: [u8; 3], content: &str) {
        self.push(&format!(
            r#"<text x="{:.2}" y="{:.2}" text-anchor="{}" font-size="{}" fill="{}">{}</text>"#,
            x,
            y,
            anchor,
            size,
            hex_color(fill),
            escape(content)
        ));
    }

    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: [u8; 3], extra: &str) {
        self.push(&format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}"{}/>"#,
            from.0,
            from.1,
            to.0,
            to.1,
            hex_color(stroke),
            extra
        ));
    }

    pub fn finish(self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="ui-sans-serif, system-ui, sans-serif">
{body}</svg>
"#,
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

/// Grid, tick labels, frame and axis titles for a unit-square plot.
pub(crate) fn unit_axes(doc: &mut SvgDoc, frame: &Frame, palette: &Palette, x_label: &str, y_label: &str) {
    const TICKS: u32 = 5;
    for i in 0..=TICKS {
        let v = i as f64 / TICKS as f64;
        let label = format!("{:.1}", v);

        let x = frame.x(v);
        doc.line((x, frame.top), (x, frame.bottom()), palette.grid, "");
        doc.text(x, frame.bottom() + 14.0, "middle", 10, palette.foreground, &label);

        let y = frame.y(v);
        doc.line((frame.left, y), (frame.right(), y), palette.grid, "");
        doc.text(frame.left - 6.0, y + 3.5, "end", 10, palette.foreground, &label);
    }

    doc.push(&format!(
        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="{}"/>"#,
        frame.left,
        frame.top,
        frame.width,
        frame.height,
        hex_color(palette.foreground)
    ));

    doc.text(
        frame.left + frame.width / 2.0,
        frame.bottom() + 34.0,
        "middle",
        12,
        palette.foreground,
        x_label,
    );
    let cy = frame.top + frame.height / 2.0;
    doc.push(&format!(
        r#"<text x="14" y="{:.2}" text-anchor="middle" font-size="12" fill="{}" transform="rotate(-90 14 {:.2})">{}</text>"#,
        cy,
        hex_color(palette.foreground),
        cy,
        escape(y_label)
    ));
}

/// `M x y L x y ...` path data for pixel points.
pub(crate) fn path_data(points: &[(f64, f64)]) -> String {
    let mut d = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        d.push_str(&format!("{}{:.2} {:.2} ", cmd, x, y));
    }
    d.trim_end().to_string()
}
