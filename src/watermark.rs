use crate::canvas::{Canvas, Command};
use crate::compose::CompositedPage;
use crate::error::{FormError, Result};
use crate::font::StandardFont;
use crate::types::{Color, PageBox, Pt};
use std::f32::consts::PI;

/// Marked-content subtype wrapped around watermark drawing.
pub const WATERMARK_SUBTYPE: &str = "Watermark";

#[derive(Debug, Clone, PartialEq)]
pub struct WatermarkSpec {
    /// Upper line, drawn larger.
    pub brand: String,
    pub label: String,
    pub opacity: f32,
    pub rotation_deg: f32,
    pub brand_size: Pt,
    pub label_size: Pt,
    pub color: Color,
}

impl Default for WatermarkSpec {
    fn default() -> Self {
        Self {
            brand: "FORMSTAMP".to_string(),
            label: "PREVIEW".to_string(),
            opacity: 0.5,
            rotation_deg: -35.0,
            brand_size: Pt::from_f32(56.0),
            label_size: Pt::from_f32(32.0),
            color: Color::gray(0.6),
        }
    }
}

impl WatermarkSpec {
    pub fn text(brand: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(FormError::InvalidConfiguration(format!(
                "watermark opacity must be within 0..=1, got {}",
                self.opacity
            )));
        }
        if !self.rotation_deg.is_finite() {
            return Err(FormError::InvalidConfiguration(
                "watermark rotation must be finite".to_string(),
            ));
        }
        if self.brand.trim().is_empty() && self.label.trim().is_empty() {
            return Err(FormError::InvalidConfiguration(
                "watermark needs a brand or a label".to_string(),
            ));
        }
        Ok(())
    }
}

/// Both lines centred on the page, rotated about the page centre and drawn
/// in bold at the configured opacity, inside an `/Artifact` marked-content block.
pub fn build_watermark_commands(spec: &WatermarkSpec, page: PageBox) -> Vec<Command> {
    let font = StandardFont::HelveticaBold;
    let angle = spec.rotation_deg * (PI / 180.0);
    let (cx, cy) = page.center();
    let gap = spec.label_size.mul_ratio(1, 4);

    let mut canvas = Canvas::new();
    canvas.begin_artifact(Some(WATERMARK_SUBTYPE));
    canvas.save_state();
    canvas.set_opacity(spec.opacity);
    canvas.set_fill_color(spec.color);
    canvas.translate(Pt::from_f32(cx), Pt::from_f32(cy));
    canvas.rotate(angle);

    // Brand baseline sits just above the centre line, label just below it.
    let lines = [
        (spec.brand.trim(), spec.brand_size, gap),
        (spec.label.trim(), spec.label_size, Pt::ZERO - gap - spec.label_size),
    ];
    for (text, size, baseline) in lines {
        if text.is_empty() {
            continue;
        }
        let width = font.measure_text_width(size, text);
        canvas.set_font(font, size);
        canvas.draw_string(Pt::ZERO - width.mul_ratio(1, 2), baseline, text);
    }
    canvas.restore_state();
    canvas.end_marked_content();
    canvas.finish()
}

/// Stamp the watermark on the composited page. A page already carrying it
/// is left unchanged; returns whether anything was drawn.
pub fn apply_watermark(page: &mut CompositedPage, spec: &WatermarkSpec) -> Result<bool> {
    if page.is_watermarked() {
        log::debug!("watermark already present; skipping");
        return Ok(false);
    }
    spec.validate()?;
    let commands = build_watermark_commands(spec, page.page_box());
    page.stamp(&commands)?;
    page.mark_watermarked();
    Ok(true)
}
