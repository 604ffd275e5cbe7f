use crate::canvas::Command;
use crate::compose::CompositedPage;
use crate::error::{FormError, Result};
use crate::font::{PreviewFonts, StandardFont};
use crate::package::finalize;
use crate::pdf_raster::{ParsedPage, parse_page};
use crate::types::{Color, PageBox, Pt};
use crate::watermark::WATERMARK_SUBTYPE;
use base64::Engine;
use image::ImageEncoder;
use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};
use ttf_parser::OutlineBuilder;

/// Default device pixels per PDF point.
pub const DEFAULT_SCALE: f32 = 2.0;
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    pub scale: f32,
    pub format: ImageFormat,
    /// 1..=100, ignored for PNG.
    pub jpeg_quality: u8,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            format: ImageFormat::Png,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl RasterOptions {
    pub fn validate(&self) -> Result<()> {
        if !(self.scale.is_finite() && self.scale > 0.0 && self.scale <= 8.0) {
            return Err(FormError::InvalidConfiguration(format!(
                "raster scale must be within (0, 8], got {}",
                self.scale
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(FormError::InvalidConfiguration(format!(
                "jpeg quality must be within 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}

/// Encoded raster of one page.
#[derive(Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Debug for PreviewImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewImage")
            .field("format", &self.format)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl PreviewImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type(),
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

#[derive(Clone)]
struct RasterState {
    transform: Transform,
    fill_color: Color,
    stroke_color: Color,
    line_width: Pt,
    fill_opacity: f32,
    stroke_opacity: f32,
    font_name: String,
    font_size: Pt,
}

impl Default for RasterState {
    fn default() -> Self {
        Self {
            transform: Transform::identity(),
            fill_color: Color::BLACK,
            stroke_color: Color::BLACK,
            line_width: Pt::from_f32(1.0),
            fill_opacity: 1.0,
            stroke_opacity: 1.0,
            font_name: "Helvetica".to_string(),
            font_size: Pt::from_f32(12.0),
        }
    }
}

/// Render the target page of a composited document. The page is serialized
/// first so the image shows exactly what the PDF bytes contain.
pub fn rasterize(
    page: CompositedPage,
    options: &RasterOptions,
    fonts: &PreviewFonts,
) -> Result<PreviewImage> {
    options.validate()?;
    let page_index = page.page_index();
    let bytes = finalize(page)?;
    rasterize_pdf(&bytes, page_index, options, fonts)
}

/// Rasterize page `page_index` of a serialized PDF.
pub fn rasterize_pdf(
    pdf_bytes: &[u8],
    page_index: usize,
    options: &RasterOptions,
    fonts: &PreviewFonts,
) -> Result<PreviewImage> {
    let doc = lopdf::Document::load_mem(pdf_bytes)
        .map_err(|e| FormError::RasterizationFailed(format!("cannot reload output: {e}")))?;
    let page = parse_page(&doc, page_index)?;
    render_page(&page, options, fonts)
}

pub fn render_page(
    page: &ParsedPage,
    options: &RasterOptions,
    fonts: &PreviewFonts,
) -> Result<PreviewImage> {
    options.validate()?;
    let pixmap = paint_commands(page.page_box, &page.commands, options.scale, fonts)?;
    let (width, height) = (pixmap.width(), pixmap.height());
    let bytes = match options.format {
        ImageFormat::Png => pixmap
            .encode_png()
            .map_err(|e| FormError::RasterizationFailed(format!("png encode failed: {e}")))?,
        ImageFormat::Jpeg => encode_jpeg(&pixmap, options.jpeg_quality)?,
    };
    log::debug!(
        "rasterized {}x{} {:?} ({} bytes)",
        width,
        height,
        options.format,
        bytes.len()
    );
    Ok(PreviewImage {
        bytes,
        format: options.format,
        width,
        height,
    })
}

fn paint_commands(
    page_box: PageBox,
    commands: &[Command],
    scale: f32,
    fonts: &PreviewFonts,
) -> Result<Pixmap> {
    let width_px = pt_to_px_u32(page_box.width(), scale)?;
    let height_px = pt_to_px_u32(page_box.height(), scale)?;
    let mut pixmap = Pixmap::new(width_px, height_px).ok_or_else(|| {
        FormError::RasterizationFailed(format!(
            "invalid raster size {width_px}x{height_px} at scale {scale}"
        ))
    })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    // PDF user space has y growing upwards; pixmaps grow downwards.
    let base_transform = Transform::from_row(
        scale,
        0.0,
        0.0,
        -scale,
        -page_box.x0 * scale,
        page_box.y1 * scale,
    );

    let mut state = RasterState::default();
    let mut stack: Vec<RasterState> = Vec::new();
    let mut path_builder = PathBuilder::new();
    let mut has_path = false;
    let mut skipped_text = 0usize;
    // One entry per open artifact; true for watermark blocks.
    let mut artifacts: Vec<bool> = Vec::new();

    for cmd in commands {
        match cmd {
            Command::SaveState => stack.push(state.clone()),
            Command::RestoreState => {
                if let Some(prev) = stack.pop() {
                    state = prev;
                }
            }
            Command::Translate(x, y) => {
                state.transform = state.transform.pre_translate(x.to_f32(), y.to_f32());
            }
            Command::Rotate(angle) => {
                let (sin, cos) = angle.sin_cos();
                state.transform = state
                    .transform
                    .pre_concat(Transform::from_row(cos, sin, -sin, cos, 0.0, 0.0));
            }
            Command::SetOpacity { fill, stroke } => {
                state.fill_opacity = fill.clamp(0.0, 1.0);
                state.stroke_opacity = stroke.clamp(0.0, 1.0);
            }
            Command::SetFillColor(color) => state.fill_color = *color,
            Command::SetStrokeColor(color) => state.stroke_color = *color,
            Command::SetLineWidth(width) => state.line_width = *width,
            Command::SetFontName(name) => state.font_name = name.clone(),
            Command::SetFontSize(size) => state.font_size = *size,
            Command::MoveTo { x, y } => {
                path_builder.move_to(x.to_f32(), y.to_f32());
                has_path = true;
            }
            Command::LineTo { x, y } => {
                path_builder.line_to(x.to_f32(), y.to_f32());
                has_path = true;
            }
            Command::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                path_builder.cubic_to(
                    x1.to_f32(),
                    y1.to_f32(),
                    x2.to_f32(),
                    y2.to_f32(),
                    x.to_f32(),
                    y.to_f32(),
                );
                has_path = true;
            }
            Command::ClosePath => {
                if has_path {
                    path_builder.close();
                }
            }
            Command::Fill => fill_current_path(
                &mut pixmap,
                &state,
                &mut path_builder,
                &mut has_path,
                FillRule::Winding,
                base_transform,
            ),
            Command::FillEvenOdd => fill_current_path(
                &mut pixmap,
                &state,
                &mut path_builder,
                &mut has_path,
                FillRule::EvenOdd,
                base_transform,
            ),
            Command::Stroke => stroke_current_path(
                &mut pixmap,
                &state,
                &mut path_builder,
                &mut has_path,
                base_transform,
            ),
            Command::FillStroke => {
                let Some(path) = take_path(&mut path_builder, &mut has_path) else {
                    continue;
                };
                let transform = base_transform.pre_concat(state.transform);
                let fill = fill_paint(state.fill_color, state.fill_opacity);
                pixmap.fill_path(&path, &fill, FillRule::Winding, transform, None);
                let stroke = fill_paint(state.stroke_color, state.stroke_opacity);
                pixmap.stroke_path(&path, &stroke, &build_stroke(&state), transform, None);
            }
            Command::DrawString { x, y, text } => {
                let size = state.font_size.to_f32();
                let run = Transform::from_row(size, 0.0, 0.0, size, x.to_f32(), y.to_f32());
                if !draw_glyph_run(&mut pixmap, &state, text, run, base_transform, fonts) {
                    unpainted_text(text, &artifacts)?;
                    skipped_text += 1;
                }
            }
            Command::DrawStringTransformed {
                x,
                y,
                text,
                m00,
                m01,
                m10,
                m11,
            } => {
                let run = Transform::from_row(*m00, *m01, *m10, *m11, x.to_f32(), y.to_f32());
                if !draw_glyph_run(&mut pixmap, &state, text, run, base_transform, fonts) {
                    unpainted_text(text, &artifacts)?;
                    skipped_text += 1;
                }
            }
            Command::BeginArtifact { subtype } => {
                artifacts.push(subtype.as_deref() == Some(WATERMARK_SUBTYPE));
            }
            Command::EndMarkedContent => {
                artifacts.pop();
            }
        }
    }

    if skipped_text > 0 {
        log::warn!("{skipped_text} text run(s) not painted: no usable preview font");
    }
    Ok(pixmap)
}

/// Template text may be skipped when no preview font is available; the
/// watermark may not.
fn unpainted_text(text: &str, artifacts: &[bool]) -> Result<()> {
    if artifacts.iter().any(|watermark| *watermark) {
        return Err(FormError::RasterizationFailed(format!(
            "watermark text {text:?} cannot be painted: no usable preview font"
        )));
    }
    Ok(())
}

fn fill_current_path(
    pixmap: &mut Pixmap,
    state: &RasterState,
    path_builder: &mut PathBuilder,
    has_path: &mut bool,
    fill_rule: FillRule,
    base_transform: Transform,
) {
    let Some(path) = take_path(path_builder, has_path) else {
        return;
    };
    let paint = fill_paint(state.fill_color, state.fill_opacity);
    pixmap.fill_path(
        &path,
        &paint,
        fill_rule,
        base_transform.pre_concat(state.transform),
        None,
    );
}

fn stroke_current_path(
    pixmap: &mut Pixmap,
    state: &RasterState,
    path_builder: &mut PathBuilder,
    has_path: &mut bool,
    base_transform: Transform,
) {
    let Some(path) = take_path(path_builder, has_path) else {
        return;
    };
    let paint = fill_paint(state.stroke_color, state.stroke_opacity);
    pixmap.stroke_path(
        &path,
        &paint,
        &build_stroke(state),
        base_transform.pre_concat(state.transform),
        None,
    );
}

/// Paint `text` through glyph outlines. `run` maps font-size-scaled text
/// space (one unit per em) to the current user space. Returns false when no
/// font could draw it.
fn draw_glyph_run(
    pixmap: &mut Pixmap,
    state: &RasterState,
    text: &str,
    run: Transform,
    base_transform: Transform,
    fonts: &PreviewFonts,
) -> bool {
    if text.trim().is_empty() {
        return true;
    }
    let bold = StandardFont::from_base_font(&state.font_name)
        .map(|f| f.is_bold())
        .unwrap_or_else(|| state.font_name.to_ascii_lowercase().contains("bold"));
    let Some(program) = fonts.program(bold) else {
        return false;
    };
    let Ok(face) = ttf_parser::Face::parse(program.as_slice(), 0) else {
        return false;
    };

    let units_per_em = face.units_per_em().max(1) as f32;
    let scale = 1.0 / units_per_em;
    let paint = fill_paint(state.fill_color, state.fill_opacity);
    let transform = base_transform.pre_concat(state.transform).pre_concat(run);

    let mut pen_x = 0.0f32;
    for ch in text.chars() {
        let Some(glyph) = face.glyph_index(ch).or_else(|| face.glyph_index('?')) else {
            continue;
        };
        let mut builder = GlyphPathBuilder::new(pen_x, 0.0, scale);
        if face.outline_glyph(glyph, &mut builder).is_some() {
            if let Some(path) = builder.finish() {
                pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
            }
        }
        pen_x += face.glyph_hor_advance(glyph).unwrap_or(0) as f32 * scale;
    }
    true
}

struct GlyphPathBuilder {
    builder: PathBuilder,
    origin_x: f32,
    origin_y: f32,
    scale: f32,
}

impl GlyphPathBuilder {
    fn new(origin_x: f32, origin_y: f32, scale: f32) -> Self {
        Self {
            builder: PathBuilder::new(),
            origin_x,
            origin_y,
            scale,
        }
    }

    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (self.origin_x + x * self.scale, self.origin_y + y * self.scale)
    }

    fn finish(self) -> Option<Path> {
        self.builder.finish()
    }
}

impl OutlineBuilder for GlyphPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x, y) = self.point(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x2, y2) = self.point(x2, y2);
        let (x, y) = self.point(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

fn take_path(path_builder: &mut PathBuilder, has_path: &mut bool) -> Option<Path> {
    if !*has_path {
        return None;
    }
    *has_path = false;
    let builder = std::mem::replace(path_builder, PathBuilder::new());
    builder.finish()
}

fn build_stroke(state: &RasterState) -> Stroke {
    Stroke {
        width: state.line_width.to_f32().max(0.0),
        ..Stroke::default()
    }
}

fn fill_paint(color: Color, opacity: f32) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_sk_color(color, opacity));
    paint.anti_alias = true;
    paint
}

fn to_sk_color(color: Color, opacity: f32) -> tiny_skia::Color {
    let r = color.r.clamp(0.0, 1.0);
    let g = color.g.clamp(0.0, 1.0);
    let b = color.b.clamp(0.0, 1.0);
    let a = opacity.clamp(0.0, 1.0);
    tiny_skia::Color::from_rgba(r, g, b, a)
        .unwrap_or_else(|| tiny_skia::Color::from_rgba8(0, 0, 0, 255))
}

fn encode_jpeg(pixmap: &Pixmap, quality: u8) -> Result<Vec<u8>> {
    // The background is opaque, so premultiplied RGB equals straight RGB.
    let rgb: Vec<u8> = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality)
        .write_image(
            &rgb,
            pixmap.width(),
            pixmap.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| FormError::RasterizationFailed(format!("jpeg encode failed: {e}")))?;
    Ok(out)
}

fn pt_to_px_u32(pt: f32, scale: f32) -> Result<u32> {
    let px = pt_milli_to_px_i64(Pt::from_f32(pt).to_milli_i64(), scale);
    if px <= 0 {
        return Err(FormError::RasterizationFailed(format!(
            "non-positive pixel dimension {px} for {pt}pt at scale {scale}"
        )));
    }
    u32::try_from(px).map_err(|_| {
        FormError::RasterizationFailed(format!("pixel dimension out of range: {px}"))
    })
}

fn pt_milli_to_px_i64(pt_milli: i64, scale: f32) -> i64 {
    let scale_milli = (scale as f64 * 1000.0).round() as i128;
    let num = (pt_milli as i128).saturating_mul(scale_milli);
    let den = 1_000_000_i128;
    let px = if num >= 0 {
        (num + (den / 2)) / den
    } else {
        -(((-num) + (den / 2)) / den)
    };
    px.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter() -> PageBox {
        PageBox {
            x0: 0.0,
            y0: 0.0,
            x1: 612.0,
            y1: 792.0,
        }
    }

    fn has_non_white_pixel(pixmap: &Pixmap) -> bool {
        pixmap
            .pixels()
            .iter()
            .any(|p| !(p.red() == 255 && p.green() == 255 && p.blue() == 255))
    }

    fn square(x: f32, y: f32, side: f32) -> Vec<Command> {
        let p = Pt::from_f32;
        vec![
            Command::MoveTo { x: p(x), y: p(y) },
            Command::LineTo {
                x: p(x + side),
                y: p(y),
            },
            Command::LineTo {
                x: p(x + side),
                y: p(y + side),
            },
            Command::LineTo {
                x: p(x),
                y: p(y + side),
            },
            Command::ClosePath,
            Command::Fill,
        ]
    }

    #[test]
    fn pt_milli_to_px_rounds_half_away_from_zero() {
        assert_eq!(pt_milli_to_px_i64(612_000, 2.0), 1224);
        assert_eq!(pt_milli_to_px_i64(250, 2.0), 1);
        assert_eq!(pt_milli_to_px_i64(249, 2.0), 0);
        assert_eq!(pt_milli_to_px_i64(-250, 2.0), -1);
    }

    #[test]
    fn letter_page_doubles_in_both_axes() {
        let pixmap = paint_commands(letter(), &[], 2.0, &PreviewFonts::default()).expect("paint");
        assert_eq!((pixmap.width(), pixmap.height()), (1224, 1584));
        assert!(!has_non_white_pixel(&pixmap));
    }

    #[test]
    fn bottom_left_origin_maps_to_last_rows() {
        let mut cmds = vec![Command::SetFillColor(Color::BLACK)];
        cmds.extend(square(0.0, 0.0, 10.0));
        let pixmap = paint_commands(letter(), &cmds, 1.0, &PreviewFonts::default()).expect("paint");
        let bottom = pixmap.pixel(5, 787).expect("pixel");
        let top = pixmap.pixel(5, 5).expect("pixel");
        assert_eq!((bottom.red(), bottom.alpha()), (0, 255));
        assert_eq!(top.red(), 255);
    }

    #[test]
    fn half_opacity_blends_with_white() {
        let mut cmds = vec![
            Command::SetOpacity {
                fill: 0.5,
                stroke: 0.5,
            },
            Command::SetFillColor(Color::BLACK),
        ];
        cmds.extend(square(100.0, 100.0, 50.0));
        let pixmap = paint_commands(letter(), &cmds, 1.0, &PreviewFonts::default()).expect("paint");
        let px = pixmap.pixel(125, 792 - 125).expect("pixel");
        assert!((120..=135).contains(&px.red()), "{}", px.red());
    }

    #[test]
    fn restore_state_drops_opacity() {
        let mut cmds = vec![
            Command::SaveState,
            Command::SetOpacity {
                fill: 0.2,
                stroke: 0.2,
            },
            Command::RestoreState,
            Command::SetFillColor(Color::BLACK),
        ];
        cmds.extend(square(10.0, 10.0, 20.0));
        let pixmap = paint_commands(letter(), &cmds, 1.0, &PreviewFonts::default()).expect("paint");
        assert_eq!(pixmap.pixel(20, 792 - 20).expect("pixel").red(), 0);
    }

    #[test]
    fn text_without_fonts_is_skipped_not_fatal() {
        let cmds = vec![
            Command::SetFontName("Helvetica-Bold".to_string()),
            Command::SetFontSize(Pt::from_f32(24.0)),
            Command::DrawString {
                x: Pt::from_f32(72.0),
                y: Pt::from_f32(72.0),
                text: "Hello".to_string(),
            },
        ];
        let pixmap = paint_commands(letter(), &cmds, 1.0, &PreviewFonts::default()).expect("paint");
        assert!(!has_non_white_pixel(&pixmap));
    }

    #[test]
    fn watermark_text_without_fonts_is_an_error() {
        let cmds = vec![
            Command::BeginArtifact {
                subtype: Some(WATERMARK_SUBTYPE.to_string()),
            },
            Command::SetFontName("Helvetica-Bold".to_string()),
            Command::SetFontSize(Pt::from_f32(72.0)),
            Command::DrawString {
                x: Pt::from_f32(100.0),
                y: Pt::from_f32(300.0),
                text: "PREVIEW".to_string(),
            },
            Command::EndMarkedContent,
        ];
        let err = paint_commands(letter(), &cmds, 1.0, &PreviewFonts::default())
            .expect_err("unpainted watermark");
        assert!(matches!(err, FormError::RasterizationFailed(_)), "{err}");
        assert!(err.to_string().contains("PREVIEW"));
    }

    #[test]
    fn text_after_a_closed_watermark_is_skipped() {
        let cmds = vec![
            Command::BeginArtifact {
                subtype: Some(WATERMARK_SUBTYPE.to_string()),
            },
            Command::EndMarkedContent,
            Command::BeginArtifact {
                subtype: Some("Pagination".to_string()),
            },
            Command::DrawString {
                x: Pt::from_f32(72.0),
                y: Pt::from_f32(72.0),
                text: "page 1".to_string(),
            },
            Command::EndMarkedContent,
        ];
        paint_commands(letter(), &cmds, 1.0, &PreviewFonts::default()).expect("paint");
    }

    #[test]
    fn text_draws_when_a_system_font_exists() {
        let fonts = PreviewFonts::discover();
        if fonts.is_empty() {
            return;
        }
        let cmds = vec![
            Command::SetFillColor(Color::BLACK),
            Command::SetFontName("Helvetica-Bold".to_string()),
            Command::SetFontSize(Pt::from_f32(24.0)),
            Command::DrawString {
                x: Pt::from_f32(72.0),
                y: Pt::from_f32(72.0),
                text: "Hello".to_string(),
            },
        ];
        let pixmap = paint_commands(letter(), &cmds, 1.0, &fonts).expect("paint");
        assert!(has_non_white_pixel(&pixmap));
    }

    #[test]
    fn encodes_png_and_jpeg_signatures() {
        let page = ParsedPage {
            page_box: PageBox {
                x0: 0.0,
                y0: 0.0,
                x1: 40.0,
                y1: 20.0,
            },
            commands: square(5.0, 5.0, 10.0),
        };
        let fonts = PreviewFonts::default();
        let png = render_page(&page, &RasterOptions::default(), &fonts).expect("png");
        assert_eq!(&png.bytes[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!((png.width, png.height), (80, 40));
        let jpeg = render_page(
            &page,
            &RasterOptions {
                format: ImageFormat::Jpeg,
                ..RasterOptions::default()
            },
            &fonts,
        )
        .expect("jpeg");
        assert_eq!(&jpeg.bytes[..2], &[0xFF, 0xD8]);
        assert_eq!(jpeg.mime_type(), "image/jpeg");
        assert!(jpeg.to_data_uri().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn options_validation_bounds() {
        assert!(RasterOptions::default().validate().is_ok());
        for scale in [0.0, -1.0, 8.5, f32::NAN] {
            let opts = RasterOptions {
                scale,
                ..RasterOptions::default()
            };
            assert!(opts.validate().is_err(), "{scale}");
        }
        let opts = RasterOptions {
            jpeg_quality: 0,
            ..RasterOptions::default()
        };
        assert!(opts.validate().is_err());
    }
}
