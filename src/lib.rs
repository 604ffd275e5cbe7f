//! Fills pre-printed tax and payroll form templates with request data.
//!
//! A render resolves the template revision for a document type and year,
//! draws every formatted field at its schema coordinates, and then either
//! packages the PDF bytes (final) or watermarks and rasterizes the page
//! (preview).

mod canvas;
mod compose;
mod document;
mod error;
mod font;
mod format;
mod metrics;
mod package;
mod pdf_raster;
mod perf;
mod raster;
mod registry;
mod schema;
mod store;
mod types;
mod watermark;

pub use canvas::{Canvas, Command};
pub use compose::{CompositedPage, DrawnField, composite};
pub use document::{DocumentRequest, DocumentType};
pub use error::{FieldIssue, FieldIssueReason, FormError, Result};
pub use font::{PreviewFonts, StandardFont};
pub use format::{CHECK_MARK, TIN_TYPE_KEY, format_currency, format_field, join_address};
pub use metrics::RenderMetrics;
pub use package::finalize;
pub use pdf_raster::{ParsedPage, TextRun, parse_page};
pub use raster::{
    DEFAULT_JPEG_QUALITY, DEFAULT_SCALE, ImageFormat, PreviewImage, RasterOptions, rasterize,
    rasterize_pdf,
};
pub use registry::{
    PageMode, TemplateDescriptor, asset_paths, load_template, resolve, supported_revisions,
};
pub use schema::{
    Align, FieldRole, FieldSchema, FieldSpec, SchemaError, TinKind, ValueSource, all_schemas,
    schema_for,
};
pub use store::{FsTemplateStore, MemoryTemplateStore, TemplateStore, sha256_hex};
pub use types::{Color, PageBox, Pt};
pub use watermark::{WATERMARK_SUBTYPE, WatermarkSpec, apply_watermark, build_watermark_commands};

use perf::PerfLogger;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Clean, purchasable PDF bytes.
    Final,
    /// Watermarked raster image of the target page.
    Preview,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Final => "final",
            RenderMode::Preview => "preview",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderResult {
    FinalBytes(Vec<u8>),
    PreviewImage(PreviewImage),
}

impl RenderResult {
    pub fn into_final_bytes(self) -> Option<Vec<u8>> {
        match self {
            RenderResult::FinalBytes(bytes) => Some(bytes),
            RenderResult::PreviewImage(_) => None,
        }
    }

    pub fn into_preview_image(self) -> Option<PreviewImage> {
        match self {
            RenderResult::PreviewImage(image) => Some(image),
            RenderResult::FinalBytes(_) => None,
        }
    }

    fn byte_len(&self) -> usize {
        match self {
            RenderResult::FinalBytes(bytes) => bytes.len(),
            RenderResult::PreviewImage(image) => image.bytes.len(),
        }
    }
}

/// Render entry point. Holds immutable configuration only and may be shared
/// across threads; every call owns its own document.
pub struct FormEngine {
    store: Arc<dyn TemplateStore>,
    watermark: WatermarkSpec,
    raster: RasterOptions,
    fonts: PreviewFonts,
    perf: Option<PerfLogger>,
}

impl std::fmt::Debug for FormEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormEngine")
            .field("watermark", &self.watermark)
            .field("raster", &self.raster)
            .field("preview_fonts", &!self.fonts.is_empty())
            .field("perf", &self.perf.is_some())
            .finish()
    }
}

impl FormEngine {
    pub fn builder() -> FormEngineBuilder {
        FormEngineBuilder::new()
    }

    pub fn watermark(&self) -> &WatermarkSpec {
        &self.watermark
    }

    pub fn raster_options(&self) -> &RasterOptions {
        &self.raster
    }

    /// Clean PDF bytes for the request. Never carries a watermark.
    pub fn render_final(&self, request: &DocumentRequest) -> Result<Vec<u8>> {
        match self.render(request, RenderMode::Final)? {
            RenderResult::FinalBytes(bytes) => Ok(bytes),
            RenderResult::PreviewImage(_) => Err(FormError::InvalidConfiguration(
                "final render produced an image".to_string(),
            )),
        }
    }

    /// Watermarked image of the request's target page.
    pub fn render_preview(&self, request: &DocumentRequest) -> Result<PreviewImage> {
        match self.render(request, RenderMode::Preview)? {
            RenderResult::PreviewImage(image) => Ok(image),
            RenderResult::FinalBytes(_) => Err(FormError::InvalidConfiguration(
                "preview render produced pdf bytes".to_string(),
            )),
        }
    }

    pub fn render(&self, request: &DocumentRequest, mode: RenderMode) -> Result<RenderResult> {
        self.render_with_metrics(request, mode).map(|(result, _)| result)
    }

    pub fn render_with_metrics(
        &self,
        request: &DocumentRequest,
        mode: RenderMode,
    ) -> Result<(RenderResult, RenderMetrics)> {
        let started = Instant::now();
        let (mut page, template_bytes) = self.compose_inner(request)?;
        let compose_ms = elapsed_ms(started);
        let fields_drawn = page.drawn_fields().len();
        let fields_skipped = page.issues().len();

        let finish_started = Instant::now();
        let result = match mode {
            RenderMode::Final => RenderResult::FinalBytes(package::finalize(page)?),
            RenderMode::Preview => {
                watermark::apply_watermark(&mut page, &self.watermark)?;
                RenderResult::PreviewImage(raster::rasterize(page, &self.raster, &self.fonts)?)
            }
        };

        let metrics = RenderMetrics {
            document_type: request.document_type.as_str().to_string(),
            revision_year: request.revision_year,
            mode: mode.as_str().to_string(),
            fields_drawn,
            fields_skipped,
            template_bytes,
            output_bytes: result.byte_len(),
            compose_ms,
            finish_ms: elapsed_ms(finish_started),
            total_ms: elapsed_ms(started),
        };
        log::debug!(
            "rendered {} {} ({}) in {:.2}ms: {} bytes",
            metrics.document_type,
            metrics.revision_year,
            metrics.mode,
            metrics.total_ms,
            metrics.output_bytes
        );
        if let Some(perf) = self.perf.as_ref() {
            perf.log_render(&metrics);
        }
        Ok((result, metrics))
    }

    /// The composited page before packaging, for inspecting what was drawn.
    pub fn compose(&self, request: &DocumentRequest) -> Result<CompositedPage> {
        self.compose_inner(request).map(|(page, _)| page)
    }

    fn compose_inner(&self, request: &DocumentRequest) -> Result<(CompositedPage, usize)> {
        let descriptor = registry::resolve(request.document_type, request.revision_year)?;
        let schema = schema::schema_for(request.document_type, request.revision_year)?;
        log::debug!(
            "resolved {} {} to {} (page {}, {:?})",
            descriptor.document_type,
            descriptor.revision_year,
            descriptor.asset_path,
            descriptor.source_page_index,
            descriptor.page_mode
        );
        let template = registry::load_template(self.store.as_ref(), &descriptor)?;
        let page = compose::composite(&template, &descriptor, schema, request)?;
        Ok((page, template.len()))
    }

    pub fn flush_perf_log(&self) {
        if let Some(perf) = self.perf.as_ref() {
            perf.flush();
        }
    }
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}

pub struct FormEngineBuilder {
    store: Option<Arc<dyn TemplateStore>>,
    watermark: WatermarkSpec,
    raster: RasterOptions,
    fonts: Option<PreviewFonts>,
    font_files: Option<(PathBuf, Option<PathBuf>)>,
    system_fonts: bool,
    perf_path: Option<PathBuf>,
}

impl Default for FormEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FormEngineBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            watermark: WatermarkSpec::default(),
            raster: RasterOptions::default(),
            fonts: None,
            font_files: None,
            system_fonts: true,
            perf_path: None,
        }
    }

    pub fn template_store(mut self, store: impl TemplateStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    pub fn shared_template_store(mut self, store: Arc<dyn TemplateStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Read templates from a directory laid out by asset path.
    pub fn template_dir(self, root: impl Into<PathBuf>) -> Self {
        self.template_store(FsTemplateStore::new(root))
    }

    pub fn watermark(mut self, spec: WatermarkSpec) -> Self {
        self.watermark = spec;
        self
    }

    pub fn watermark_text(mut self, brand: impl Into<String>) -> Self {
        self.watermark.brand = brand.into();
        self
    }

    pub fn watermark_opacity(mut self, opacity: f32) -> Self {
        self.watermark.opacity = opacity;
        self
    }

    pub fn watermark_rotation(mut self, degrees: f32) -> Self {
        self.watermark.rotation_deg = degrees;
        self
    }

    /// Device pixels per point for previews; 2.0 by default.
    pub fn raster_scale(mut self, scale: f32) -> Self {
        self.raster.scale = scale;
        self
    }

    pub fn preview_format(mut self, format: ImageFormat) -> Self {
        self.raster.format = format;
        self
    }

    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.raster.jpeg_quality = quality;
        self
    }

    pub fn preview_fonts(mut self, fonts: PreviewFonts) -> Self {
        self.fonts = Some(fonts);
        self
    }

    pub fn preview_font_files(
        mut self,
        regular: impl Into<PathBuf>,
        bold: Option<impl Into<PathBuf>>,
    ) -> Self {
        self.font_files = Some((regular.into(), bold.map(Into::into)));
        self
    }

    // When no preview fonts are configured, look in the usual system folders.
    pub fn system_fonts(mut self, enabled: bool) -> Self {
        self.system_fonts = enabled;
        self
    }

    // Append one JSON line of render metrics per call.
    pub fn perf_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.perf_path = Some(path.into());
        self
    }

    pub fn build(self) -> Result<FormEngine> {
        let store = self.store.ok_or_else(|| {
            FormError::InvalidConfiguration("a template store is required".to_string())
        })?;
        self.watermark.validate()?;
        self.raster.validate()?;

        let fonts = match (self.fonts, self.font_files) {
            (Some(fonts), _) => fonts,
            (None, Some((regular, bold))) => PreviewFonts::from_files(regular, bold.as_deref())?,
            (None, None) if self.system_fonts => PreviewFonts::discover(),
            (None, None) => PreviewFonts::default(),
        };
        if fonts.is_empty() {
            log::warn!("no preview fonts available; preview renders will fail");
        }

        let perf = match self.perf_path {
            Some(path) => Some(PerfLogger::new(&path).map_err(|e| {
                FormError::InvalidConfiguration(format!(
                    "cannot open perf log {}: {e}",
                    path.display()
                ))
            })?),
            None => None,
        };

        Ok(FormEngine {
            store,
            watermark: self.watermark,
            raster: self.raster,
            fonts,
            perf,
        })
    }
}
