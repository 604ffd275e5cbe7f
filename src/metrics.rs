use serde::Serialize;

/// Counters and timings for one render call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderMetrics {
    pub document_type: String,
    pub revision_year: u16,
    pub mode: String,
    pub fields_drawn: usize,
    pub fields_skipped: usize,
    pub template_bytes: usize,
    pub output_bytes: usize,
    pub compose_ms: f64,
    /// Packaging for final renders; watermark plus rasterization for previews.
    pub finish_ms: f64,
    pub total_ms: f64,
}

impl RenderMetrics {
    pub fn span_key(&self) -> String {
        format!("{}.{}", self.document_type, self.mode)
    }
}
