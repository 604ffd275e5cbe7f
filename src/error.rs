use crate::document::DocumentType;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("no template revision registered for {document_type} {revision_year}")]
    UnsupportedRevision {
        document_type: DocumentType,
        revision_year: u16,
    },
    #[error("template asset not found: {asset_path}")]
    AssetNotFound {
        asset_path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("template asset {asset_path} is not usable: {message}")]
    TemplateInvalid { asset_path: String, message: String },
    #[error("template {asset_path} has {page_count} pages, page index {index} requested")]
    PageOutOfRange {
        asset_path: String,
        index: usize,
        page_count: usize,
    },
    #[error("preview rasterization failed: {0}")]
    RasterizationFailed(String),
    #[error("pdf write error: {0}")]
    Pdf(String),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, FormError>;

pub(crate) fn lopdf_err(err: lopdf::Error) -> FormError {
    FormError::Pdf(err.to_string())
}

pub(crate) fn pdf_io_err(err: std::io::Error) -> FormError {
    FormError::Pdf(err.to_string())
}

/// A single field that was left off the page because its value could not be
/// turned into drawable text. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub reason: FieldIssueReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssueReason {
    /// Arrays and objects have no text form.
    NotScalar,
    /// Currency input that is neither a number nor a numeric string.
    NotNumeric(String),
    /// SSN/EIN input without exactly nine digits.
    MalformedTin { digits: usize },
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            FieldIssueReason::NotScalar => {
                write!(f, "field coercion skipped for {}: value is not a scalar", self.field)
            }
            FieldIssueReason::NotNumeric(raw) => write!(
                f,
                "field coercion skipped for {}: {:?} is not a number",
                self.field, raw
            ),
            FieldIssueReason::MalformedTin { digits } => write!(
                f,
                "field coercion skipped for {}: taxpayer id has {} digits, expected 9",
                self.field, digits
            ),
        }
    }
}
