//! Template revision registry.
//!
//! Every supported (document type, revision year) pair maps to exactly one
//! descriptor. Years that share a printed layout are listed as an explicit
//! inclusive range; there is no nearest-year or default lookup.

use crate::document::DocumentType;
use crate::error::{FormError, Result};
use crate::store::{TemplateStore, sha256_hex};
use std::io;
use std::ops::RangeInclusive;

/// How the target page is taken out of the template file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// Draw on page N of the original document and keep its other pages.
    InPlace,
    /// Copy page N into a fresh single-page document.
    Extract,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    pub document_type: DocumentType,
    pub revision_year: u16,
    pub asset_path: &'static str,
    /// Zero-based page index inside the asset.
    pub source_page_index: usize,
    pub page_mode: PageMode,
}

struct RevisionEntry {
    document_type: DocumentType,
    years: RangeInclusive<u16>,
    asset_path: &'static str,
    source_page_index: usize,
    page_mode: PageMode,
}

// 1099 files ship Copy A (red-ink, scannable) first; Copy B for the recipient
// is the third page and is the one that may be printed on plain paper.
static REVISIONS: &[RevisionEntry] = &[
    RevisionEntry {
        document_type: DocumentType::W9,
        years: 2018..=2023,
        asset_path: "w9/fw9-2018.pdf",
        source_page_index: 0,
        page_mode: PageMode::InPlace,
    },
    RevisionEntry {
        document_type: DocumentType::W9,
        years: 2024..=2025,
        asset_path: "w9/fw9-2024.pdf",
        source_page_index: 0,
        page_mode: PageMode::InPlace,
    },
    RevisionEntry {
        document_type: DocumentType::Form1099Nec,
        years: 2022..=2023,
        asset_path: "1099/f1099nec-2022.pdf",
        source_page_index: 2,
        page_mode: PageMode::Extract,
    },
    RevisionEntry {
        document_type: DocumentType::Form1099Nec,
        years: 2024..=2024,
        asset_path: "1099/f1099nec-2024.pdf",
        source_page_index: 2,
        page_mode: PageMode::Extract,
    },
    RevisionEntry {
        document_type: DocumentType::Form1099Nec,
        years: 2025..=2025,
        asset_path: "1099/f1099nec-2025.pdf",
        source_page_index: 2,
        page_mode: PageMode::Extract,
    },
    RevisionEntry {
        document_type: DocumentType::Form1099Misc,
        years: 2023..=2023,
        asset_path: "1099/f1099msc-2023.pdf",
        source_page_index: 2,
        page_mode: PageMode::Extract,
    },
    RevisionEntry {
        document_type: DocumentType::Form1099Misc,
        years: 2024..=2024,
        asset_path: "1099/f1099msc-2024.pdf",
        source_page_index: 2,
        page_mode: PageMode::Extract,
    },
    RevisionEntry {
        document_type: DocumentType::ScheduleC,
        years: 2023..=2023,
        asset_path: "schedule-c/f1040sc-2023.pdf",
        source_page_index: 0,
        page_mode: PageMode::InPlace,
    },
    RevisionEntry {
        document_type: DocumentType::ScheduleC,
        years: 2024..=2024,
        asset_path: "schedule-c/f1040sc-2024.pdf",
        source_page_index: 0,
        page_mode: PageMode::InPlace,
    },
    RevisionEntry {
        document_type: DocumentType::PayStub,
        years: 2024..=2026,
        asset_path: "paystub/paystub-classic.pdf",
        source_page_index: 0,
        page_mode: PageMode::InPlace,
    },
];

impl RevisionEntry {
    fn descriptor(&self, revision_year: u16) -> TemplateDescriptor {
        TemplateDescriptor {
            document_type: self.document_type,
            revision_year,
            asset_path: self.asset_path,
            source_page_index: self.source_page_index,
            page_mode: self.page_mode,
        }
    }
}

pub fn resolve(document_type: DocumentType, revision_year: u16) -> Result<TemplateDescriptor> {
    let mut hits = REVISIONS
        .iter()
        .filter(|e| e.document_type == document_type && e.years.contains(&revision_year));
    let Some(entry) = hits.next() else {
        return Err(FormError::UnsupportedRevision {
            document_type,
            revision_year,
        });
    };
    if hits.next().is_some() {
        return Err(FormError::InvalidConfiguration(format!(
            "overlapping template revisions for {document_type} {revision_year}"
        )));
    }
    Ok(entry.descriptor(revision_year))
}

/// Every (document type, year) pair the registry answers for, in table order.
pub fn supported_revisions() -> Vec<(DocumentType, u16)> {
    REVISIONS
        .iter()
        .flat_map(|e| e.years.clone().map(move |y| (e.document_type, y)))
        .collect()
}

/// Distinct asset paths referenced by the registry.
pub fn asset_paths() -> Vec<&'static str> {
    let mut paths: Vec<&'static str> = REVISIONS.iter().map(|e| e.asset_path).collect();
    paths.sort_unstable();
    paths.dedup();
    paths
}

pub fn load_template(store: &dyn TemplateStore, descriptor: &TemplateDescriptor) -> Result<Vec<u8>> {
    let bytes = store.load(descriptor.asset_path).map_err(|err| match err.kind() {
        io::ErrorKind::InvalidData => FormError::TemplateInvalid {
            asset_path: descriptor.asset_path.to_string(),
            message: err.to_string(),
        },
        _ => FormError::AssetNotFound {
            asset_path: descriptor.asset_path.to_string(),
            source: err,
        },
    })?;
    if log::log_enabled!(log::Level::Debug) {
        log::debug!(
            "loaded template {} ({} bytes, sha256 {})",
            descriptor.asset_path,
            bytes.len(),
            sha256_hex(&bytes)
        );
    }
    Ok(bytes)
}
