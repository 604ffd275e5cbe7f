use crate::compose::CompositedPage;
use crate::error::{Result, pdf_io_err};
use lopdf::Document as LoDocument;

/// Serialize a composited page to PDF bytes.
///
/// Unreferenced objects (template pages dropped by extraction, unused
/// resources) are pruned and streams compressed. No timestamps or random
/// identifiers are written, so equal inputs give equal bytes.
pub fn finalize(page: CompositedPage) -> Result<Vec<u8>> {
    let mut document = page.into_document();
    write_document(&mut document)
}

pub(crate) fn write_document(document: &mut LoDocument) -> Result<Vec<u8>> {
    let pruned = document.prune_objects();
    if !pruned.is_empty() {
        log::debug!("pruned {} unreferenced objects", pruned.len());
    }
    document.renumber_objects();
    document.compress();
    let mut out = Vec::new();
    document.save_to(&mut out).map_err(pdf_io_err)?;
    Ok(out)
}
