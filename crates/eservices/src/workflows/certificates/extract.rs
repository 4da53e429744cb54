use chrono::Utc;
use lopdf::Document;
use tracing::error;

use super::domain::{ExtractedCertificate, PageNumber};

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("source document could not be parsed: {0}")]
    Parse(#[source] lopdf::Error),
    #[error("page {page} is outside the source document ({page_count} page(s))")]
    PageOutOfRange { page: PageNumber, page_count: u32 },
    #[error("extracted page could not be serialized: {0}")]
    Serialize(String),
}

/// Number of pages in a PDF held in memory.
pub fn page_count(source: &[u8]) -> Result<u32, ExtractionError> {
    let document = Document::load_mem(source).map_err(ExtractionError::Parse)?;
    Ok(document.get_pages().len() as u32)
}

/// Copy exactly one page of `source` into a standalone single-page PDF.
pub fn extract_page(
    source: &[u8],
    page: PageNumber,
    requested_id: &str,
) -> Result<ExtractedCertificate, ExtractionError> {
    let mut document = Document::load_mem(source).map_err(ExtractionError::Parse)?;
    let pages = document.get_pages();
    let page_count = pages.len() as u32;

    if !pages.contains_key(&page.get()) {
        error!(
            %page,
            page_count,
            "resident index points outside the certificate source document"
        );
        return Err(ExtractionError::PageOutOfRange { page, page_count });
    }

    let others: Vec<u32> = pages
        .keys()
        .copied()
        .filter(|number| *number != page.get())
        .collect();
    document.delete_pages(&others);
    document.prune_objects();
    document.renumber_objects();

    let mut bytes = Vec::new();
    document
        .save_to(&mut bytes)
        .map_err(|err| ExtractionError::Serialize(err.to_string()))?;

    Ok(ExtractedCertificate {
        requested_id: requested_id.to_string(),
        page,
        extracted_at: Utc::now(),
        bytes,
    })
}
