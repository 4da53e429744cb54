use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::domain::{DownloadLogEntry, ExtractedCertificate, LookupError, NormalizedId, PageNumber};
use super::extract::{self, ExtractionError};
use super::index::{IntegrityError, ResidentIndex};
use super::repository::{DownloadLogger, SourceDocumentProvider, SourceError};

/// Result of a full lookup: a missing ID is an expected outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateLookup {
    Found {
        id: NormalizedId,
        certificate: ExtractedCertificate,
    },
    NotFound(NormalizedId),
}

/// Service composing the resident index, the source document, and the download log.
pub struct CertificateLookupService<S, L> {
    index: Arc<ResidentIndex>,
    source: Arc<S>,
    logger: Arc<L>,
}

impl<S, L> CertificateLookupService<S, L>
where
    S: SourceDocumentProvider + 'static,
    L: DownloadLogger + 'static,
{
    pub fn new(index: Arc<ResidentIndex>, source: Arc<S>, logger: Arc<L>) -> Self {
        Self {
            index,
            source,
            logger,
        }
    }

    pub fn index(&self) -> &ResidentIndex {
        &self.index
    }

    pub fn normalize(&self, raw: &str) -> Result<NormalizedId, LookupError> {
        NormalizedId::parse(raw)
    }

    pub fn resolve_page(&self, id: &NormalizedId) -> Option<PageNumber> {
        self.index.resolve_page(id)
    }

    /// Load the current source document and cut out `page`.
    pub fn extract_page(
        &self,
        id: &NormalizedId,
        page: PageNumber,
    ) -> Result<ExtractedCertificate, CertificateServiceError> {
        let source = self.source.load()?;
        let certificate = extract::extract_page(&source, page, id.raw())?;
        Ok(certificate)
    }

    /// Best-effort: a logging failure never fails the download.
    pub fn record_download(
        &self,
        id: &NormalizedId,
        page: PageNumber,
        client_address: &str,
        downloaded_at: DateTime<Utc>,
    ) {
        let entry = DownloadLogEntry {
            id_number: id.raw().to_string(),
            page,
            downloaded_at,
            client_address: client_address.to_string(),
        };

        if let Err(err) = self.logger.log(entry) {
            warn!(id = %id, %page, error = %err, "certificate download was not logged");
        }
    }

    /// Normalize, resolve, and extract in one call.
    pub fn lookup(&self, raw: &str) -> Result<CertificateLookup, CertificateServiceError> {
        let id = self.normalize(raw)?;
        match self.resolve_page(&id) {
            Some(page) => {
                let certificate = self.extract_page(&id, page)?;
                Ok(CertificateLookup::Found { id, certificate })
            }
            None => {
                info!(id = %id, "certificate lookup found no matching resident");
                Ok(CertificateLookup::NotFound(id))
            }
        }
    }

    /// Startup check that every indexed page exists in the source document.
    pub fn verify_integrity(&self) -> Result<u32, CertificateServiceError> {
        let source = self.source.load()?;
        let page_count = extract::page_count(&source)?;
        self.index.verify_against(page_count)?;
        info!(
            page_count,
            entries = self.index.len(),
            "resident index matches certificate source"
        );
        Ok(page_count)
    }
}

/// Error raised by the certificate lookup service.
#[derive(Debug, thiserror::Error)]
pub enum CertificateServiceError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Integrity(#[from] IntegrityError),
}
