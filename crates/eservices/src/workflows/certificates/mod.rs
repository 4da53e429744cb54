//! Resident-certificate self-lookup.
//!
//! A national ID is normalized, resolved to a page of the municipal source document through
//! the static resident index, and that page is cut out into a standalone PDF. Downloads are
//! recorded best-effort.

pub mod domain;
mod extract;
pub mod index;
pub mod repository;
pub mod router;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use domain::{DownloadLogEntry, ExtractedCertificate, LookupError, NormalizedId, PageNumber};
pub use extract::{extract_page, page_count, ExtractionError};
pub use index::{IndexError, IntegrityError, ResidentIndex};
pub use repository::{
    DownloadLogError, DownloadLogger, FileSourceDocument, SourceDocumentProvider, SourceError,
};
pub use router::certificate_router;
pub use service::{CertificateLookup, CertificateLookupService, CertificateServiceError};
pub use session::{LookupPhase, LookupSession, SessionError};
