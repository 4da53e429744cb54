use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use super::domain::{ExtractedCertificate, NormalizedId};
use super::repository::{DownloadLogger, SourceDocumentProvider};
use super::service::CertificateLookupService;

/// Where a lookup currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupPhase {
    Idle,
    Validating,
    Invalid,
    Resolving,
    NotFound,
    Extracting,
    ExtractionFailed,
    Ready,
    Downloaded,
}

impl LookupPhase {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Invalid | Self::NotFound | Self::ExtractionFailed | Self::Ready | Self::Downloaded
        )
    }

    fn can_follow(self, previous: Self) -> bool {
        use LookupPhase::*;
        match self {
            Idle => true,
            Validating => previous == Idle,
            Invalid | Resolving => previous == Validating,
            NotFound | Extracting => previous == Resolving,
            ExtractionFailed | Ready => previous == Extracting,
            Downloaded => matches!(previous, Ready | Downloaded),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no certificate is ready to download (lookup is {0:?})")]
    NotReady(LookupPhase),
}

/// One applicant's lookup, from typed ID to (repeated) download.
pub struct LookupSession<S, L> {
    service: Arc<CertificateLookupService<S, L>>,
    phase: LookupPhase,
    history: Vec<LookupPhase>,
    id: Option<NormalizedId>,
    certificate: Option<ExtractedCertificate>,
    failure: Option<String>,
    downloads: u32,
}

impl<S, L> LookupSession<S, L>
where
    S: SourceDocumentProvider + 'static,
    L: DownloadLogger + 'static,
{
    pub fn new(service: Arc<CertificateLookupService<S, L>>) -> Self {
        Self {
            service,
            phase: LookupPhase::Idle,
            history: vec![LookupPhase::Idle],
            id: None,
            certificate: None,
            failure: None,
            downloads: 0,
        }
    }

    pub fn phase(&self) -> LookupPhase {
        self.phase
    }

    /// Every phase entered since the last reset, oldest first.
    pub fn history(&self) -> &[LookupPhase] {
        &self.history
    }

    pub fn id(&self) -> Option<&NormalizedId> {
        self.id.as_ref()
    }

    pub fn certificate(&self) -> Option<&ExtractedCertificate> {
        self.certificate.as_ref()
    }

    /// Message describing why the last search ended in `Invalid` or `ExtractionFailed`.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn downloads(&self) -> u32 {
        self.downloads
    }

    /// Run a full search for `raw`. A new search always starts from `Idle`.
    pub fn search(&mut self, raw: &str) -> LookupPhase {
        self.reset();
        self.enter(LookupPhase::Validating);

        let id = match self.service.normalize(raw) {
            Ok(id) => id,
            Err(err) => {
                self.failure = Some(err.to_string());
                return self.enter(LookupPhase::Invalid);
            }
        };
        self.id = Some(id.clone());
        self.enter(LookupPhase::Resolving);

        let Some(page) = self.service.resolve_page(&id) else {
            return self.enter(LookupPhase::NotFound);
        };
        self.enter(LookupPhase::Extracting);

        match self.service.extract_page(&id, page) {
            Ok(certificate) => {
                self.certificate = Some(certificate);
                self.enter(LookupPhase::Ready)
            }
            Err(err) => {
                self.failure = Some(err.to_string());
                self.enter(LookupPhase::ExtractionFailed)
            }
        }
    }

    /// Hand out the extracted page again; each call is one logged download.
    pub fn download(
        &mut self,
        client_address: &str,
        downloaded_at: DateTime<Utc>,
    ) -> Result<&ExtractedCertificate, SessionError> {
        if !matches!(self.phase, LookupPhase::Ready | LookupPhase::Downloaded) {
            return Err(SessionError::NotReady(self.phase));
        }
        let (Some(id), Some(certificate)) = (self.id.as_ref(), self.certificate.as_ref()) else {
            return Err(SessionError::NotReady(self.phase));
        };

        self.service
            .record_download(id, certificate.page, client_address, downloaded_at);
        self.downloads += 1;
        self.phase = LookupPhase::Downloaded;
        self.history.push(LookupPhase::Downloaded);

        self.certificate
            .as_ref()
            .ok_or(SessionError::NotReady(self.phase))
    }

    pub fn reset(&mut self) {
        self.phase = LookupPhase::Idle;
        self.history.clear();
        self.history.push(LookupPhase::Idle);
        self.id = None;
        self.certificate = None;
        self.failure = None;
        self.downloads = 0;
    }

    fn enter(&mut self, next: LookupPhase) -> LookupPhase {
        debug_assert!(
            next.can_follow(self.phase),
            "{next:?} cannot follow {:?}",
            self.phase
        );
        debug!(from = ?self.phase, to = ?next, "certificate lookup transition");
        self.phase = next;
        self.history.push(next);
        next
    }
}
