use metrics_exporter_prometheus::PrometheusHandle;
use municipal_eservices::config::AppConfig;
use municipal_eservices::error::AppError;
use municipal_eservices::workflows::certificates::{
    CertificateLookupService, DownloadLogEntry, DownloadLogError, DownloadLogger,
    FileSourceDocument, ResidentIndex,
};
use municipal_eservices::workflows::eligibility::{EligibilityEngine, QuestionId};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

pub(crate) type PortalCertificateService =
    CertificateLookupService<FileSourceDocument, TracingDownloadLogger>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Download log for the long-running server: each entry becomes one structured event.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct TracingDownloadLogger;

impl DownloadLogger for TracingDownloadLogger {
    fn log(&self, entry: DownloadLogEntry) -> Result<(), DownloadLogError> {
        info!(
            target: "certificate_downloads",
            id_number = %entry.id_number,
            page = %entry.page,
            client_address = %entry.client_address,
            downloaded_at = %entry.downloaded_at.to_rfc3339(),
            "resident certificate downloaded"
        );
        Ok(())
    }
}

/// Download log held for one CLI invocation.
#[derive(Default, Clone)]
pub(crate) struct InMemoryDownloadLogger {
    entries: Arc<Mutex<Vec<DownloadLogEntry>>>,
}

impl DownloadLogger for InMemoryDownloadLogger {
    fn log(&self, entry: DownloadLogEntry) -> Result<(), DownloadLogError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| DownloadLogError::Unavailable("download log mutex poisoned".into()))?;
        guard.push(entry);
        Ok(())
    }
}

impl InMemoryDownloadLogger {
    pub(crate) fn entries(&self) -> Vec<DownloadLogEntry> {
        self.entries
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

pub(crate) fn build_certificate_service<L>(
    config: &AppConfig,
    logger: Arc<L>,
) -> Result<CertificateLookupService<FileSourceDocument, L>, AppError>
where
    L: DownloadLogger + 'static,
{
    let index = ResidentIndex::from_path(&config.certificates.resident_index_path)?;
    let source = FileSourceDocument::new(&config.certificates.source_document_path);
    Ok(CertificateLookupService::new(
        Arc::new(index),
        Arc::new(source),
        logger,
    ))
}

/// Both startup integrity checks; any failure halts startup.
pub(crate) fn run_integrity_checks<L>(
    engine: &EligibilityEngine,
    certificates: &CertificateLookupService<FileSourceDocument, L>,
) -> Result<(), AppError>
where
    L: DownloadLogger + 'static,
{
    engine.self_check()?;
    let page_count = certificates.verify_integrity()?;
    info!(
        page_count,
        residents = certificates.index().len(),
        "startup integrity checks passed"
    );
    Ok(())
}

/// Parse a `question=value` pair such as `maritalStatus=single`.
pub(crate) fn parse_answer(raw: &str) -> Result<(QuestionId, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected question=value, received '{raw}'"))?;
    let question = QuestionId::from_key(key.trim())
        .ok_or_else(|| format!("unknown question '{}'", key.trim()))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("missing answer for '{}'", question.key()));
    }
    Ok((question, value.to_string()))
}
