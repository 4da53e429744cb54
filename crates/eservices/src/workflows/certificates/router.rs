use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde_json::json;
use tracing::{error, info};

use super::repository::{DownloadLogger, SourceDocumentProvider};
use super::service::{CertificateLookup, CertificateLookupService, CertificateServiceError};

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Router builder exposing the certificate download endpoint.
pub fn certificate_router<S, L>(service: Arc<CertificateLookupService<S, L>>) -> Router
where
    S: SourceDocumentProvider + 'static,
    L: DownloadLogger + 'static,
{
    Router::new()
        .route(
            "/api/v1/certificates/:id_number",
            get(download_handler::<S, L>),
        )
        .with_state(service)
}

/// First hop of `x-forwarded-for`, else the peer socket address.
pub(crate) fn client_address(
    headers: &HeaderMap,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
) -> String {
    let forwarded = headers
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    match (forwarded, connect_info) {
        (Some(address), _) => address.to_string(),
        (None, Some(ConnectInfo(peer))) => peer.ip().to_string(),
        (None, None) => "unknown".to_string(),
    }
}

pub(crate) async fn download_handler<S, L>(
    State(service): State<Arc<CertificateLookupService<S, L>>>,
    Path(id_number): Path<String>,
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
) -> Response
where
    S: SourceDocumentProvider + 'static,
    L: DownloadLogger + 'static,
{
    let address = client_address(&headers, connect_info.as_ref());

    // Source reads and PDF parsing run on the blocking pool.
    let lookup = tokio::task::spawn_blocking(move || {
        let outcome = service.lookup(&id_number)?;
        if let CertificateLookup::Found { id, certificate } = &outcome {
            service.record_download(id, certificate.page, &address, Utc::now());
        }
        Ok::<_, CertificateServiceError>(outcome)
    })
    .await;

    let outcome = match lookup {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(error = %err, "certificate lookup task failed");
            let payload = json!({ "error": "certificate unavailable" });
            return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response();
        }
    };

    match outcome {
        Ok(CertificateLookup::Found { certificate, .. }) => {
            info!(page = %certificate.page, "resident certificate served");

            let disposition = format!("attachment; filename=\"{}\"", certificate.file_name());
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, mime::APPLICATION_PDF.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                certificate.bytes,
            )
                .into_response()
        }
        Ok(CertificateLookup::NotFound(_)) => {
            let payload = json!({ "error": "ID not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(CertificateServiceError::Lookup(err)) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(err) => {
            error!(error = %err, "certificate could not be produced");
            let payload = json!({ "error": "certificate unavailable" });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
