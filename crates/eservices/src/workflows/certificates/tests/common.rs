use std::sync::{Arc, Mutex};

use axum::response::Response;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use serde_json::Value;

use crate::workflows::certificates::{
    CertificateLookupService, DownloadLogEntry, DownloadLogError, DownloadLogger, ResidentIndex,
    SourceDocumentProvider, SourceError,
};

/// In-memory PDF whose page `n` draws the text `CERTIFICATE PAGE n`.
pub(super) fn certificate_pdf(page_total: u32) -> Vec<u8> {
    let mut document = Document::with_version("1.5");
    let pages_id = document.new_object_id();
    let font_id = document.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = document.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for number in 1..=page_total {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 18.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::string_literal(page_marker(number))],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = document.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("content encodes"),
        ));
        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_total as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    document.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    document.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    document.save_to(&mut bytes).expect("pdf serializes");
    bytes
}

pub(super) fn page_marker(number: u32) -> String {
    format!("CERTIFICATE PAGE {number}")
}

/// Decoded content stream of every page in `bytes`, in page order.
pub(super) fn page_contents(bytes: &[u8]) -> Vec<String> {
    let document = Document::load_mem(bytes).expect("extracted pdf parses");
    document
        .get_pages()
        .values()
        .map(|page_id| {
            let content = document.get_page_content(*page_id).expect("page content");
            String::from_utf8_lossy(&content).into_owned()
        })
        .collect()
}

#[derive(Debug, Default)]
pub(super) struct RecordingLogger {
    entries: Mutex<Vec<DownloadLogEntry>>,
}

impl RecordingLogger {
    pub(super) fn entries(&self) -> Vec<DownloadLogEntry> {
        self.entries.lock().expect("logger mutex").clone()
    }
}

impl DownloadLogger for RecordingLogger {
    fn log(&self, entry: DownloadLogEntry) -> Result<(), DownloadLogError> {
        self.entries.lock().expect("logger mutex").push(entry);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub(super) struct FailingLogger;

impl DownloadLogger for FailingLogger {
    fn log(&self, _entry: DownloadLogEntry) -> Result<(), DownloadLogError> {
        Err(DownloadLogError::Unavailable("visit table locked".to_string()))
    }
}

#[derive(Debug, Default)]
pub(super) struct MissingSource;

impl SourceDocumentProvider for MissingSource {
    fn load(&self) -> Result<Vec<u8>, SourceError> {
        Err(SourceError::Unavailable("source document not uploaded".to_string()))
    }
}

pub(super) const RESIDENT_ID: &str = "66013491";

/// Three residents spread over a three-page source document.
pub(super) fn resident_index() -> ResidentIndex {
    ResidentIndex::from_entries([(RESIDENT_ID, 1), ("7593123", 2), ("31415926", 3)])
}

pub(super) type RecordingService = CertificateLookupService<Vec<u8>, RecordingLogger>;

pub(super) fn service_with_logger() -> (Arc<RecordingService>, Arc<RecordingLogger>) {
    let logger = Arc::new(RecordingLogger::default());
    let service = CertificateLookupService::new(
        Arc::new(resident_index()),
        Arc::new(certificate_pdf(3)),
        Arc::clone(&logger),
    );
    (Arc::new(service), logger)
}

pub(super) fn service() -> Arc<RecordingService> {
    service_with_logger().0
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("valid json")
}

/// In-memory source that remembers which threads loaded it.
#[derive(Debug)]
pub(super) struct ThreadRecordingSource {
    document: Vec<u8>,
    threads: Mutex<Vec<std::thread::ThreadId>>,
}

impl ThreadRecordingSource {
    pub(super) fn new(document: Vec<u8>) -> Self {
        Self {
            document,
            threads: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn threads(&self) -> Vec<std::thread::ThreadId> {
        self.threads.lock().expect("thread mutex").clone()
    }
}

impl SourceDocumentProvider for ThreadRecordingSource {
    fn load(&self) -> Result<Vec<u8>, SourceError> {
        self.threads
            .lock()
            .expect("thread mutex")
            .push(std::thread::current().id());
        Ok(self.document.clone())
    }
}
