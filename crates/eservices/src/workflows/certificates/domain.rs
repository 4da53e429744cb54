use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MIN_ID_DIGITS: usize = 5;
const MAX_ID_DIGITS: usize = 9;

/// User-input errors raised before any lookup happens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("ID must be 5-9 digits, received '{0}'")]
    InvalidFormat(String),
}

/// National ID as entered, alongside the key used against the resident index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedId {
    raw: String,
    key: String,
}

impl NormalizedId {
    /// Trim, require 5-9 ASCII digits, and strip leading zeros for the lookup key.
    pub fn parse(raw: &str) -> Result<Self, LookupError> {
        let trimmed = raw.trim();
        let digits_only = trimmed.bytes().all(|byte| byte.is_ascii_digit());
        if !digits_only || !(MIN_ID_DIGITS..=MAX_ID_DIGITS).contains(&trimmed.len()) {
            return Err(LookupError::InvalidFormat(raw.to_string()));
        }

        Ok(Self {
            raw: trimmed.to_string(),
            key: strip_leading_zeros(trimmed).to_string(),
        })
    }

    /// The ID as the applicant typed it, for display and logging.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for NormalizedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// An all-zero ID keeps a single `0`.
pub(crate) fn strip_leading_zeros(digits: &str) -> &str {
    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() && !digits.is_empty() {
        "0"
    } else {
        stripped
    }
}

/// 1-based page within the certificate source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageNumber(pub u32);

impl PageNumber {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Single-page PDF cut from the source document for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedCertificate {
    pub requested_id: String,
    pub page: PageNumber,
    pub extracted_at: DateTime<Utc>,
    pub bytes: Vec<u8>,
}

impl ExtractedCertificate {
    pub fn file_name(&self) -> String {
        format!("resident-certificate-{}.pdf", self.requested_id)
    }
}

/// Append-only record of a successful certificate download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLogEntry {
    pub id_number: String,
    pub page: PageNumber,
    pub downloaded_at: DateTime<Utc>,
    pub client_address: String,
}
