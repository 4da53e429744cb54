use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::domain::{strip_leading_zeros, NormalizedId, PageNumber};

/// Failures while loading the resident index data file.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("failed to read resident index: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid resident index CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: '{id}' is not a numeric ID")]
    InvalidId { row: usize, id: String },
    #[error("row {row}: ID {id} points at page 0; pages are 1-based")]
    ZeroPage { row: usize, id: String },
    #[error("row {row}: ID {id} appears more than once")]
    DuplicateId { row: usize, id: String },
}

/// The resident index and the source document disagree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityError {
    #[error("ID {id} maps to page {page} but the source document has {page_count} page(s)")]
    PageOutOfRange {
        id: String,
        page: PageNumber,
        page_count: u32,
    },
}

#[derive(Debug, Deserialize)]
struct IndexRow {
    id: String,
    page: u32,
}

/// Read-only mapping from normalized national ID to source-document page.
#[derive(Debug, Clone, Default)]
pub struct ResidentIndex {
    pages: HashMap<String, PageNumber>,
}

impl ResidentIndex {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, IndexError> {
        let file = std::fs::File::open(path.as_ref())?;
        let index = Self::from_reader(file)?;
        info!(
            path = %path.as_ref().display(),
            entries = index.len(),
            "resident index loaded"
        );
        Ok(index)
    }

    /// Parse `id,page` rows; IDs are stored without leading zeros.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, IndexError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut pages = HashMap::new();

        for (position, row) in csv_reader.deserialize::<IndexRow>().enumerate() {
            let row_number = position + 1;
            let IndexRow { id, page } = row?;

            if id.is_empty() || !id.bytes().all(|byte| byte.is_ascii_digit()) {
                return Err(IndexError::InvalidId {
                    row: row_number,
                    id,
                });
            }
            if page == 0 {
                return Err(IndexError::ZeroPage {
                    row: row_number,
                    id,
                });
            }

            let key = strip_leading_zeros(&id).to_string();
            if pages.insert(key, PageNumber(page)).is_some() {
                return Err(IndexError::DuplicateId {
                    row: row_number,
                    id,
                });
            }
        }

        Ok(Self { pages })
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let pages = entries
            .into_iter()
            .map(|(id, page)| {
                (
                    strip_leading_zeros(id.as_ref()).to_string(),
                    PageNumber(page),
                )
            })
            .collect();
        Self { pages }
    }

    pub fn resolve_page(&self, id: &NormalizedId) -> Option<PageNumber> {
        self.pages.get(id.key()).copied()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn max_page(&self) -> Option<PageNumber> {
        self.pages.values().copied().max()
    }

    /// Every page the index points at must exist in the source document.
    pub fn verify_against(&self, page_count: u32) -> Result<(), IntegrityError> {
        let mut offenders: Vec<(&String, &PageNumber)> = self
            .pages
            .iter()
            .filter(|(_, page)| page.get() > page_count)
            .collect();
        offenders.sort_by(|left, right| right.1.cmp(left.1).then(left.0.cmp(right.0)));

        match offenders.first() {
            Some((id, page)) => Err(IntegrityError::PageOutOfRange {
                id: (*id).clone(),
                page: **page,
                page_count,
            }),
            None => Ok(()),
        }
    }
}
