use std::collections::HashMap;
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::domain::entities::dataset::{EstateDataset, Notice};
use crate::domain::entities::layout::SheetLayout;
use crate::infra::import::extract::extract;
use crate::infra::import::xlsx::open_sheet;
use crate::usecase::ports::source::WorkbookSource;

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub source: String,
    /// SHA-256 of the workbook bytes; `None` when the bytes could not be read.
    pub digest: Option<String>,
    pub cache_hit: bool,
    pub dataset: Arc<EstateDataset>,
}

/// Loads workbooks through one layout, remembering results by content hash.
pub struct ImportService {
    layout: SheetLayout,
    cache: HashMap<String, Arc<EstateDataset>>,
}

impl ImportService {
    pub fn new(layout: SheetLayout) -> Self {
        Self {
            layout,
            cache: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn load(&mut self, source: &dyn WorkbookSource) -> LoadOutcome {
        let description = source.describe();
        match source.read_bytes() {
            Ok(bytes) => self.load_bytes(&description, &bytes),
            Err(err) => {
                warn!(source = %description, error = %err, "workbook unavailable");
                LoadOutcome {
                    source: description,
                    digest: None,
                    cache_hit: false,
                    dataset: Arc::new(EstateDataset::failed(Notice::from(&err))),
                }
            }
        }
    }

    pub fn load_bytes(&mut self, description: &str, bytes: &[u8]) -> LoadOutcome {
        let digest = content_digest(bytes);

        if let Some(dataset) = self.cache.get(&digest) {
            debug!(source = description, digest = %digest, "cache hit");
            return LoadOutcome {
                source: description.to_string(),
                digest: Some(digest),
                cache_hit: true,
                dataset: Arc::clone(dataset),
            };
        }

        let dataset = match open_sheet(bytes, &self.layout.sheet) {
            Ok(sheet) => extract(&sheet, &self.layout),
            Err(err) => EstateDataset::failed(Notice::from(&err)),
        };
        for notice in &dataset.notices {
            warn!(source = description, "{notice}");
        }
        info!(
            source = description,
            months = dataset.monthly.len(),
            wings = dataset.wings.len(),
            vendors = dataset.vendors.len(),
            "workbook extracted"
        );

        let dataset = Arc::new(dataset);
        self.cache.insert(digest.clone(), Arc::clone(&dataset));
        LoadOutcome {
            source: description.to_string(),
            digest: Some(digest),
            cache_hit: false,
            dataset,
        }
    }
}

pub fn content_digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::dataset::NoticeKind;
    use crate::error::{DashboardError, Result};

    struct Unreachable;

    impl WorkbookSource for Unreachable {
        fn describe(&self) -> String {
            "offline".to_string()
        }

        fn read_bytes(&self) -> Result<Vec<u8>> {
            Err(DashboardError::SourceUnavailable("connection refused".to_string()))
        }
    }

    fn service() -> ImportService {
        ImportService::new(SheetLayout::embedded().expect("embedded layout should parse"))
    }

    #[test]
    fn digest_is_hex_sha256() {
        assert_eq!(
            content_digest(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn unavailable_source_yields_empty_dataset() {
        let outcome = service().load(&Unreachable);

        assert!(outcome.dataset.is_empty());
        assert_eq!(outcome.digest, None);
        assert_eq!(outcome.dataset.notices[0].kind, NoticeKind::SourceUnavailable);
    }

    #[test]
    fn unreadable_bytes_are_memoized_as_schema_mismatch() {
        let mut service = service();

        let first = service.load_bytes("junk", b"not a workbook");
        let second = service.load_bytes("junk again", b"not a workbook");

        assert_eq!(first.dataset.notices[0].kind, NoticeKind::SchemaMismatch);
        assert!(!first.cache_hit);
        assert!(second.cache_hit);
        assert!(Arc::ptr_eq(&first.dataset, &second.dataset));
        assert_eq!(service.cached_len(), 1);
    }
}
