use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use crate::error::{DashboardError, Result};
use crate::usecase::ports::source::WorkbookSource;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub path: PathBuf,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WorkbookSource for LocalFile {
    fn describe(&self) -> String {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn read_bytes(&self) -> Result<Vec<u8>> {
        std::fs::read(&self.path).map_err(|err| {
            DashboardError::SourceUnavailable(format!(
                "failed to read {}: {err}",
                self.path.display()
            ))
        })
    }
}

/// A workbook fetched once per load with a plain GET; no retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUrl {
    pub url: String,
}

impl RemoteUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl WorkbookSource for RemoteUrl {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn read_bytes(&self) -> Result<Vec<u8>> {
        let unavailable =
            |err: reqwest::Error| DashboardError::SourceUnavailable(format!("{}: {err}", self.url));

        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(unavailable)?;
        let response = client
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(unavailable)?;
        let bytes = response.bytes().map_err(unavailable)?;

        info!(url = %self.url, bytes = bytes.len(), "workbook fetched");
        Ok(bytes.to_vec())
    }
}
