use crate::error::Result;

/// Where workbook bytes come from: an uploaded file or a remote URL.
pub trait WorkbookSource: Send + Sync {
    /// Short label for status lines and logs.
    fn describe(&self) -> String;

    fn read_bytes(&self) -> Result<Vec<u8>>;
}
