//! Picked-file adapter for the preview encoder.
//!
//! Dioxus hands file-input selections over as [`FileData`]. Wrapping it
//! in [`BrowserFile`] lets `menu_draft::encode` read the payload without
//! the core crate knowing about the browser.

use std::future::Future;

use dioxus::html::FileData;
use menu_draft::{EncodeError, FileInfo, FileSource, SelectedFile};

/// A file chosen through an `<input type="file">` or a drop.
pub struct BrowserFile(FileData);

impl BrowserFile {
    /// Wrap a Dioxus file handle.
    #[must_use]
    pub const fn new(file: FileData) -> Self {
        Self(file)
    }

    /// Metadata as reported by the browser.
    ///
    /// A missing content type becomes an empty MIME string, which the
    /// validator rejects as the wrong type.
    #[must_use]
    pub fn info(&self) -> FileInfo {
        FileInfo::new(
            self.0.name(),
            self.0.content_type().unwrap_or_default(),
            self.0.size(),
        )
    }

    /// Pair the handle with its metadata for validation.
    #[must_use]
    pub fn into_selected(self) -> SelectedFile<Self> {
        SelectedFile::new(self.info(), self)
    }
}

impl FileSource for BrowserFile {
    fn read_all(self) -> impl Future<Output = Result<Vec<u8>, EncodeError>> {
        async move {
            self.0
                .read_bytes()
                .await
                .map(|bytes| bytes.to_vec())
                .map_err(|e| EncodeError::Read(e.to_string()))
        }
    }
}
