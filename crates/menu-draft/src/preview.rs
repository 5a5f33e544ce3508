//! Preview encoding and the generation guard that orders its results.
//!
//! [`encode`] reads an accepted file and produces a `data:<mime>;base64,`
//! URI. Reading is asynchronous, so several encodes may be in flight
//! when the user picks files in quick succession. [`PreviewSlot`] tags
//! each request with a monotonically increasing generation and only
//! lets the newest one land: last selection wins, not last completion.

use std::future::Future;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::types::{EncodeError, Preview};
use crate::validate::AcceptedFile;

/// Asynchronous source of a file's bytes.
///
/// Implemented for browser file handles in `menu-draft-io` and for
/// in-memory buffers here.
pub trait FileSource {
    /// Read the full payload.
    fn read_all(self) -> impl Future<Output = Result<Vec<u8>, EncodeError>>;
}

impl FileSource for Vec<u8> {
    fn read_all(self) -> impl Future<Output = Result<Vec<u8>, EncodeError>> {
        std::future::ready(Ok(self))
    }
}

/// Build a data URI from a MIME type and raw bytes.
#[must_use]
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    let payload = STANDARD.encode(bytes);
    format!("data:{mime};base64,{payload}")
}

/// Read an accepted file and encode it as a [`Preview`].
///
/// Never yields a partial preview: either the whole payload is encoded
/// or an error is returned. A zero-byte file encodes to a URI with an
/// empty payload.
///
/// # Errors
///
/// Returns [`EncodeError::Read`] if the source fails to read.
#[allow(clippy::future_not_send)] // WASM is single-threaded; Send is not needed
pub async fn encode<S: FileSource>(file: AcceptedFile<S>) -> Result<Preview, EncodeError> {
    let (info, source) = file.into_parts();
    let bytes = source.read_all().await?;
    let mime = info.mime.trim().to_ascii_lowercase();
    Ok(Preview::from_data_uri(data_uri(&mime, &bytes)))
}

/// Identifies one encode request.
///
/// Returned by [`PreviewSlot::begin`] and handed back to
/// [`PreviewSlot::complete`] with the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[must_use = "pass the ticket back to PreviewSlot::complete when the encode finishes"]
pub struct EncodeTicket(u64);

impl EncodeTicket {
    /// The request generation.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

/// What [`PreviewSlot::complete`] did with a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The preview was stored.
    Applied,
    /// A newer request superseded this one; the result was dropped.
    Stale,
    /// The current request failed; the slot is left without a preview.
    Failed(EncodeError),
}

/// Holds the current preview and guards it against stale encodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewSlot {
    generation: u64,
    in_flight: bool,
    preview: Option<Preview>,
    last_error: Option<EncodeError>,
}

impl PreviewSlot {
    /// Start a new request, superseding any in flight.
    ///
    /// The preview of an earlier selection is dropped here, so it can
    /// never stand in for the new one.
    pub fn begin(&mut self) -> EncodeTicket {
        self.generation += 1;
        self.in_flight = true;
        self.preview = None;
        self.last_error = None;
        EncodeTicket(self.generation)
    }

    /// Apply the result of the request identified by `ticket`.
    ///
    /// Results from superseded requests are ignored entirely: they
    /// neither touch the preview nor clear the loading flag of the newer
    /// request.
    pub fn complete(
        &mut self,
        ticket: EncodeTicket,
        result: Result<Preview, EncodeError>,
    ) -> Completion {
        if ticket.0 != self.generation {
            tracing::debug!(
                stale = ticket.0,
                current = self.generation,
                "discarding superseded preview"
            );
            return Completion::Stale;
        }
        self.in_flight = false;
        match result {
            Ok(preview) => {
                self.preview = Some(preview);
                self.last_error = None;
                Completion::Applied
            }
            Err(e) => {
                tracing::warn!(generation = ticket.0, error = %e, "preview encoding failed");
                self.last_error = Some(e.clone());
                Completion::Failed(e)
            }
        }
    }

    /// The current preview, if any.
    #[must_use]
    pub const fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Whether the newest request is still being encoded.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// The failure of the newest request, if it failed.
    #[must_use]
    pub const fn last_error(&self) -> Option<&EncodeError> {
        self.last_error.as_ref()
    }

    /// The generation of the newest request (0 before any).
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}
