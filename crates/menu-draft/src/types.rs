//! Shared types for the create-menu-item workflow.

use serde::{Deserialize, Serialize};

/// Metadata of a user-selected file, as reported by the file picker.
///
/// This is everything [`crate::validate`] looks at. The payload itself
/// is read later, and only for accepted files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Filename as reported by the browser (display only).
    pub name: String,
    /// Declared MIME type, e.g. `image/png`. Empty when unknown.
    pub mime: String,
    /// Size in bytes.
    pub size: u64,
}

impl FileInfo {
    /// Create file metadata.
    #[must_use]
    pub fn new(name: impl Into<String>, mime: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size,
        }
    }
}

/// A file the user picked, paired with the source its bytes come from.
///
/// Transient: exists only between selection and the validation outcome.
/// `S` is usually a browser file handle; tests use `Vec<u8>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile<S> {
    /// Metadata used for validation.
    pub info: FileInfo,
    /// Where the payload is read from.
    pub source: S,
}

impl<S> SelectedFile<S> {
    /// Pair metadata with its payload source.
    #[must_use]
    pub const fn new(info: FileInfo, source: S) -> Self {
        Self { info, source }
    }
}

/// A displayable preview of an accepted image: a `data:` URI embedding
/// the full file content as base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview(String);

impl Preview {
    /// Wrap an already-encoded data URI.
    #[must_use]
    pub const fn from_data_uri(uri: String) -> Self {
        Self(uri)
    }

    /// The data URI, usable directly as an `<img src>`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The MIME type embedded in the URI header.
    #[must_use]
    pub fn mime(&self) -> &str {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(';'))
            .map_or("", |(mime, _)| mime)
    }

    /// Consume the preview and return the data URI.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

/// The in-progress, not-yet-persisted menu item being created.
///
/// Mutated by form field edits and by preview updates. Nothing in this
/// crate persists it; the host receives it on commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuDraft {
    /// Product name as typed.
    pub name: String,
    /// Parsed sale price, `None` while the price text does not parse.
    pub price: Option<f64>,
    /// Raw price text as typed, kept for redisplay.
    pub price_text: String,
    /// Preview of the most recently accepted image.
    pub preview: Option<Preview>,
}

impl MenuDraft {
    /// Replace the product name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replace the price text and re-parse it.
    ///
    /// Surrounding whitespace is ignored. Text that does not parse as a
    /// finite number leaves `price` as `None`.
    pub fn set_price_text(&mut self, text: impl Into<String>) {
        self.price_text = text.into();
        self.price = self
            .price_text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite());
    }

    /// Whether an image preview is attached.
    #[must_use]
    pub const fn has_image(&self) -> bool {
        self.preview.is_some()
    }
}

/// Limits applied to selected files before they may be previewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadPolicy {
    /// MIME types accepted, compared ASCII case-insensitively.
    pub allowed_mime_types: Vec<String>,

    /// Files must be strictly smaller than this many bytes.
    pub max_size_bytes: u64,
}

/// Default upper bound on image size: 2 MiB.
pub const DEFAULT_MAX_SIZE_BYTES: u64 = 2 * 1024 * 1024;

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_mime_types: vec!["image/jpeg".to_owned(), "image/png".to_owned()],
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
        }
    }
}

impl UploadPolicy {
    /// Short human label for the allowed types, e.g. `JPG/PNG`.
    ///
    /// Uses the MIME subtype in upper case, with `jpeg` shown as `JPG`.
    #[must_use]
    pub fn type_label(&self) -> String {
        self.allowed_mime_types
            .iter()
            .map(|mime| {
                let subtype = mime.rsplit_once('/').map_or(mime.as_str(), |(_, s)| s);
                if subtype.eq_ignore_ascii_case("jpeg") {
                    "JPG".to_owned()
                } else {
                    subtype.to_ascii_uppercase()
                }
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Whether `mime` is one of the allowed types.
    #[must_use]
    pub fn allows_mime(&self, mime: &str) -> bool {
        self.allowed_mime_types
            .iter()
            .any(|a| a.eq_ignore_ascii_case(mime.trim()))
    }

    /// Whether `size` is under the limit.
    #[must_use]
    pub const fn allows_size(&self, size: u64) -> bool {
        size < self.max_size_bytes
    }

    /// Value for an `<input type="file" accept=...>` attribute.
    ///
    /// Advisory only; [`crate::validate`] remains the authoritative check.
    #[must_use]
    pub fn accept_attribute(&self) -> String {
        self.allowed_mime_types.join(",")
    }
}

/// Errors that can occur while encoding a preview.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// Reading the file payload failed.
    #[error("failed to read file: {0}")]
    Read(String),
}
