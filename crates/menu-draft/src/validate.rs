//! Upload validation: decides whether a selected file may be previewed.
//!
//! Both rules (type and size) are evaluated independently, so a file
//! can be rejected for both reasons at once. Each reason maps to exactly
//! one user-visible warning via its `Display` impl.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{FileInfo, SelectedFile, UploadPolicy};

/// Why a file was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RejectReason {
    /// The declared MIME type is not in the allowed set.
    WrongType {
        /// Label of the allowed types, as in [`UploadPolicy::type_label`].
        allowed: String,
    },
    /// The file is at or above the size limit.
    TooLarge {
        /// The limit that was exceeded, in bytes.
        max_size_bytes: u64,
    },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongType { allowed } => write!(f, "You can only upload {allowed} file!"),
            Self::TooLarge { max_size_bytes } => {
                write!(f, "Image must be smaller than {}!", human_size(*max_size_bytes))
            }
        }
    }
}

/// Format a byte count the way the warning text expects (`2MB`, `512KB`).
fn human_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{}KB", bytes / KIB)
    } else {
        format!("{bytes} bytes")
    }
}

/// Result of validating a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationOutcome {
    /// Neither rule fired.
    Accepted,
    /// One or both rules fired. Never empty; ordered `WrongType` first.
    Rejected {
        /// Every reason that fired.
        reasons: Vec<RejectReason>,
    },
}

impl ValidationOutcome {
    /// Whether the file was accepted.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// The reasons the file was rejected (empty when accepted).
    #[must_use]
    pub fn reasons(&self) -> &[RejectReason] {
        match self {
            Self::Accepted => &[],
            Self::Rejected { reasons } => reasons,
        }
    }

    /// One warning message per failing rule.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.reasons().iter().map(ToString::to_string).collect()
    }

    /// Whether the type rule fired.
    #[must_use]
    pub fn has_wrong_type(&self) -> bool {
        self.reasons()
            .iter()
            .any(|r| matches!(r, RejectReason::WrongType { .. }))
    }

    /// Whether a size rejection is among the reasons.
    #[must_use]
    pub fn has_too_large(&self) -> bool {
        self.reasons()
            .iter()
            .any(|r| matches!(r, RejectReason::TooLarge { .. }))
    }
}

/// Validate file metadata against `policy`.
///
/// Pure: no warning is emitted here; callers render
/// [`ValidationOutcome::warnings`] however they like.
#[must_use]
pub fn validate(info: &FileInfo, policy: &UploadPolicy) -> ValidationOutcome {
    let mut reasons = Vec::new();
    if !policy.allows_mime(&info.mime) {
        reasons.push(RejectReason::WrongType {
            allowed: policy.type_label(),
        });
    }
    if !policy.allows_size(info.size) {
        reasons.push(RejectReason::TooLarge {
            max_size_bytes: policy.max_size_bytes,
        });
    }
    if reasons.is_empty() {
        ValidationOutcome::Accepted
    } else {
        ValidationOutcome::Rejected { reasons }
    }
}

/// A file that passed validation.
///
/// Only [`accept`] constructs this, so the preview encoder cannot be
/// reached with a rejected file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedFile<S> {
    info: FileInfo,
    source: S,
}

impl<S> AcceptedFile<S> {
    /// Metadata of the accepted file.
    #[must_use]
    pub const fn info(&self) -> &FileInfo {
        &self.info
    }

    /// Split into metadata and payload source.
    #[must_use]
    pub fn into_parts(self) -> (FileInfo, S) {
        (self.info, self.source)
    }
}

/// A file that failed validation, with every reason that fired.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("file {name:?} rejected: {reasons:?}")]
pub struct Rejection {
    /// Filename of the rejected file.
    pub name: String,
    /// Every reason that fired. Never empty.
    pub reasons: Vec<RejectReason>,
}

impl Rejection {
    /// One warning message per failing rule.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.reasons.iter().map(ToString::to_string).collect()
    }
}

/// Validate `file` and, if it passes, wrap it as an [`AcceptedFile`].
///
/// # Errors
///
/// Returns a [`Rejection`] listing every rule the file broke.
pub fn accept<S>(file: SelectedFile<S>, policy: &UploadPolicy) -> Result<AcceptedFile<S>, Rejection> {
    match validate(&file.info, policy) {
        ValidationOutcome::Accepted => Ok(AcceptedFile {
            info: file.info,
            source: file.source,
        }),
        ValidationOutcome::Rejected { reasons } => {
            tracing::info!(name = %file.info.name, mime = %file.info.mime, size = file.info.size, ?reasons, "file rejected");
            Err(Rejection {
                name: file.info.name,
                reasons,
            })
        }
    }
}
