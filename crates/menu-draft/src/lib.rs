//! menu-draft: Pure create-menu-item workflow (sans-IO).
//!
//! Covers the parts of "add a menu item" that carry logic:
//! upload validation -> preview encoding -> two-step confirmation.
//!
//! This crate has **no browser dependencies** -- file payloads arrive
//! through the [`FileSource`] trait and the host is notified through a
//! plain callback. All Dioxus components live in `menu-draft-io`.

pub mod confirm;
pub mod preview;
pub mod types;
pub mod validate;
pub mod workflow;

pub use confirm::{ConfirmationController, DialogEvent, DialogState, Ending, Transition};
pub use preview::{Completion, EncodeTicket, FileSource, PreviewSlot, data_uri, encode};
pub use types::{
    DEFAULT_MAX_SIZE_BYTES, EncodeError, FileInfo, MenuDraft, Preview, SelectedFile, UploadPolicy,
};
pub use validate::{AcceptedFile, RejectReason, Rejection, ValidationOutcome, accept, validate};
pub use workflow::{CreateMenu, ENCODE_FAILED_WARNING, Selection, SubmitGate};
