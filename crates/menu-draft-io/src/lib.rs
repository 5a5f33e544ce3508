//! menu-draft-io: Browser I/O and Dioxus component library.
//!
//! Reads picked files from the browser and provides the create-menu
//! dialogs that drive the `menu-draft` workflow.

pub mod components;
pub mod file;

pub use components::{AddMenuModal, ButtonConfirm, ConfirmCreateMenuModal, ImageUpload};
pub use file::BrowserFile;
