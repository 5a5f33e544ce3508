//! Dioxus UI components for menu-draft.
//!
//! Provides the primary "add menu" dialog, the confirmation dialog
//! stacked on top of it, the image upload tile, and the primary action
//! button.

mod add_menu;
mod button_confirm;
mod confirm_create;
mod image_upload;

pub use add_menu::AddMenuModal;
pub use button_confirm::ButtonConfirm;
pub use confirm_create::ConfirmCreateMenuModal;
pub use image_upload::ImageUpload;
