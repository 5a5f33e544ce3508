//! Primary action button used at the bottom of dialogs.

use dioxus::prelude::*;

/// Props for the [`ButtonConfirm`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ButtonConfirmProps {
    /// Button label.
    text: String,
    /// Called when the button is clicked.
    onclick: EventHandler<()>,
}

/// A full-width accent button.
#[component]
pub fn ButtonConfirm(props: ButtonConfirmProps) -> Element {
    rsx! {
        button {
            r#type: "button",
            class: "px-6 py-2 bg-[var(--btn-primary)] hover:bg-[var(--btn-primary-hover)] text-white font-bold cursor-pointer transition-colors",
            onclick: move |_| props.onclick.call(()),
            "{props.text}"
        }
    }
}
