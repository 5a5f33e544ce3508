//! Confirmation dialog stacked on top of the add-menu dialog.

use dioxus::prelude::*;

/// Props for the [`ConfirmCreateMenuModal`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ConfirmCreateMenuModalProps {
    /// Whether the dialog is shown.
    open: bool,
    /// Dismiss and return to the add-menu form.
    on_cancel: EventHandler<()>,
    /// Commit the new menu item.
    on_confirm: EventHandler<()>,
}

/// Small centered dialog asking the user to confirm creation.
///
/// Clicking the backdrop counts as cancel, not as closing the whole
/// workflow.
#[component]
pub fn ConfirmCreateMenuModal(props: ConfirmCreateMenuModalProps) -> Element {
    if !props.open {
        return rsx! {};
    }

    let on_cancel = props.on_cancel;
    let on_confirm = props.on_confirm;

    rsx! {
        // Overlay
        div {
            class: "fixed inset-0 z-50 flex items-center justify-center bg-black/40",
            onclick: move |_| on_cancel.call(()),

            div {
                class: "w-[440px] bg-[var(--surface)] p-[30px] text-center",
                onclick: move |evt| evt.stop_propagation(),

                p { class: "text-[40px] font-bold text-[var(--text-title)]", "Confirm new menu item" }

                div { class: "flex justify-center gap-[30px] mt-[30px]",
                    button {
                        r#type: "button",
                        class: "w-[66px] h-[42px] border border-[var(--btn-danger)] text-[var(--btn-danger)] text-[18px] font-bold hover:bg-[var(--btn-danger-hover)] transition-colors",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        r#type: "button",
                        class: "w-[66px] h-[42px] border border-[var(--btn-success)] text-[var(--btn-success)] text-[18px] font-bold hover:bg-[var(--btn-success-hover)] transition-colors",
                        onclick: move |_| on_confirm.call(()),
                        "Confirm"
                    }
                }
            }
        }
    }
}
