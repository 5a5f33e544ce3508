//! The "add menu" dialog: image, name, price, and a two-step confirm.
//!
//! [`AddMenuModal`] is the host-facing surface. Each time the host makes
//! it visible a fresh [`CreateMenu`] workflow is mounted, so a reopened
//! dialog always starts empty in the editing state.

use dioxus::prelude::*;
use menu_draft::{CreateMenu, MenuDraft, Selection, SubmitGate, Transition, UploadPolicy};

use super::{ButtonConfirm, ConfirmCreateMenuModal, ImageUpload};
use crate::file::BrowserFile;

/// Props for the [`AddMenuModal`] component.
#[derive(Props, Clone, PartialEq)]
pub struct AddMenuModalProps {
    /// Whether the primary dialog is shown. Turning this on starts a new
    /// workflow instance.
    visible: bool,
    /// Contextual label (e.g. the category name), display only.
    menu_name: String,
    /// Called once when the workflow commits or is closed from outside.
    on_close: EventHandler<()>,
    /// Receives the draft when the user confirms creation, before
    /// `on_close` runs.
    on_commit: Option<EventHandler<MenuDraft>>,
    /// Upload limits. Defaults to JPEG/PNG under 2 MiB.
    policy: Option<UploadPolicy>,
    /// Decides whether the primary action may proceed. Defaults to
    /// always allowing it.
    gate: Option<SubmitGate>,
}

/// Host-facing create-menu dialog.
#[component]
pub fn AddMenuModal(props: AddMenuModalProps) -> Element {
    if !props.visible {
        return rsx! {};
    }

    rsx! {
        CreateMenuDialogs {
            menu_name: props.menu_name,
            on_close: props.on_close,
            on_commit: props.on_commit,
            policy: props.policy.unwrap_or_default(),
            gate: props.gate.unwrap_or_default(),
        }
    }
}

/// Props for [`CreateMenuDialogs`].
#[derive(Props, Clone, PartialEq)]
struct CreateMenuDialogsProps {
    menu_name: String,
    on_close: EventHandler<()>,
    on_commit: Option<EventHandler<MenuDraft>>,
    policy: UploadPolicy,
    gate: SubmitGate,
}

/// One mounted workflow instance: the primary dialog plus the
/// confirmation dialog, both driven by the same [`CreateMenu`].
#[component]
fn CreateMenuDialogs(props: CreateMenuDialogsProps) -> Element {
    let on_close = props.on_close;
    let on_commit = props.on_commit;

    let mut workflow = use_signal(|| {
        CreateMenu::new(props.policy.clone(), props.gate.clone(), move |ending| {
            tracing::debug!(?ending, "create-menu workflow finished");
            on_close.call(());
        })
    });
    let mut blocked = use_signal(|| false);

    // Validate synchronously, then read and encode outside the borrow.
    let on_select = move |file: BrowserFile| async move {
        let selection = workflow.write().select_file(file.into_selected());
        if let Selection::Accepted { ticket, file } = selection {
            let result = menu_draft::encode(file).await;
            workflow.write().finish_encode(ticket, result);
        }
    };

    let on_submit = move |()| {
        let transition = workflow.write().submit();
        blocked.set(transition == Transition::Blocked);
    };

    let on_cancel = move |()| {
        workflow.write().cancel();
    };

    let on_confirm = move |()| {
        let _ = workflow.write().confirm_with(|draft| {
            if let Some(handler) = on_commit {
                handler.call(draft);
            }
        });
    };

    let on_external_close = move |_| {
        workflow.write().close();
    };

    let wf = workflow.read();
    let state = wf.state();
    if !state.primary_open() {
        return rsx! {};
    }
    let draft = wf.draft().clone();
    let loading = wf.is_loading();
    let warnings = wf.warnings().to_vec();
    let accept = wf.policy().accept_attribute();
    drop(wf);

    rsx! {
        // Overlay
        div {
            class: "fixed inset-0 z-40 flex items-center justify-center bg-black/40",
            onclick: on_external_close,

            div {
                class: "w-[728px] bg-[var(--surface)] p-[30px] flex flex-col items-center text-center",
                onclick: move |evt| evt.stop_propagation(),

                h2 { class: "text-[40px] font-bold text-[var(--text-title)]", "Add menu" }
                if !props.menu_name.is_empty() {
                    p { class: "text-[var(--text-secondary)]", "{props.menu_name}" }
                }

                div { class: "flex my-[40px] gap-[30px] items-center",
                    ImageUpload {
                        preview: draft.preview.clone(),
                        loading: loading,
                        warnings: warnings,
                        accept: accept,
                        on_select: on_select,
                    }

                    div { class: "flex flex-col gap-[16px]",
                        {render_field("menu-name", "Name", &draft.name, move |v| workflow.write().set_name(v))}
                        {render_field("menu-price", "Price", &draft.price_text, move |v| workflow.write().set_price_text(v))}
                    }
                }

                if blocked() {
                    p { class: "text-[var(--text-error)] text-sm mb-2",
                        "Please fill in the menu details before adding."
                    }
                }

                ButtonConfirm {
                    text: "Add menu",
                    onclick: on_submit,
                }
            }
        }

        ConfirmCreateMenuModal {
            open: state.confirm_open(),
            on_cancel: on_cancel,
            on_confirm: on_confirm,
        }
    }
}

/// Render a labeled single-line text input.
fn render_field(
    id: &str,
    label: &str,
    value: &str,
    on_input: impl FnMut(String) + 'static,
) -> Element {
    let id = id.to_string();
    let label = label.to_string();
    let value = value.to_string();
    let mut on_input = on_input;

    rsx! {
        div { class: "flex gap-[50px] justify-between items-center",
            label { r#for: "{id}",
                class: "text-[18px] font-bold text-[var(--text-accent)]",
                "{label}"
            }
            input {
                r#type: "text",
                id: "{id}",
                value: "{value}",
                class: "w-[124px] h-[44px] border-2 border-[var(--border-accent)]",
                oninput: move |e| on_input(e.value()),
            }
        }
    }
}
