use dioxus::prelude::*;
use menu_draft::MenuDraft;
use menu_draft_io::AddMenuModal;

/// Categories the demo offers an "add menu" button for.
const CATEGORIES: &[&str] = &["Noodles", "Rice dishes", "Drinks"];

fn main() {
    if let Err(e) = dioxus::logger::init(tracing::Level::INFO) {
        web_sys::console::warn_1(&format!("logger init failed: {e}").into());
    }
    dioxus::launch(app);
}

/// Root application component.
///
/// Owns the primary-dialog visibility and the category label, and
/// receives the workflow's completion. Persisting the committed draft
/// belongs to a menu repository this demo does not have, so it only
/// remembers the last one.
fn app() -> Element {
    // --- Application state ---
    let mut visible = use_signal(|| false);
    let mut category = use_signal(String::new);
    let mut last_created = use_signal(|| Option::<MenuDraft>::None);

    // --- Dialog handlers ---
    let on_close = move |()| {
        visible.set(false);
    };

    let on_commit = move |draft: MenuDraft| {
        tracing::info!(category = %category.peek().as_str(), name = %draft.name, "menu item ready to persist");
        last_created.set(Some(draft));
    };

    // --- Layout ---
    rsx! {
        div { class: "min-h-screen bg-(--bg) text-(--text) flex flex-col",
            header { class: "px-6 py-4 border-b border-(--border)",
                h1 { class: "text-2xl", "Menu" }
            }

            div { class: "flex-1 flex flex-col gap-4 p-6",
                for name in CATEGORIES.iter().copied() {
                    div { class: "flex items-center justify-between bg-[var(--surface)] rounded p-4",
                        span { class: "text-lg font-semibold", "{name}" }
                        button {
                            class: "px-4 py-2 bg-[var(--btn-primary)] hover:bg-[var(--btn-primary-hover)] rounded text-white font-medium transition-colors",
                            onclick: move |_| {
                                category.set(name.to_owned());
                                visible.set(true);
                            },
                            "Add menu"
                        }
                    }
                }

                if let Some(ref draft) = last_created() {
                    p { class: "text-(--muted) text-sm",
                        "Last created: {draft.name}"
                    }
                }
            }

            AddMenuModal {
                visible: visible(),
                menu_name: category(),
                on_close: on_close,
                on_commit: on_commit,
            }
        }
    }
}
