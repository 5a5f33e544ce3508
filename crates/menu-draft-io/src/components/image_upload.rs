//! Image upload tile with drag-and-drop and file picker.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use menu_draft::Preview;

use crate::file::BrowserFile;

/// Props for the [`ImageUpload`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ImageUploadProps {
    /// Current preview, shown in place of the placeholder once set.
    preview: Option<Preview>,
    /// Whether the newest selection is still being read.
    #[props(default)]
    loading: bool,
    /// Warnings from the last selection, one per line.
    #[props(default)]
    warnings: Vec<String>,
    /// Hint for the browser file dialog. Validation happens elsewhere.
    #[props(default = "image/*".to_string())]
    accept: String,
    /// Called with the first picked or dropped file.
    on_select: EventHandler<BrowserFile>,
}

/// A square tile that opens the file picker when clicked and accepts
/// dropped files.
///
/// The tile does not validate anything itself: every file goes to
/// `on_select`, and the caller decides what to show via `preview`,
/// `loading`, and `warnings`.
#[component]
pub fn ImageUpload(props: ImageUploadProps) -> Element {
    let mut dragging = use_signal(|| false);

    // Shared by the file-picker and drag-and-drop paths.
    let forward_first = move |files: Vec<FileData>| {
        if let Some(file) = files.into_iter().next() {
            props.on_select.call(BrowserFile::new(file));
        }
    };

    let handle_files = move |evt: FormEvent| {
        forward_first(evt.files());
    };

    let handle_drop = move |evt: DragEvent| {
        evt.prevent_default();
        dragging.set(false);
        forward_first(evt.files());
    };

    let background = if props.preview.is_some() {
        "bg-transparent"
    } else if dragging() {
        "bg-[var(--surface-active)]"
    } else {
        "bg-[var(--surface-muted)]"
    };

    rsx! {
        div { class: "flex flex-col gap-2",
            label {
                r#for: "menu-image-input",
                class: "w-[201px] h-[201px] border-2 border-[var(--border-accent)] flex flex-col justify-center items-center cursor-pointer overflow-hidden {background}",
                ondragover: move |evt| {
                    evt.prevent_default();
                    dragging.set(true);
                },
                ondragleave: move |_| {
                    dragging.set(false);
                },
                ondrop: handle_drop,

                if props.loading {
                    p { class: "text-[var(--text-secondary)] animate-pulse", "Loading..." }
                } else if let Some(ref preview) = props.preview {
                    img {
                        src: preview.as_str(),
                        alt: "menu image",
                        class: "w-full h-full object-cover",
                    }
                } else {
                    p { class: "text-[40px] font-bold text-[var(--text-accent)]", "Add image" }
                }

                input {
                    r#type: "file",
                    id: "menu-image-input",
                    accept: "{props.accept}",
                    class: "hidden",
                    onchange: handle_files,
                }
            }

            for warning in props.warnings.iter() {
                p { class: "text-[var(--text-error)] text-sm", "{warning}" }
            }
        }
    }
}
