//! Rendered list of staged files.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdX;
use droplet_core::FileRow;

/// Props for the [`FileList`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileListProps {
    /// Rows to show, in selection order.
    rows: Vec<FileRow>,
    /// Called with a row's remove key when its remove button is clicked.
    on_remove: EventHandler<String>,
}

/// One entry per staged file with its size, any validation error, and
/// a remove button.
#[component]
pub fn FileList(props: FileListProps) -> Element {
    rsx! {
        ul { class: "mt-4 space-y-2",
            for row in props.rows {
                {render_row(row, props.on_remove)}
            }
        }
    }
}

fn render_row(row: FileRow, on_remove: EventHandler<String>) -> Element {
    let border = if row.is_rejected() {
        "border-[var(--error-border)]"
    } else {
        "border-[var(--border)]"
    };
    let label = row.label();
    let key = row.remove_key.clone();

    rsx! {
        li {
            class: "flex items-start justify-between gap-2 p-2 border rounded {border}",
            div {
                span { class: "text-[var(--text)]", "{label}" }
                if let Some(ref err) = row.error {
                    p { class: "text-[var(--text-error)] text-sm mt-1", "{err}" }
                }
            }
            button {
                class: "px-2 py-1 text-[var(--text-error)] cursor-pointer",
                aria_label: "Remove {row.name}",
                onclick: move |_| on_remove.call(key.clone()),
                Icon { icon: LdX, width: 16, height: 16 }
            }
        }
    }
}
