use dioxus::prelude::*;
use droplet_core::FileSummary;
use droplet_io::{FileUploader, mount};

/// Id of the host element carrying the uploader's configuration
/// attributes. It also receives the `upload-complete` DOM event.
const MOUNT_ID: &str = "droplet";

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// Reads the uploader configuration from the host page once, then
/// mounts the uploader and keeps a running list of uploaded files so
/// the page reflects each successful upload.
fn app() -> Element {
    let config = use_hook(|| mount::read_config(MOUNT_ID));
    let mut uploaded = use_signal(Vec::<FileSummary>::new);

    let on_upload_complete = move |files: Vec<FileSummary>| {
        uploaded.write().extend(files);
    };

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            // A misconfigured host page should be obvious, not an inert widget.
            return rsx! {
                div { class: "bg-(--error-bg) border border-(--error-border) rounded p-3",
                    p { class: "text-(--text-error) text-sm", "{e}" }
                }
            };
        }
    };

    rsx! {
        div { class: "p-6 flex flex-col gap-6",
            FileUploader {
                config,
                event_target_id: MOUNT_ID.to_owned(),
                on_upload_complete,
            }

            if !uploaded().is_empty() {
                div {
                    h3 { class: "text-sm font-semibold text-[var(--text-heading)] mb-2",
                        "Uploaded"
                    }
                    ul { class: "text-sm text-(--text-secondary)",
                        for file in uploaded() {
                            li { "{file.name}" }
                        }
                    }
                }
            }
        }
    }
}
