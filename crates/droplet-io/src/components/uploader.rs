//! Drag-and-drop uploader component.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdUpload;
use droplet_core::{Completion, FileSummary, SelectedFile, UploadWidget, WidgetConfig};

use super::{FileList, ProgressBar};
use crate::{dismiss, events, transport};

/// Props for the [`FileUploader`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileUploaderProps {
    /// Configuration captured when the component mounts. Later changes
    /// are not observed.
    config: WidgetConfig,
    /// Id of the host element that receives the `upload-complete` DOM
    /// event.
    event_target_id: String,
    /// Called with the submitted files after a successful upload.
    on_upload_complete: EventHandler<Vec<FileSummary>>,
}

/// Wrap a browser file as a staged file.
fn stage(file: FileData) -> SelectedFile<FileData> {
    let name = file.name();
    let mime_type = file.content_type().unwrap_or_default();
    let size = file.size();
    SelectedFile::new(name, mime_type, size, file)
}

/// Convert the settle delay to a timer duration.
fn timeout_ms(delay: std::time::Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

/// A drop zone with a file picker, the staged file list, a progress
/// bar, and an upload button.
///
/// Files can be dropped onto the zone or picked by clicking it. Every
/// staged file is listed with its size and, if it fails validation, the
/// reason; the upload button stays disabled until all listed files are
/// valid. Clicking it posts every file in one multipart request.
#[component]
pub fn FileUploader(props: FileUploaderProps) -> Element {
    let config = props.config.clone();
    let mut widget = use_signal(move || UploadWidget::<FileData>::new(config));
    let mut dragging = use_signal(|| false);

    let accept = props
        .config
        .allowed_mime_types
        .as_ref()
        .map(|types| types.iter().cloned().collect::<Vec<_>>().join(","))
        .unwrap_or_default();

    // Shared by the file-picker (`handle_files`) and drag-and-drop
    // (`handle_drop`) paths.
    let mut add_files = move |files: Vec<FileData>| {
        if files.is_empty() {
            return;
        }
        widget.write().on_files_added(files.into_iter().map(stage));
    };

    let handle_files = move |evt: FormEvent| {
        add_files(evt.files());
    };

    let handle_drop = move |evt: DragEvent| {
        evt.prevent_default();
        dragging.set(false);
        add_files(evt.files());
    };

    let handle_remove = move |name: String| {
        widget.write().on_file_removed(&name);
    };

    let handle_submit = {
        let event_target_id = props.event_target_id.clone();
        let on_upload_complete = props.on_upload_complete;
        move |_| {
            let Ok(request) = widget.write().on_submit() else {
                // Refusals are logged by the widget and the button state
                // already reflects them.
                return;
            };
            let event_target_id = event_target_id.clone();

            spawn(async move {
                let outcome = transport::send(&request, move |loaded, total| {
                    widget.write().on_progress(loaded, total);
                })
                .await;

                if let Err(ref e) = outcome {
                    widget
                        .read()
                        .logger()
                        .warn(format_args!("upload transport failed: {e}"));
                }

                let completion = widget.write().on_complete(outcome.is_ok());
                match completion {
                    Some(Completion::Succeeded {
                        submitted,
                        dismiss_target,
                        settle_after,
                    }) => {
                        let files: Vec<FileSummary> =
                            submitted.iter().map(SelectedFile::summary).collect();
                        if let Err(e) = events::emit_upload_complete(&event_target_id, &files) {
                            widget.read().logger().warn(format_args!("{e}"));
                        }
                        on_upload_complete.call(files);

                        gloo_timers::future::TimeoutFuture::new(timeout_ms(settle_after)).await;
                        widget.write().settle();

                        if let Some(id) = dismiss_target
                            && let Err(e) = dismiss::dismiss(&id)
                        {
                            widget.read().logger().warn(format_args!("{e}"));
                        }
                    }
                    Some(Completion::Failed { settle_after }) => {
                        gloo_timers::future::TimeoutFuture::new(timeout_ms(settle_after)).await;
                        widget.write().settle();
                    }
                    None => {}
                }
            });
        }
    };

    let (list, indicator, notice, busy) = {
        let w = widget.read();
        (
            w.render(),
            w.indicator(),
            w.notice(),
            w.transfer_state().is_in_progress(),
        )
    };
    let can_submit = list.submit_enabled && !busy;

    let zone_class = if dragging() {
        "border-[var(--border-accent)] bg-[var(--surface-active)]"
    } else {
        "border-[var(--border-muted)] bg-[var(--surface)]"
    };
    let button_class = if can_submit {
        "mt-4 px-4 py-2 bg-[var(--btn-primary)] hover:bg-[var(--btn-primary-hover)] rounded text-white font-medium transition-colors cursor-pointer"
    } else {
        "mt-4 px-4 py-2 bg-[var(--btn-disabled)] rounded text-[var(--text-disabled)] cursor-not-allowed"
    };

    rsx! {
        div { class: "max-w-2xl mx-auto",
            label {
                class: "block border-2 border-dashed rounded-lg p-8 text-center cursor-pointer transition-colors {zone_class}",
                ondragover: move |evt| {
                    evt.prevent_default();
                    dragging.set(true);
                },
                ondragleave: move |_| {
                    dragging.set(false);
                },
                ondrop: handle_drop,

                div { class: "mx-auto w-12 h-12 text-[var(--muted)]",
                    Icon { icon: LdUpload, width: 48, height: 48 }
                }
                p { class: "text-[var(--text)]", "Drop files here or click to upload" }
                p { class: "text-[var(--text-secondary)] text-sm",
                    "Drag and drop your files anywhere or click to browse"
                }
                input {
                    r#type: "file",
                    multiple: true,
                    accept: "{accept}",
                    class: "hidden",
                    onchange: handle_files,
                }
            }

            ProgressBar { indicator }

            FileList { rows: list.rows, on_remove: handle_remove }

            button {
                class: "{button_class}",
                disabled: !can_submit,
                onclick: handle_submit,
                "Upload Files"
            }

            if let Some(notice) = notice {
                p {
                    class: if notice.is_error() { "mt-2 text-[var(--text-error)]" } else { "mt-2 text-[var(--text-success)]" },
                    role: "status",
                    "{notice.message()}"
                }
            }
        }
    }
}
