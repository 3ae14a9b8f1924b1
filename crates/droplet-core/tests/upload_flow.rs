//! Integration test: drive the widget through full select -> submit -> resolve cycles
//! the way a browser host would.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use droplet_core::{
    Completion, NoopLogger, Notice, SETTLE_DELAY, SelectedFile, TransferState, UploadWidget,
    WidgetConfig,
};

/// Stand-in for a browser file handle.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Handle(u32);

fn mounted_config() -> WidgetConfig {
    WidgetConfig::from_attributes([
        ("allowed-types", "application/pdf,image/png"),
        ("max-file-size", "5242880"),
        ("upload-url", "/api/upload"),
        ("modal-id", "upload-modal"),
    ])
    .expect("mount attributes should parse")
}

#[test]
fn valid_pdf_uploads_and_resets() {
    let mut widget = UploadWidget::new(mounted_config()).with_logger(NoopLogger);

    // Pick one allowed file under the size limit.
    let list = widget.on_files_added([SelectedFile::new(
        "a.pdf",
        "application/pdf",
        1536,
        Handle(1),
    )]);
    assert_eq!(list.rows.len(), 1);
    assert_eq!(list.rows[0].label(), "a.pdf (1.5 KB)");
    assert_eq!(list.rows[0].error, None);
    assert!(list.submit_enabled);

    // Submit hands the transport exactly the staged file.
    let request = widget.on_submit().unwrap();
    assert_eq!(request.endpoint, "/api/upload");
    assert_eq!(request.field_name, "files");
    assert_eq!(request.files[0].handle, Handle(1));
    assert!(widget.indicator().visible);

    // Progress rises with each notification.
    let mut last = 0.0;
    for (loaded, total) in [(0, 1536), (512, 1536), (1024, 1536), (1536, 1536)] {
        let indicator = widget.on_progress(loaded, total);
        assert!(indicator.visible);
        assert!(indicator.percent >= last, "progress went backwards");
        last = indicator.percent;
    }
    assert!((last - 100.0).abs() < f64::EPSILON);

    // Success clears the list, disables submit, and asks for the dismiss.
    let Some(Completion::Succeeded {
        submitted,
        dismiss_target,
        settle_after,
    }) = widget.on_complete(true)
    else {
        panic!("expected a successful completion");
    };
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].summary().name, "a.pdf");
    assert_eq!(dismiss_target.as_deref(), Some("upload-modal"));
    assert_eq!(settle_after, SETTLE_DELAY);

    let list = widget.render();
    assert!(list.is_empty());
    assert!(!list.submit_enabled);
    assert!(!widget.indicator().visible);

    // After the settle delay the widget is ready for the next batch.
    widget.settle();
    assert_eq!(widget.transfer_state(), TransferState::Idle);
    assert_eq!(widget.notice(), Some(Notice::Success));
}

#[test]
fn disallowed_type_blocks_submit_even_with_valid_file() {
    let mut widget = UploadWidget::new(mounted_config());

    let list = widget.on_files_added([
        SelectedFile::new("b.exe", "application/octet-stream", 100, Handle(2)),
        SelectedFile::new("a.pdf", "application/pdf", 100, Handle(3)),
    ]);
    assert_eq!(
        list.rows[0].error.as_deref(),
        Some("File type application/octet-stream is not allowed.")
    );
    assert_eq!(list.rows[1].error, None);
    assert!(!list.submit_enabled);
    assert!(widget.on_submit().is_err());

    // Removing the offender re-enables submit.
    let list = widget.on_file_removed("b.exe");
    assert_eq!(list.rows.len(), 1);
    assert!(list.submit_enabled);
}

#[test]
fn zero_total_progress_holds_at_zero() {
    let mut widget = UploadWidget::new(mounted_config());
    widget.on_files_added([SelectedFile::new("a.pdf", "application/pdf", 0, Handle(4))]);
    widget.on_submit().unwrap();

    let indicator = widget.on_progress(0, 0);
    assert!(indicator.visible);
    assert!(indicator.percent.abs() < f64::EPSILON);

    let indicator = widget.on_progress(50, 200);
    assert!((indicator.percent - 25.0).abs() < f64::EPSILON);
}

#[test]
fn terminal_without_progress_is_fine() {
    let mut widget = UploadWidget::new(mounted_config());
    widget.on_files_added([SelectedFile::new("a.png", "image/png", 10, Handle(5))]);
    widget.on_submit().unwrap();

    assert!(matches!(
        widget.on_complete(true),
        Some(Completion::Succeeded { .. })
    ));
}

#[test]
fn reselecting_same_name_replaces_entry() {
    let mut widget = UploadWidget::new(mounted_config());
    widget.on_files_added([SelectedFile::new("a.pdf", "application/pdf", 10, Handle(6))]);
    let list = widget.on_files_added([SelectedFile::new(
        "a.pdf",
        "application/pdf",
        20_000_000,
        Handle(7),
    )]);

    assert_eq!(list.rows.len(), 1);
    assert_eq!(
        list.rows[0].error.as_deref(),
        Some("File size 19.07 MB exceeds maximum size of 5 MB")
    );
    assert_eq!(widget.selection()[0].handle, Handle(7));
}

#[test]
fn render_is_stable_between_events() {
    let mut widget = UploadWidget::new(mounted_config());
    widget.on_files_added([
        SelectedFile::new("a.pdf", "application/pdf", 10, Handle(8)),
        SelectedFile::new("c.gif", "image/gif", 10, Handle(9)),
    ]);
    assert_eq!(widget.render(), widget.render());
}
