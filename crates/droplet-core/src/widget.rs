//! The upload widget: owned state plus the host-facing event interface.

use std::fmt;
use std::time::Duration;

use crate::config::WidgetConfig;
use crate::log::{self, Logger};
use crate::render::{RenderedList, render};
use crate::selection::SelectionSet;
use crate::transfer::{Notice, ProgressIndicator, SETTLE_DELAY, TransferReporter, TransferState};
use crate::types::SelectedFile;

/// Why a submit was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// Nothing is staged.
    #[error("no files selected")]
    NothingSelected,

    /// At least one staged file fails validation.
    #[error("{count} selected file(s) cannot be uploaded")]
    InvalidFiles {
        /// Number of rejected files.
        count: usize,
    },

    /// An earlier submit has not resolved yet.
    #[error("an upload is already in progress")]
    TransferInProgress,
}

/// Everything a transport needs to perform one upload.
///
/// Describes a single multipart POST of `files` to `endpoint`, each
/// appended under `field_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest<H> {
    /// Destination URL.
    pub endpoint: String,
    /// Multipart field every file is appended under.
    pub field_name: String,
    /// Files to send, in selection order.
    pub files: Vec<SelectedFile<H>>,
}

/// What the host must do once a transfer resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion<H> {
    /// The upload succeeded and the selection has been cleared.
    Succeeded {
        /// The files that were sent, for upload-complete listeners.
        submitted: Vec<SelectedFile<H>>,
        /// Element to close once `settle_after` has elapsed.
        dismiss_target: Option<String>,
        /// Delay before calling [`UploadWidget::settle`].
        settle_after: Duration,
    },
    /// The upload failed. The selection is untouched so the user can
    /// submit again without re-selecting.
    Failed {
        /// Delay before calling [`UploadWidget::settle`].
        settle_after: Duration,
    },
}

/// A drag-and-drop uploader's state, free of any environment access.
///
/// The host forwards user and transport events to the `on_*` methods
/// and draws whatever [`render`](Self::render),
/// [`indicator`](Self::indicator), and [`notice`](Self::notice)
/// report. Every method runs to completion synchronously; the only
/// asynchronous part, the transfer itself, is owned by the host.
pub struct UploadWidget<H> {
    config: WidgetConfig,
    selection: SelectionSet<H>,
    transfer: TransferReporter,
    /// Snapshot of the files handed to the transport by the last submit.
    in_flight: Vec<SelectedFile<H>>,
    logger: Box<dyn Logger>,
}

impl<H> fmt::Debug for UploadWidget<H>
where
    H: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadWidget")
            .field("config", &self.config)
            .field("selection", &self.selection)
            .field("transfer", &self.transfer)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl<H: Clone> UploadWidget<H> {
    /// Create an empty widget.
    ///
    /// Logs through `tracing` when `config.logging_enabled` is set and
    /// discards log lines otherwise. Use
    /// [`with_logger`](Self::with_logger) to inject a different sink.
    #[must_use]
    pub fn new(config: WidgetConfig) -> Self {
        let logger = log::for_flag(config.logging_enabled);
        Self {
            config,
            selection: SelectionSet::new(),
            transfer: TransferReporter::new(),
            in_flight: Vec::new(),
            logger,
        }
    }

    /// Replace the logger.
    #[must_use]
    pub fn with_logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Box::new(logger);
        self
    }

    /// The configuration captured at construction.
    #[must_use]
    pub const fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// The injected logger, for hosts reporting transport details.
    #[must_use]
    pub fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    /// Currently staged files in insertion order.
    #[must_use]
    pub fn selection(&self) -> &[SelectedFile<H>] {
        self.selection.list()
    }

    /// Render the current selection.
    #[must_use]
    pub fn render(&self) -> RenderedList {
        render(self.selection.list(), &self.config)
    }

    /// State of the current or most recent transfer.
    #[must_use]
    pub const fn transfer_state(&self) -> TransferState {
        self.transfer.state()
    }

    /// What the progress bar should show.
    #[must_use]
    pub const fn indicator(&self) -> ProgressIndicator {
        self.transfer.indicator()
    }

    /// Status line for the last resolved transfer. It stays after the
    /// settle delay and is cleared by the next submit.
    #[must_use]
    pub const fn notice(&self) -> Option<Notice> {
        self.transfer.notice()
    }

    /// Files were picked or dropped.
    pub fn on_files_added(
        &mut self,
        files: impl IntoIterator<Item = SelectedFile<H>>,
    ) -> RenderedList {
        let before = self.selection.len();
        self.selection.add(files);
        let list = self.render();
        self.logger.info(format_args!(
            "selection {before} -> {} file(s), {} rejected",
            list.rows.len(),
            list.rejected_count()
        ));
        list
    }

    /// A row's remove control was clicked.
    pub fn on_file_removed(&mut self, name: &str) -> RenderedList {
        if self.selection.remove(name) {
            self.logger.info(format_args!("removed {name:?}"));
        } else {
            self.logger
                .warn(format_args!("remove ignored, {name:?} is not selected"));
        }
        self.render()
    }

    /// The submit control was clicked.
    ///
    /// On success the transfer enters `InProgress(0)` and the returned
    /// request must be handed to the transport.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::TransferInProgress`] if an earlier submit
    /// has not resolved, [`SubmitError::NothingSelected`] if the
    /// selection is empty, and [`SubmitError::InvalidFiles`] if any
    /// staged file fails validation. State is unchanged on error.
    pub fn on_submit(&mut self) -> Result<SubmitRequest<H>, SubmitError> {
        let result = self.check_submittable();
        if let Err(e) = result {
            self.logger.warn(format_args!("submit refused: {e}"));
            return Err(e);
        }

        self.transfer.begin();
        self.in_flight = self.selection.list().to_vec();
        self.logger.info(format_args!(
            "submitting {} file(s) to {}",
            self.in_flight.len(),
            self.config.upload_url
        ));

        Ok(SubmitRequest {
            endpoint: self.config.upload_url.clone(),
            field_name: self.config.file_field_name.clone(),
            files: self.in_flight.clone(),
        })
    }

    /// The transport reported `loaded` of `total` bytes sent.
    ///
    /// Ignored outside a transfer.
    pub fn on_progress(&mut self, loaded: u64, total: u64) -> ProgressIndicator {
        if self.transfer.progress(loaded, total).is_none() {
            self.logger.warn(format_args!(
                "progress {loaded}/{total} ignored, no upload in progress"
            ));
        }
        self.transfer.indicator()
    }

    /// The transport reported the terminal outcome.
    ///
    /// Returns `None` if no transfer was running.
    pub fn on_complete(&mut self, successful: bool) -> Option<Completion<H>> {
        let Some(state) = self.transfer.complete(successful) else {
            self.logger
                .warn(format_args!("completion ignored, no upload in progress"));
            return None;
        };
        let submitted = std::mem::take(&mut self.in_flight);

        if state == TransferState::Succeeded {
            self.selection.clear();
            self.logger
                .info(format_args!("upload of {} file(s) succeeded", submitted.len()));
            Some(Completion::Succeeded {
                submitted,
                dismiss_target: self.config.dismiss_target_id.clone(),
                settle_after: SETTLE_DELAY,
            })
        } else {
            self.logger.warn(format_args!(
                "upload of {} file(s) failed, selection kept",
                submitted.len()
            ));
            Some(Completion::Failed {
                settle_after: SETTLE_DELAY,
            })
        }
    }

    /// The settle delay after a terminal notification has elapsed.
    ///
    /// Returns `true` if the display changed.
    pub fn settle(&mut self) -> bool {
        let changed = self.transfer.settle();
        if changed {
            self.logger.info(format_args!("transfer display settled"));
        }
        changed
    }

    fn check_submittable(&self) -> Result<(), SubmitError> {
        if self.transfer.state().is_in_progress() {
            return Err(SubmitError::TransferInProgress);
        }
        if self.selection.is_empty() {
            return Err(SubmitError::NothingSelected);
        }
        let list = self.render();
        if !list.submit_enabled {
            return Err(SubmitError::InvalidFiles {
                count: list.rejected_count(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::log::testing::RecordingLogger;

    fn config() -> WidgetConfig {
        WidgetConfig::new("/api/upload")
            .with_allowed_types(["application/pdf", "image/png"])
            .with_max_file_size(1_048_576)
    }

    fn pdf(name: &str) -> SelectedFile<u32> {
        SelectedFile::new(name, "application/pdf", 2048, 0)
    }

    fn exe() -> SelectedFile<u32> {
        SelectedFile::new("b.exe", "application/octet-stream", 10, 0)
    }

    #[test]
    fn submit_refused_when_empty() {
        let mut widget = UploadWidget::<u32>::new(config());
        assert_eq!(widget.on_submit(), Err(SubmitError::NothingSelected));
        assert_eq!(widget.transfer_state(), TransferState::Idle);
    }

    #[test]
    fn submit_refused_with_invalid_file() {
        let mut widget = UploadWidget::new(config());
        widget.on_files_added([pdf("a.pdf"), exe()]);

        assert_eq!(
            widget.on_submit(),
            Err(SubmitError::InvalidFiles { count: 1 })
        );
        assert!(!widget.indicator().visible);
    }

    #[test]
    fn submit_builds_request_and_starts_transfer() {
        let mut widget = UploadWidget::new(config().with_file_field_name("docs"));
        widget.on_files_added([pdf("a.pdf"), pdf("b.pdf")]);

        let request = widget.on_submit().unwrap();
        assert_eq!(request.endpoint, "/api/upload");
        assert_eq!(request.field_name, "docs");
        assert_eq!(request.files.len(), 2);
        assert_eq!(
            widget.transfer_state(),
            TransferState::InProgress { percent: 0.0 }
        );
        assert!(widget.indicator().visible);
    }

    #[test]
    fn second_submit_refused_while_in_flight() {
        let mut widget = UploadWidget::new(config());
        widget.on_files_added([pdf("a.pdf")]);
        widget.on_submit().unwrap();
        assert_eq!(widget.on_submit(), Err(SubmitError::TransferInProgress));
    }

    #[test]
    fn failure_keeps_selection_for_retry() {
        let mut widget = UploadWidget::new(config());
        widget.on_files_added([pdf("a.pdf")]);
        widget.on_submit().unwrap();

        let completion = widget.on_complete(false).unwrap();
        assert_eq!(
            completion,
            Completion::Failed {
                settle_after: SETTLE_DELAY
            }
        );
        assert_eq!(widget.selection().len(), 1);
        assert!(widget.render().submit_enabled);
        assert_eq!(widget.notice(), Some(Notice::Failure));

        // The user can retry without re-selecting.
        assert!(widget.on_submit().is_ok());
    }

    #[test]
    fn success_reports_submitted_files_not_later_additions() {
        let mut widget = UploadWidget::new(config().with_dismiss_target("dialog"));
        widget.on_files_added([pdf("a.pdf")]);
        widget.on_submit().unwrap();
        widget.on_files_added([pdf("late.pdf")]);

        let Some(Completion::Succeeded {
            submitted,
            dismiss_target,
            settle_after,
        }) = widget.on_complete(true)
        else {
            panic!("expected success");
        };
        let names: Vec<_> = submitted.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a.pdf"]);
        assert_eq!(dismiss_target.as_deref(), Some("dialog"));
        assert_eq!(settle_after, SETTLE_DELAY);
        assert!(widget.selection().is_empty());
    }

    #[test]
    fn stray_notifications_are_ignored() {
        let mut widget = UploadWidget::<u32>::new(config());
        assert!(!widget.on_progress(1, 2).visible);
        assert_eq!(widget.on_complete(true), None);
        assert_eq!(widget.transfer_state(), TransferState::Idle);
    }

    #[test]
    fn settle_returns_to_idle_after_success() {
        let mut widget = UploadWidget::new(config());
        widget.on_files_added([pdf("a.pdf")]);
        widget.on_submit().unwrap();
        widget.on_complete(true);

        assert!(widget.settle());
        assert_eq!(widget.transfer_state(), TransferState::Idle);
        assert_eq!(widget.notice(), Some(Notice::Success));

        // The next batch's submit clears the old status line.
        widget.on_files_added([pdf("b.pdf")]);
        widget.on_submit().unwrap();
        assert_eq!(widget.notice(), None);
    }

    #[test]
    fn logs_through_injected_logger() {
        let logger = RecordingLogger::default();
        let mut widget = UploadWidget::new(config()).with_logger(logger.clone());

        widget.on_files_added([pdf("a.pdf"), exe()]);
        widget.on_file_removed("missing.txt");
        let _ = widget.on_submit();

        let lines = logger.lines();
        assert_eq!(
            lines,
            [
                "INFO selection 0 -> 2 file(s), 1 rejected",
                "WARN remove ignored, \"missing.txt\" is not selected",
                "WARN submit refused: 1 selected file(s) cannot be uploaded",
            ]
        );
    }
}
