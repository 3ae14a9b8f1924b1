//! Transfer reporting: upload progress and outcome as a state machine.
//!
//! The transfer itself is driven by an external transport. The reporter
//! only observes it through two notification points, progress
//! `(loaded, total)` and a single terminal success/failure, and turns
//! them into a [`TransferState`] plus what the progress bar and status
//! line should show.
//!
//! ```text
//!  Idle ──begin──▶ InProgress(0) ──progress──▶ InProgress(p)
//!                       │                          │
//!                       └──────────complete────────┤
//!                                                  ▼
//!                                     Succeeded ─settle─▶ Idle
//!                                     Failed
//! ```
//!
//! `Failed` is terminal for the attempt. A later `begin` starts a
//! fresh attempt from either terminal state. The status line of a
//! resolved attempt outlives the settle and is cleared only by that
//! next `begin`.

use std::time::Duration;

/// Pause after a terminal notification before the progress bar resets
/// and the dismiss target closes, so the completion animation can
/// finish.
pub const SETTLE_DELAY: Duration = Duration::from_millis(1000);

/// Lifecycle of one upload attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum TransferState {
    /// No upload has been started, or the last success has settled.
    #[default]
    Idle,
    /// An upload is running.
    InProgress {
        /// Completion in percent, `0.0..=100.0`.
        percent: f64,
    },
    /// The last upload finished successfully and has not settled yet.
    Succeeded,
    /// The last upload failed.
    Failed,
}

impl TransferState {
    /// Returns `true` while an upload is running.
    #[must_use]
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::InProgress { .. })
    }
}

/// What the determinate progress indicator should show.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProgressIndicator {
    /// Whether the indicator is displayed at all.
    pub visible: bool,
    /// Bar fill in percent, `0.0..=100.0`.
    pub percent: f64,
}

/// Status line shown after an upload attempt resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The upload succeeded.
    Success,
    /// The upload failed. Carries no detail: the transport's error is
    /// not surfaced to the user.
    Failure,
}

impl Notice {
    /// User-facing message for this notice.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Success => "Upload completed successfully!",
            Self::Failure => "Upload failed. Please try again.",
        }
    }

    /// Returns `true` for notices that should be styled as errors.
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Failure)
    }
}

/// Map transport byte counts to a completion percentage.
///
/// Holds at `0.0` when `total` is zero (nothing to divide by) and caps
/// at `100.0` if a transport over-reports `loaded`.
#[must_use]
pub fn percent_complete(loaded: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)] // percentages only need ~2 significant digits
    let percent = loaded as f64 / total as f64 * 100.0;
    percent.min(100.0)
}

/// Tracks one transfer at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferReporter {
    state: TransferState,
    /// Bar position held on screen after a failure until the host settles.
    held: Option<f64>,
    /// Status line of the last resolved attempt.
    notice: Option<Notice>,
}

impl TransferReporter {
    /// Create an idle reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> TransferState {
        self.state
    }

    /// Start a new attempt at 0%.
    ///
    /// Returns `false` (and changes nothing) if an attempt is already
    /// running.
    pub const fn begin(&mut self) -> bool {
        if self.state.is_in_progress() {
            return false;
        }
        self.state = TransferState::InProgress { percent: 0.0 };
        self.held = None;
        self.notice = None;
        true
    }

    /// Record a progress notification.
    ///
    /// Returns the new percentage, or `None` if no attempt is running
    /// (late or stray notifications are ignored). Monotonicity is not
    /// enforced: the transport's numbers are taken as reported.
    pub fn progress(&mut self, loaded: u64, total: u64) -> Option<f64> {
        if !self.state.is_in_progress() {
            return None;
        }
        let percent = percent_complete(loaded, total);
        self.state = TransferState::InProgress { percent };
        Some(percent)
    }

    /// Record the terminal notification.
    ///
    /// Returns the resulting terminal state, or `None` if no attempt was
    /// running.
    pub const fn complete(&mut self, successful: bool) -> Option<TransferState> {
        let TransferState::InProgress { percent } = self.state else {
            return None;
        };
        self.state = if successful {
            self.notice = Some(Notice::Success);
            TransferState::Succeeded
        } else {
            self.held = Some(percent);
            self.notice = Some(Notice::Failure);
            TransferState::Failed
        };
        Some(self.state)
    }

    /// Apply the post-settle-delay reset.
    ///
    /// `Succeeded` returns to `Idle`; a failed attempt stays `Failed`
    /// but its progress bar is hidden. The notice is left alone. Returns
    /// `true` if anything changed.
    pub const fn settle(&mut self) -> bool {
        match self.state {
            TransferState::Succeeded => {
                self.state = TransferState::Idle;
                true
            }
            TransferState::Failed if self.held.is_some() => {
                self.held = None;
                true
            }
            _ => false,
        }
    }

    /// What the progress indicator should show.
    #[must_use]
    pub const fn indicator(&self) -> ProgressIndicator {
        match self.state {
            TransferState::InProgress { percent } => ProgressIndicator {
                visible: true,
                percent,
            },
            TransferState::Failed => match self.held {
                Some(percent) => ProgressIndicator {
                    visible: true,
                    percent,
                },
                None => ProgressIndicator {
                    visible: false,
                    percent: 0.0,
                },
            },
            _ => ProgressIndicator {
                visible: false,
                percent: 0.0,
            },
        }
    }

    /// Status line for the last resolved attempt, if any.
    #[must_use]
    pub const fn notice(&self) -> Option<Notice> {
        self.notice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_maps_loaded_over_total() {
        assert!((percent_complete(50, 200) - 25.0).abs() < f64::EPSILON);
        assert!((percent_complete(200, 200) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn percent_holds_at_zero_for_zero_total() {
        assert!(percent_complete(0, 0).abs() < f64::EPSILON);
        assert!(percent_complete(10, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn percent_caps_at_hundred() {
        assert!((percent_complete(300, 200) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn begin_shows_indicator_at_zero() {
        let mut reporter = TransferReporter::new();
        assert!(!reporter.indicator().visible);

        assert!(reporter.begin());
        assert_eq!(reporter.state(), TransferState::InProgress { percent: 0.0 });
        assert_eq!(
            reporter.indicator(),
            ProgressIndicator {
                visible: true,
                percent: 0.0
            }
        );
    }

    #[test]
    fn begin_refused_while_running() {
        let mut reporter = TransferReporter::new();
        reporter.begin();
        reporter.progress(5, 10);
        assert!(!reporter.begin());
        assert_eq!(reporter.state(), TransferState::InProgress { percent: 50.0 });
    }

    #[test]
    fn progress_ignored_when_idle() {
        let mut reporter = TransferReporter::new();
        assert_eq!(reporter.progress(1, 2), None);
        assert_eq!(reporter.state(), TransferState::Idle);
    }

    #[test]
    fn progress_is_not_forced_monotonic() {
        let mut reporter = TransferReporter::new();
        reporter.begin();
        reporter.progress(80, 100);
        assert_eq!(reporter.progress(40, 100), Some(40.0));
    }

    #[test]
    fn success_hides_indicator_then_settles_to_idle() {
        let mut reporter = TransferReporter::new();
        reporter.begin();
        reporter.progress(100, 100);

        assert_eq!(reporter.complete(true), Some(TransferState::Succeeded));
        assert!(!reporter.indicator().visible);
        assert_eq!(reporter.notice(), Some(Notice::Success));

        assert!(reporter.settle());
        assert_eq!(reporter.state(), TransferState::Idle);
        assert!(!reporter.settle());
    }

    #[test]
    fn success_notice_outlives_settle_until_next_begin() {
        let mut reporter = TransferReporter::new();
        reporter.begin();
        reporter.complete(true);
        reporter.settle();

        assert_eq!(reporter.state(), TransferState::Idle);
        assert_eq!(reporter.notice(), Some(Notice::Success));

        assert!(reporter.begin());
        assert_eq!(reporter.notice(), None);
    }

    #[test]
    fn failure_is_terminal_and_hides_bar_on_settle() {
        let mut reporter = TransferReporter::new();
        reporter.begin();
        reporter.progress(30, 100);

        assert_eq!(reporter.complete(false), Some(TransferState::Failed));
        assert_eq!(reporter.notice(), Some(Notice::Failure));
        assert_eq!(
            reporter.indicator(),
            ProgressIndicator {
                visible: true,
                percent: 30.0
            }
        );

        assert!(reporter.settle());
        assert_eq!(reporter.state(), TransferState::Failed);
        assert!(!reporter.indicator().visible);
        assert_eq!(reporter.notice(), Some(Notice::Failure));
    }

    #[test]
    fn complete_without_begin_is_ignored() {
        let mut reporter = TransferReporter::new();
        assert_eq!(reporter.complete(true), None);
        assert_eq!(reporter.state(), TransferState::Idle);
    }

    #[test]
    fn retry_after_failure_starts_fresh() {
        let mut reporter = TransferReporter::new();
        reporter.begin();
        reporter.complete(false);

        assert!(reporter.begin());
        assert_eq!(reporter.notice(), None);
        assert!(reporter.indicator().percent.abs() < f64::EPSILON);
    }

    #[test]
    fn notice_messages() {
        assert_eq!(Notice::Success.message(), "Upload completed successfully!");
        assert_eq!(Notice::Failure.message(), "Upload failed. Please try again.");
        assert!(Notice::Failure.is_error());
        assert!(!Notice::Success.is_error());
    }
}
