//! Injected logging capability.
//!
//! The widget logs through whatever [`Logger`] its host hands it at
//! construction. [`NoopLogger`] is the default; [`TracingLogger`]
//! forwards to `tracing` under the `droplet` target.

use std::fmt;

/// Sink for widget log lines.
pub trait Logger {
    /// Record routine activity.
    fn info(&self, args: fmt::Arguments<'_>);

    /// Record something the host may want to look at.
    fn warn(&self, args: fmt::Arguments<'_>);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn info(&self, _args: fmt::Arguments<'_>) {}

    fn warn(&self, _args: fmt::Arguments<'_>) {}
}

/// Forwards to the `tracing` macros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!(target: "droplet", "{args}");
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(target: "droplet", "{args}");
    }
}

/// Pick the logger matching a `logging_enabled` flag.
#[must_use]
pub fn for_flag(enabled: bool) -> Box<dyn Logger> {
    if enabled {
        Box::new(TracingLogger)
    } else {
        Box::new(NoopLogger)
    }
}
