//! Human-readable file size formatting.

/// Unit labels in ascending base-1024 order.
const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Scaling factor between adjacent units.
const STEP: u64 = 1024;

/// Format a byte count for display, e.g. `1536` -> `"1.5 KB"`.
///
/// Scales by powers of 1024 through `Bytes`, `KB`, `MB`, `GB`. The unit
/// is `floor(log1024(bytes))`, clamped to `GB` for anything larger.
/// The value is rounded to two decimal places with trailing zeros
/// dropped, so whole numbers print without a fractional part
/// (`1024` -> `"1 KB"`).
///
/// The unit index is computed with integer comparisons rather than
/// floating-point logarithms so exact powers of 1024 never land one
/// unit short.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }

    let mut unit = 0;
    let mut divisor = 1_u64;
    while unit + 1 < UNITS.len() && bytes / divisor >= STEP {
        divisor *= STEP;
        unit += 1;
    }

    #[allow(clippy::cast_precision_loss)] // display only; two decimals survive
    let value = bytes as f64 / divisor as f64;
    let rounded = (value * 100.0).round() / 100.0;

    format!("{rounded} {}", UNITS[unit])
}
