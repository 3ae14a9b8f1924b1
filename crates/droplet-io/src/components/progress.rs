//! Determinate upload progress bar.

use dioxus::prelude::*;
use droplet_core::ProgressIndicator;

/// Props for the [`ProgressBar`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ProgressBarProps {
    /// What the bar should show.
    indicator: ProgressIndicator,
}

/// A labelled bar whose fill tracks upload progress.
///
/// Renders nothing while the indicator is hidden.
#[component]
pub fn ProgressBar(props: ProgressBarProps) -> Element {
    let indicator = props.indicator;
    if !indicator.visible {
        return rsx! {};
    }

    let percent = indicator.percent.clamp(0.0, 100.0);

    rsx! {
        div { class: "mt-4",
            div { class: "text-sm text-[var(--text-secondary)]", "Uploading" }
            div {
                class: "w-full h-2 mt-2 rounded overflow-hidden bg-[var(--track)]",
                role: "progressbar",
                "aria-valuemin": "0",
                "aria-valuemax": "100",
                "aria-valuenow": "{percent:.0}",
                div {
                    class: "h-full bg-[var(--btn-primary)] transition-[width] duration-300",
                    style: "width: {percent}%",
                }
            }
        }
    }
}
