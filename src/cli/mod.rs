pub mod convert;
pub mod list;
pub mod rates;
pub mod ui;

use crate::core::rates::{DegradedReason, FALLBACK_SNAPSHOT_DATE, RateSource, RateState};

/// One-line descriptor of where the current rate table came from. `None`
/// until the store has been refreshed at least once.
fn status_line(state: &RateState) -> Option<String> {
    match state.source? {
        RateSource::Live(date) => Some(ui::style_text(
            &format!("Updated: {date}"),
            ui::StyleType::Subtle,
        )),
        RateSource::FallbackSnapshot => {
            let hint = match state.degraded {
                Some(DegradedReason::Connectivity) => "check your internet connection",
                _ => "the rate service returned an unexpected response",
            };
            Some(ui::style_text(
                &format!("Fallback snapshot {FALLBACK_SNAPSHOT_DATE} ({hint})"),
                ui::StyleType::Error,
            ))
        }
    }
}
