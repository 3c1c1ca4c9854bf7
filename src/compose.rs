//! Reactive composer
//!
//! Turns a snapshot of every control into the ordered list of charts to
//! display. Called on each control change; holds no state between calls.

use crate::charts::{build_bar, build_map, build_view};
use crate::core::{ChartSpec, Color, Composition};
use crate::dataset::Dataset;
use crate::variant::{UiState, Variant};
use crate::view::resolve;

pub const NO_SELECTION_MESSAGE: &str = "Please select at least one option above.";

/// Bar color for the hand-picked dropdown subset
pub const SELECTION_COLOR: Color = Color::PURPLE;
/// Bar color for the slider's top-N subset
pub const SLIDER_COLOR: Color = Color::ORANGE;

pub fn slider_status(n: usize) -> String {
    format!("Displaying top {n} cities")
}

/// Recompute the full chart set for `state`.
///
/// Order: dropdown selection (bar then map), slider top-N (bar then map), then
/// each checked preset in key order. Controls the variant does not show and
/// presets it does not offer are ignored.
pub fn recompose(dataset: &Dataset, variant: Variant, state: &UiState) -> Composition {
    let mut charts: Vec<ChartSpec> = Vec::new();

    if variant.has_dropdown() && !state.dropdown.is_empty() {
        let selected = dataset.named(&state.dropdown);
        if !selected.is_empty() {
            let n = selected.len();
            charts.push(build_bar(
                &selected,
                format!("Selected Cities Population ({n} cities)"),
                SELECTION_COLOR,
            ));
            charts.push(build_map(&selected, format!("Selected Cities Map ({n} cities)")));
        }
    }

    let slider = state.slider.filter(|_| variant.has_slider());
    if let Some(value) = slider {
        let n = value.get();
        let top = dataset.head(n);
        charts.push(build_bar(
            top,
            format!("Top {n} Most Populous US Cities (2014)"),
            SLIDER_COLOR,
        ));
        charts.push(build_map(top, format!("Top {n} Cities by Location (2014)")));
    }

    for key in state.checklist.iter().filter(|k| variant.offers(**k)) {
        charts.push(build_view(&resolve(dataset, *key)));
    }

    let status = slider.map(|v| slider_status(v.get()));
    if charts.is_empty() {
        Composition::NoSelection {
            message: NO_SELECTION_MESSAGE.to_string(),
            status,
        }
    } else {
        Composition::Charts { charts, status }
    }
}
