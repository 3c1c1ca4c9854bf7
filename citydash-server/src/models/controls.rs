//! Control state as sent by the browser, and the control layout sent back

use citydash::prelude::{
    ControlOption, Dataset, FilterKey, SLIDER_DEFAULT, SLIDER_MAX, SLIDER_MIN, SliderValue,
    UiState, Variant,
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::{Result, ServerError};

/// Raw control values from the page.
///
/// Every field is optional; a missing field falls back to the variant's
/// default. `slider: null` clears the slider.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ControlsRequest {
    pub checklist: Option<Vec<String>>,
    pub dropdown: Option<Vec<String>>,
    #[serde(default, deserialize_with = "present")]
    pub slider: Option<Option<i64>>,
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}

impl ControlsRequest {
    /// Validate into a `UiState`. Unknown checklist names are dropped.
    pub fn into_state(self, variant: Variant) -> Result<UiState> {
        self.apply_to(variant.default_state())
    }

    /// Overlay the fields that are present onto `state`.
    pub fn apply_to(self, mut state: UiState) -> Result<UiState> {
        if let Some(names) = self.checklist {
            state.checklist = names
                .iter()
                .filter_map(|name| {
                    let key = FilterKey::parse(name);
                    if key.is_none() {
                        debug!("Skipping unknown checklist value {:?}", name);
                    }
                    key
                })
                .collect();
        }

        if let Some(cities) = self.dropdown {
            state.dropdown = cities.into_iter().collect();
        }

        if let Some(slider) = self.slider {
            state.slider = slider.map(slider_value).transpose()?;
        }

        Ok(state)
    }
}

fn slider_value(raw: i64) -> Result<SliderValue> {
    u8::try_from(raw)
        .ok()
        .and_then(SliderValue::new)
        .ok_or_else(|| {
            ServerError::BadRequest(format!(
                "slider must be between {SLIDER_MIN} and {SLIDER_MAX}, got {raw}"
            ))
        })
}

#[derive(Clone, Debug, Serialize)]
pub struct SliderSpec {
    pub min: u8,
    pub max: u8,
    pub default: u8,
}

/// Which controls the page should draw, with their options and defaults
#[derive(Clone, Debug, Serialize)]
pub struct ControlsResponse {
    pub variant: Variant,
    pub title: &'static str,
    pub options: Vec<ControlOption>,
    pub dropdown: Option<Vec<String>>,
    pub slider: Option<SliderSpec>,
    pub defaults: UiState,
}

impl ControlsResponse {
    pub fn describe(variant: Variant, dataset: &Dataset) -> Self {
        Self {
            variant,
            title: variant.title(),
            options: variant.options(),
            dropdown: variant
                .has_dropdown()
                .then(|| dataset.names().into_iter().map(String::from).collect()),
            slider: variant.has_slider().then_some(SliderSpec {
                min: SLIDER_MIN,
                max: SLIDER_MAX,
                default: SLIDER_DEFAULT,
            }),
            defaults: variant.default_state(),
        }
    }
}
