//! Dashboard variants and the control state they accept.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::view::FilterKey;

pub const SLIDER_MIN: u8 = 1;
pub const SLIDER_MAX: u8 = 20;
pub const SLIDER_DEFAULT: u8 = 10;

/// Slider position, always within `SLIDER_MIN..=SLIDER_MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SliderValue(u8);

impl SliderValue {
    pub fn new(value: u8) -> Option<Self> {
        (SLIDER_MIN..=SLIDER_MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl Default for SliderValue {
    fn default() -> Self {
        Self(SLIDER_DEFAULT)
    }
}

impl TryFrom<u8> for SliderValue {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
            .ok_or_else(|| format!("slider value {value} outside {SLIDER_MIN}..={SLIDER_MAX}"))
    }
}

impl From<SliderValue> for u8 {
    fn from(v: SliderValue) -> Self {
        v.0
    }
}

/// Snapshot of every control on the page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    #[serde(default)]
    pub checklist: BTreeSet<FilterKey>,
    #[serde(default)]
    pub dropdown: BTreeSet<String>,
    #[serde(default)]
    pub slider: Option<SliderValue>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: FilterKey) -> Self {
        self.checklist.insert(key);
        self
    }

    pub fn with_city(mut self, name: impl Into<String>) -> Self {
        self.dropdown.insert(name.into());
        self
    }

    pub fn with_slider(mut self, value: SliderValue) -> Self {
        self.slider = Some(value);
        self
    }
}

/// One checkbox as presented to the user
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ControlOption {
    pub value: FilterKey,
    pub label: &'static str,
}

/// The dashboard flavours that can be served. They share the dataset and the
/// chart builders and differ in which controls are wired up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Bar-chart checklist only
    #[default]
    Checklist,
    /// Checklist with the map presets added
    Maps,
    /// Checklist, city dropdown and top-N slider
    Explorer,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Checklist, Variant::Maps, Variant::Explorer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Checklist => "checklist",
            Variant::Maps => "maps",
            Variant::Explorer => "explorer",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Variant::Checklist => "US Cities Population Dashboard (2014)",
            Variant::Maps => "US Cities Population and Location Dashboard (2014)",
            Variant::Explorer => "US Cities Population Explorer (2014)",
        }
    }

    pub fn offers(&self, key: FilterKey) -> bool {
        match self {
            Variant::Checklist => matches!(
                key,
                FilterKey::Top5 | FilterKey::Bottom5 | FilterKey::Top10
            ),
            Variant::Maps | Variant::Explorer => true,
        }
    }

    pub fn options(&self) -> Vec<ControlOption> {
        FilterKey::ALL
            .into_iter()
            .filter(|k| self.offers(*k))
            .map(|k| ControlOption {
                value: k,
                label: k.label(),
            })
            .collect()
    }

    pub fn has_dropdown(&self) -> bool {
        matches!(self, Variant::Explorer)
    }

    pub fn has_slider(&self) -> bool {
        matches!(self, Variant::Explorer)
    }

    /// Control values the page starts with
    pub fn default_state(&self) -> UiState {
        match self {
            Variant::Checklist | Variant::Maps => UiState::new().with_key(FilterKey::Top5),
            Variant::Explorer => UiState::new().with_slider(SliderValue::default()),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("unknown dashboard variant: {s}"))
    }
}
