//! Checklist presets: which slice of the dataset each key shows, and how.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{ChartKind, CityRecord, Color};
use crate::dataset::Dataset;

/// A named view preset offered as a checkbox.
///
/// Ordering follows declaration order, which is also the order charts are
/// appended in when several keys are checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKey {
    Top5,
    Bottom5,
    Top10,
    Largest10,
    Smallest10,
}

impl FilterKey {
    pub const ALL: [FilterKey; 5] = [
        FilterKey::Top5,
        FilterKey::Bottom5,
        FilterKey::Top10,
        FilterKey::Largest10,
        FilterKey::Smallest10,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKey::Top5 => "top5",
            FilterKey::Bottom5 => "bottom5",
            FilterKey::Top10 => "top10",
            FilterKey::Largest10 => "largest10",
            FilterKey::Smallest10 => "smallest10",
        }
    }

    /// Lenient lookup used at the UI boundary; unknown names yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    /// Checkbox label shown next to this key
    pub fn label(&self) -> &'static str {
        match self {
            FilterKey::Top5 => "Show top five cities by population",
            FilterKey::Bottom5 => "Show bottom five cities by population",
            FilterKey::Top10 => "Show top 10 cities by population",
            FilterKey::Largest10 => "Show 10 largest cities on a map",
            FilterKey::Smallest10 => "Show 10 smallest cities on a map",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown filter key: {s}"))
    }
}

enum Slice {
    Head(usize),
    Tail(usize),
}

/// How a preset is drawn. Maps color each city individually.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Style {
    Bar(Color),
    Map,
}

impl Style {
    pub fn kind(&self) -> ChartKind {
        match self {
            Style::Bar(_) => ChartKind::Bar,
            Style::Map => ChartKind::Map,
        }
    }
}

struct Preset {
    slice: Slice,
    style: Style,
    title: &'static str,
}

fn preset(key: FilterKey) -> Preset {
    match key {
        FilterKey::Top5 => Preset {
            slice: Slice::Head(5),
            style: Style::Bar(Color::BLUE),
            title: "Top 5 Most Populous US Cities (2014)",
        },
        FilterKey::Bottom5 => Preset {
            slice: Slice::Tail(5),
            style: Style::Bar(Color::RED),
            title: "Bottom 5 Least Populous US Cities (2014)",
        },
        FilterKey::Top10 => Preset {
            slice: Slice::Head(10),
            style: Style::Bar(Color::GREEN),
            title: "Top 10 Most Populous US Cities (2014)",
        },
        FilterKey::Largest10 => Preset {
            slice: Slice::Head(10),
            style: Style::Map,
            title: "10 Largest US Cities (2014)",
        },
        FilterKey::Smallest10 => Preset {
            slice: Slice::Tail(10),
            style: Style::Map,
            title: "10 Smallest US Cities (2014)",
        },
    }
}

/// Resolved preset: a borrowed slice of the dataset plus styling.
#[derive(Clone, Debug, PartialEq)]
pub struct View<'a> {
    pub rows: &'a [CityRecord],
    pub title: &'static str,
    pub style: Style,
}

pub fn resolve(dataset: &Dataset, key: FilterKey) -> View<'_> {
    let p = preset(key);
    let rows = match p.slice {
        Slice::Head(n) => dataset.head(n),
        Slice::Tail(n) => dataset.tail(n),
    };
    View {
        rows,
        title: p.title,
        style: p.style,
    }
}
