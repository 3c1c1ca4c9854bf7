use serde::{Deserialize, Serialize};
use std::fmt;

/// Common metadata for all chart types
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotMeta {
    /// Title displayed at the top of the chart
    pub title: String,
}

impl PlotMeta {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// One row of the city dataset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub name: String,
    pub population: u64,
    pub latitude: f64,
    pub longitude: f64,
}

impl CityRecord {
    pub fn new(name: impl Into<String>, population: u64, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            population,
            latitude,
            longitude,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
    pub const fn with_a(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Build from 8-bit channels, e.g. `Color::rgb8(0x34, 0x98, 0xdb)`.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    // Flat UI palette used by the dashboard charts
    pub const BLUE: Self = Self::rgb8(0x34, 0x98, 0xdb);
    pub const RED: Self = Self::rgb8(0xe7, 0x4c, 0x3c);
    pub const GREEN: Self = Self::rgb8(0x2e, 0xcc, 0x71);
    pub const PURPLE: Self = Self::rgb8(0x9b, 0x59, 0xb6);
    pub const ORANGE: Self = Self::rgb8(0xf3, 0x9c, 0x12);

    /// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let color = Self::rgb8(channel(0)?, channel(2)?, channel(4)?);
        match hex.len() {
            8 => Some(color.with_a(channel(6)? as f32 / 255.0)),
            _ => Some(color),
        }
    }

    pub fn to_hex(&self) -> String {
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", to_u8(self.r), to_u8(self.g), to_u8(self.b))
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                to_u8(self.r),
                to_u8(self.g),
                to_u8(self.b),
                to_u8(self.a)
            )
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::from_hex(&s).ok_or_else(|| format!("invalid hex color: {s}"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Map,
}

/// Ranked bar chart: one bar per city, in row order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub meta: PlotMeta,
    pub rows: Vec<CityRecord>,
    pub color: Color,
    pub x_label: String,
    pub y_label: String,
    /// City names, one per bar
    pub categories: Vec<String>,
    pub values: Vec<u64>,
    pub hover: Vec<String>,
}

/// Region a map chart is clipped to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoScope {
    #[default]
    Usa,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
    /// Marker diameter, proportional to population
    pub size: f32,
    pub color: Color,
    pub hover: String,
}

/// Geographic bubble map with one colored point per city.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapChart {
    pub meta: PlotMeta,
    pub rows: Vec<CityRecord>,
    pub scope: GeoScope,
    pub points: Vec<MapPoint>,
}

/// Renderer-agnostic description of one chart to display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartSpec {
    Bar(BarChart),
    Map(MapChart),
}

impl ChartSpec {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartSpec::Bar(_) => ChartKind::Bar,
            ChartSpec::Map(_) => ChartKind::Map,
        }
    }

    pub fn rows(&self) -> &[CityRecord] {
        match self {
            ChartSpec::Bar(b) => &b.rows,
            ChartSpec::Map(m) => &m.rows,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Bar(b) => &b.meta.title,
            ChartSpec::Map(m) => &m.meta.title,
        }
    }

    /// Uniform chart color; maps color per city and have none.
    pub fn color(&self) -> Option<Color> {
        match self {
            ChartSpec::Bar(b) => Some(b.color),
            ChartSpec::Map(_) => None,
        }
    }
}

/// Everything the hosting UI needs to redraw after a control change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Composition {
    Charts {
        charts: Vec<ChartSpec>,
        status: Option<String>,
    },
    NoSelection {
        message: String,
        status: Option<String>,
    },
}

impl Composition {
    /// Charts to draw; empty for the no-selection advisory.
    pub fn charts(&self) -> &[ChartSpec] {
        match self {
            Composition::Charts { charts, .. } => charts,
            Composition::NoSelection { .. } => &[],
        }
    }

    pub fn status(&self) -> Option<&str> {
        match self {
            Composition::Charts { status, .. } | Composition::NoSelection { status, .. } => {
                status.as_deref()
            }
        }
    }

    pub fn is_empty_selection(&self) -> bool {
        matches!(self, Composition::NoSelection { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_through_palette() {
        assert_eq!(Color::BLUE.to_hex(), "#3498db");
        assert_eq!(Color::from_hex("#e74c3c"), Some(Color::RED));
        assert_eq!(Color::from_hex("2ecc71"), Some(Color::GREEN));
        assert_eq!(Color::from_hex("#2ecc7180").map(|c| c.to_hex()).as_deref(), Some("#2ecc7180"));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
        assert_eq!(Color::from_hex("#ééé"), None);
    }

    #[test]
    fn plot_meta_carries_only_the_title() {
        let json = serde_json::to_value(PlotMeta::titled("Top")).unwrap();
        assert_eq!(json, serde_json::json!({ "title": "Top" }));
        let scope = serde_json::to_value(GeoScope::default()).unwrap();
        assert_eq!(scope, serde_json::json!("usa"));
    }

    #[test]
    fn color_serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::PURPLE).unwrap();
        assert_eq!(json, "\"#9b59b6\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::PURPLE);
    }
}
