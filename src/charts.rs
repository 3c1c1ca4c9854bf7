use crate::core::{BarChart, ChartSpec, CityRecord, Color, GeoScope, MapChart, MapPoint, PlotMeta};
use crate::view::{Style, View};

/// Marker diameter given to the most populous city on a map.
pub const MAX_MARKER_SIZE: f32 = 20.0;

/// Qualitative palette cycled per city on maps (Plotly's default sequence).
///
/// Maps with more than ten cities reuse hues, as Plotly Express does.
pub const CITY_PALETTE: [Color; 10] = [
    Color::rgb8(0x63, 0x6e, 0xfa),
    Color::rgb8(0xef, 0x55, 0x3b),
    Color::rgb8(0x00, 0xcc, 0x96),
    Color::rgb8(0xab, 0x63, 0xfa),
    Color::rgb8(0xff, 0xa1, 0x5a),
    Color::rgb8(0x19, 0xd3, 0xf3),
    Color::rgb8(0xff, 0x66, 0x92),
    Color::rgb8(0xb6, 0xe8, 0x80),
    Color::rgb8(0xff, 0x97, 0xff),
    Color::rgb8(0xfe, 0xcb, 0x52),
];

/// `8287238` -> `"8,287,238"`
pub fn format_population(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn build_bar(rows: &[CityRecord], title: impl Into<String>, color: Color) -> ChartSpec {
    ChartSpec::Bar(BarChart {
        meta: PlotMeta::titled(title),
        rows: rows.to_vec(),
        color,
        x_label: "City Name".into(),
        y_label: "Population".into(),
        categories: rows.iter().map(|r| r.name.clone()).collect(),
        values: rows.iter().map(|r| r.population).collect(),
        hover: rows
            .iter()
            .map(|r| format!("{}: Population: {}", r.name, format_population(r.population)))
            .collect(),
    })
}

pub fn build_map(rows: &[CityRecord], title: impl Into<String>) -> ChartSpec {
    let max_pop = rows.iter().map(|r| r.population).max().unwrap_or(0);
    let points = rows
        .iter()
        .enumerate()
        .map(|(i, r)| MapPoint {
            lat: r.latitude,
            lon: r.longitude,
            size: marker_size(r.population, max_pop),
            color: CITY_PALETTE[i % CITY_PALETTE.len()],
            hover: format!("{}: {}", r.name, format_population(r.population)),
        })
        .collect();

    ChartSpec::Map(MapChart {
        meta: PlotMeta::titled(title),
        rows: rows.to_vec(),
        scope: GeoScope::Usa,
        points,
    })
}

/// Build whichever chart a resolved preset asks for.
pub fn build_view(view: &View<'_>) -> ChartSpec {
    match view.style {
        Style::Bar(color) => build_bar(view.rows, view.title, color),
        Style::Map => build_map(view.rows, view.title),
    }
}

fn marker_size(population: u64, max_pop: u64) -> f32 {
    if max_pop == 0 {
        return 0.0;
    }
    (population as f64 / max_pop as f64 * MAX_MARKER_SIZE as f64) as f32
}
