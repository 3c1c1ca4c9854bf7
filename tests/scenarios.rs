use std::collections::BTreeSet;

use citydash::prelude::*;

fn dataset() -> Dataset {
    let csv = "\
name,pop,lat,lon
Philadelphia ,1553165,39.9525839,-75.1652215
New York ,8287238,40.7127837,-74.0059413
Los Angeles ,3826423,34.0522342,-118.2436849
Chicago ,2718782,41.8781136,-87.6297982
Houston ,2195914,29.7604267,-95.3698028
Phoenix ,1513367,33.4483771,-112.0740373
San Antonio ,1409019,29.4241219,-98.4936282
San Diego ,1355896,32.715738,-117.1610838
Dallas ,1257676,32.7766642,-96.7969879
San Jose ,998537,37.3382082,-121.8863286
Austin ,885400,30.267153,-97.7430608
Indianapolis ,843393,39.768403,-86.158068
Jacksonville ,842583,30.3321838,-81.655651
San Francisco ,837442,37.7749295,-122.4194155
Columbus ,822553,39.9611755,-82.9987942
";
    Dataset::from_reader(csv.as_bytes()).expect("sample dataset parses")
}

fn tiny() -> Dataset {
    Dataset::from_records(vec![
        CityRecord::new("A", 500, 40.0, -75.0),
        CityRecord::new("B", 300, 35.0, -100.0),
        CityRecord::new("C", 100, 30.0, -90.0),
    ])
}

fn row_names(spec: &ChartSpec) -> Vec<&str> {
    spec.rows().iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn top5_on_three_rows_returns_all_in_blue() {
    let state = UiState::new().with_key(FilterKey::Top5);
    let out = recompose(&tiny(), Variant::Checklist, &state);

    assert_eq!(out.charts().len(), 1);
    let chart = &out.charts()[0];
    assert_eq!(chart.kind(), ChartKind::Bar);
    assert_eq!(row_names(chart), ["A", "B", "C"]);
    assert_eq!(chart.title(), "Top 5 Most Populous US Cities (2014)");
    assert_eq!(chart.color(), Some(Color::BLUE));
}

#[test]
fn largest10_on_three_rows_is_a_per_city_map() {
    let state = UiState::new().with_key(FilterKey::Largest10);
    let out = recompose(&tiny(), Variant::Maps, &state);

    assert_eq!(out.charts().len(), 1);
    let chart = &out.charts()[0];
    assert_eq!(chart.kind(), ChartKind::Map);
    assert_eq!(chart.rows().len(), 3);
    assert_eq!(chart.color(), None);

    let ChartSpec::Map(map) = chart else {
        panic!("expected map chart");
    };
    let hues: BTreeSet<String> = map.points.iter().map(|p| p.color.to_hex()).collect();
    assert_eq!(hues.len(), 3);
}

#[test]
fn recompose_is_idempotent() {
    let ds = dataset();
    let state = UiState::new()
        .with_key(FilterKey::Top10)
        .with_key(FilterKey::Smallest10)
        .with_city("Austin")
        .with_slider(SliderValue::new(4).unwrap());

    let first = recompose(&ds, Variant::Explorer, &state);
    let second = recompose(&ds, Variant::Explorer, &state);
    assert_eq!(first, second);
}

#[test]
fn dropdown_selection_is_exact_and_ordered() {
    let ds = dataset();
    let state: UiState = serde_json::from_str(
        r#"{"dropdown": ["Los Angeles", "New York", "New York"]}"#,
    )
    .unwrap();

    let out = recompose(&ds, Variant::Explorer, &state);
    assert_eq!(row_names(&out.charts()[0]), ["New York", "Los Angeles"]);
    assert_eq!(row_names(&out.charts()[1]), ["New York", "Los Angeles"]);
    assert_eq!(out.charts()[0].title(), "Selected Cities Population (2 cities)");
}

#[test]
fn slider_of_one_is_the_single_largest_city() {
    let ds = dataset();
    let state = UiState::new().with_slider(SliderValue::new(1).unwrap());
    let out = recompose(&ds, Variant::Explorer, &state);

    assert_eq!(out.charts().len(), 2);
    for chart in out.charts() {
        assert_eq!(row_names(chart), ["New York"]);
    }
    assert_eq!(out.status(), Some("Displaying top 1 cities"));
}

#[test]
fn slider_of_twenty_caps_at_dataset_size() {
    let ds = dataset();
    let state = UiState::new().with_slider(SliderValue::new(20).unwrap());
    let out = recompose(&ds, Variant::Explorer, &state);
    assert!(out.charts().iter().all(|c| c.rows().len() == ds.len()));
}

#[test]
fn bottom_and_smallest_keep_descending_slice_order() {
    let ds = dataset();
    let state = UiState::new()
        .with_key(FilterKey::Bottom5)
        .with_key(FilterKey::Smallest10);
    let out = recompose(&ds, Variant::Maps, &state);

    assert_eq!(out.charts()[0].rows(), ds.tail(5));
    assert_eq!(out.charts()[1].rows(), ds.tail(10));
    assert_eq!(row_names(&out.charts()[0]).last(), Some(&"Columbus"));
}

#[test]
fn default_states_per_variant() {
    let ds = dataset();

    let checklist = recompose(&ds, Variant::Checklist, &Variant::Checklist.default_state());
    assert_eq!(checklist.charts().len(), 1);

    let explorer = recompose(&ds, Variant::Explorer, &Variant::Explorer.default_state());
    assert_eq!(explorer.charts().len(), 2);
    assert_eq!(explorer.status(), Some("Displaying top 10 cities"));

    let cleared = recompose(&ds, Variant::Explorer, &UiState::new());
    assert!(cleared.is_empty_selection());
}

#[test]
fn composition_wire_shape() {
    let out = recompose(&tiny(), Variant::Checklist, &UiState::new());
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["outcome"], "no_selection");
    assert_eq!(json["message"], "Please select at least one option above.");

    let out = recompose(&tiny(), Variant::Checklist, &UiState::new().with_key(FilterKey::Top5));
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["outcome"], "charts");
    assert_eq!(json["charts"][0]["kind"], "bar");
    assert_eq!(json["charts"][0]["color"], "#3498db");
    assert_eq!(json["charts"][0]["hover"][0], "A: Population: 500");
}
