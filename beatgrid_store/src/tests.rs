use std::fs;

use beatgrid_chart::{EventKind, RawChart};

use super::*;

fn raw_chart(notes: serde_json::Value) -> RawChart {
    serde_json::from_value(serde_json::json!({
        "metadata": {
            "title": "Test Track",
            "artist": "Nobody",
            "difficulty": "normal",
            "level": 5,
            "bpm": 140.0,
            "duration": 8000
        },
        "gameConfig": {},
        "notes": notes
    }))
    .unwrap()
}

#[test]
fn valid_chart_passes_and_defaults_to_four_lanes() {
    let raw = raw_chart(serde_json::json!([
        { "time": 1000, "lane": 0, "type": "tap" },
        { "time": 2000, "lane": 3, "type": "slide" }
    ]));

    let chart = validate(&raw).unwrap();
    assert_eq!(chart.lane_count, DEFAULT_LANES);
    assert_eq!(chart.metadata.title, "Test Track");
    assert_eq!(chart.metadata.duration_ms, 8000);
    assert_eq!(chart.events.len(), 2);
    assert_eq!(chart.events[1].kind, EventKind::Slide);
}

#[test]
fn events_come_out_sorted_regardless_of_input_order() {
    let raw = raw_chart(serde_json::json!([
        { "time": 3000, "lane": 0, "type": "tap" },
        { "time": 1000, "lane": 1, "type": "tap" },
        { "time": 2000, "lane": 2, "type": "hold" }
    ]));

    let chart = validate(&raw).unwrap();
    let times: Vec<u64> = chart.events.iter().map(|e| e.time_ms).collect();
    assert_eq!(times, vec![1000, 2000, 3000]);
}

#[test]
fn equal_times_keep_source_order() {
    let raw = raw_chart(serde_json::json!([
        { "time": 1000, "lane": 2, "type": "tap" },
        { "time": 1000, "lane": 0, "type": "tap" },
        { "time": 500, "lane": 1, "type": "tap" }
    ]));

    let chart = validate(&raw).unwrap();
    let lanes: Vec<usize> = chart.events.iter().map(|e| e.lane).collect();
    assert_eq!(lanes, vec![1, 2, 0]);
}

#[test]
fn validate_does_not_mutate_its_input() {
    let raw = raw_chart(serde_json::json!([
        { "time": 3000, "lane": 0, "type": "tap" },
        { "time": 1000, "lane": 1, "type": "tap" }
    ]));
    let before = raw.clone();

    validate(&raw).unwrap();
    assert_eq!(raw, before);
}

#[test]
fn missing_top_level_sections_are_malformed() {
    let raw: RawChart = serde_json::from_str("{}").unwrap();
    assert!(matches!(validate(&raw), Err(ChartError::Malformed(_))));

    let raw: RawChart = serde_json::from_value(serde_json::json!({
        "metadata": { "title": "t" },
        "notes": []
    }))
    .unwrap();
    assert!(matches!(validate(&raw), Err(ChartError::Malformed(_))));
}

#[test]
fn each_absent_metadata_field_is_reported_by_name() {
    for field in ["title", "artist", "difficulty", "level", "bpm", "duration"] {
        let mut metadata = serde_json::json!({
            "title": "t",
            "artist": "a",
            "difficulty": "easy",
            "level": 1,
            "bpm": 120.0,
            "duration": 1000
        });
        metadata.as_object_mut().unwrap().remove(field);

        let raw: RawChart = serde_json::from_value(serde_json::json!({
            "metadata": metadata,
            "gameConfig": {},
            "notes": []
        }))
        .unwrap();

        match validate(&raw) {
            Err(ChartError::MissingMetadata(name)) => assert_eq!(name, field),
            other => panic!("expected MissingMetadata({field}), got {other:?}"),
        }
    }
}

#[test]
fn lane_count_outside_three_to_five_is_rejected() {
    for (lanes, ok) in [(2, false), (3, true), (4, true), (5, true), (6, false)] {
        let mut raw = raw_chart(serde_json::json!([]));
        raw.game_config.as_mut().unwrap().lanes = Some(lanes);

        let result = validate(&raw);
        if ok {
            assert_eq!(result.unwrap().lane_count, lanes as usize);
        } else {
            assert!(matches!(result, Err(ChartError::InvalidLaneCount(n)) if n == lanes));
        }
    }
}

#[test]
fn negative_or_missing_event_time_is_rejected() {
    let raw = raw_chart(serde_json::json!([{ "time": -1, "lane": 0, "type": "tap" }]));
    assert!(matches!(
        validate(&raw),
        Err(ChartError::InvalidEventTime { index: 0 })
    ));

    let raw = raw_chart(serde_json::json!([
        { "time": 100, "lane": 0, "type": "tap" },
        { "lane": 0, "type": "tap" }
    ]));
    assert!(matches!(
        validate(&raw),
        Err(ChartError::InvalidEventTime { index: 1 })
    ));
}

#[test]
fn fractional_event_times_round_to_milliseconds() {
    let raw = raw_chart(serde_json::json!([{ "time": 999.6, "lane": 0, "type": "tap" }]));
    assert_eq!(validate(&raw).unwrap().events[0].time_ms, 1000);
}

#[test]
fn out_of_range_lane_is_rejected() {
    let raw = raw_chart(serde_json::json!([{ "time": 100, "lane": 4, "type": "tap" }]));
    assert!(matches!(
        validate(&raw),
        Err(ChartError::InvalidLane {
            index: 0,
            lane: 4,
            lane_count: 4
        })
    ));
}

#[test]
fn unknown_event_kind_is_rejected() {
    let raw = raw_chart(serde_json::json!([{ "time": 100, "lane": 0, "type": "flick" }]));
    match validate(&raw) {
        Err(ChartError::InvalidEventKind { index: 0, kind }) => assert_eq!(kind, "flick"),
        other => panic!("expected InvalidEventKind, got {other:?}"),
    }
}

#[test]
fn parse_chart_str_reports_bad_json_as_malformed() {
    assert!(matches!(
        parse_chart_str("not json"),
        Err(ChartError::Malformed(_))
    ));
}

#[test]
fn load_chart_file_reports_missing_file_as_io() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    assert!(matches!(
        load_chart_file(&missing),
        Err(ChartError::Io { .. })
    ));
}

#[test]
fn library_lists_valid_charts_and_skips_broken_ones() {
    let dir = tempfile::tempdir().unwrap();

    let good = serde_json::json!({
        "metadata": {
            "title": "Good", "artist": "A", "difficulty": "easy",
            "level": 2, "bpm": 120.0, "duration": 5000
        },
        "gameConfig": { "lanes": 3 },
        "notes": [ { "time": 100, "lane": 0, "type": "tap" } ]
    });
    fs::write(dir.path().join("b-good.json"), good.to_string()).unwrap();
    fs::write(dir.path().join("a-broken.json"), "{ not json").unwrap();
    fs::write(dir.path().join("chart.schema.json"), "{}").unwrap();
    fs::write(dir.path().join("readme.txt"), "not a chart").unwrap();

    let library = ChartLibrary::new(dir.path());
    let charts = library.list();
    assert_eq!(charts.len(), 1);
    assert_eq!(charts[0].id, "b-good");
    assert_eq!(charts[0].title, "Good");

    let chart = library.load("b-good").unwrap();
    assert_eq!(chart.lane_count, 3);
    assert!(matches!(
        library.load("a-broken"),
        Err(ChartError::Malformed(_))
    ));
}
