use festival_schedule::constants::UNKNOWN_STAGE;
use festival_schedule::normalize::extract_schedule_info;
use festival_schedule::normalize::timestamp::{timestamp_to_iso8601, OutputTimeZone};
use serde_json::{json, Number, Value};

fn performance(id: i64, stage: Value, artist: Value) -> Value {
    json!({
        "id": id,
        "date_from": 1754481600000i64 + id * 3_600_000,
        "date_to": 1754485200000i64 + id * 3_600_000,
        "stage": stage,
        "artist": artist
    })
}

fn en_stage(name: &str) -> Value {
    json!({"localized": [{"language": "EN", "name": name}]})
}

fn artist(name: &str) -> Value {
    json!({"name": name, "localized": [{"language": "EN", "genre": "Metal"}]})
}

#[test]
fn test_end_to_end_example() {
    let raw = json!({"schedules": [{
        "id": 1,
        "date_from": 1716000000000i64,
        "date_to": 1716003600000i64,
        "stage": {"localized": [{"language": "EN", "name": "Main Stage"}]},
        "artist": {"name": "Band X", "localized": [{"language": "EN", "genre": "Metal"}]}
    }]});

    let zone = OutputTimeZone::Local;
    let stages = extract_schedule_info(Some(&raw), zone);
    let from = timestamp_to_iso8601(Some(&Number::from(1716000000000i64)), zone);
    let to = timestamp_to_iso8601(Some(&Number::from(1716003600000i64)), zone);

    assert_eq!(
        serde_json::to_value(&stages).unwrap(),
        json!({"Main Stage": [{
            "id": 1,
            "date_from_iso8601": from,
            "date_to_iso8601": to,
            "artist_name": "Band X",
            "genre": "Metal"
        }]})
    );
}

#[test]
fn test_items_keep_source_order_within_and_across_stages() {
    let raw = json!({"schedules": [
        performance(1, en_stage("Octagon"), artist("A")),
        performance(2, en_stage("Main"), artist("B")),
        performance(3, en_stage("Octagon"), artist("C")),
        performance(4, en_stage("KAL"), artist("D")),
        performance(5, en_stage("Main"), artist("E"))
    ]});

    let stages = extract_schedule_info(Some(&raw), OutputTimeZone::Utc);

    let keys: Vec<&str> = stages.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["Octagon", "Main", "KAL"]);
    let ids = |stage: &str| stages[stage].iter().map(|r| r.id).collect::<Vec<_>>();
    assert_eq!(ids("Octagon"), vec![1, 3]);
    assert_eq!(ids("Main"), vec![2, 5]);
    assert_eq!(ids("KAL"), vec![4]);
}

#[test]
fn test_incomplete_items_never_appear() {
    let mut no_id = performance(1, en_stage("Main"), artist("A"));
    no_id.as_object_mut().unwrap().remove("id");
    let mut no_start = performance(2, en_stage("Main"), artist("B"));
    no_start["date_from"] = Value::Null;
    let null_artist = performance(3, en_stage("Main"), Value::Null);
    let nameless_artist = performance(4, en_stage("Main"), json!({"localized": []}));
    let kept = performance(5, en_stage("Main"), artist("E"));

    let raw = json!({"schedules": [no_id, no_start, null_artist, nameless_artist, kept]});
    let stages = extract_schedule_info(Some(&raw), OutputTimeZone::Utc);

    assert_eq!(stages.len(), 1);
    let records = &stages["Main"];
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, 5);
    assert_eq!(records[0].artist_name, "E");
}

#[test]
fn test_only_dropped_items_gives_empty_schedule() {
    let raw = json!({"schedules": [performance(1, en_stage("Main"), Value::Null)]});
    assert!(extract_schedule_info(Some(&raw), OutputTimeZone::Utc).is_empty());
}

#[test]
fn test_stage_name_resolution() {
    let raw = json!({"schedules": [
        performance(1, json!({"localized": [
            {"language": "FR", "name": "Scène A"},
            {"language": "EN", "name": "Stage A"}
        ]}), artist("A")),
        performance(2, json!({"localized": [{"language": "FR", "name": "Scène A"}]}), artist("B")),
        performance(3, json!({"localized": []}), artist("C")),
        performance(4, Value::Null, artist("D")),
        performance(5, json!({}), artist("E"))
    ]});

    let stages = extract_schedule_info(Some(&raw), OutputTimeZone::Utc);

    assert_eq!(stages["Stage A"].len(), 1);
    assert_eq!(stages["Scène A"].len(), 1);
    let unknown: Vec<i64> = stages[UNKNOWN_STAGE].iter().map(|r| r.id).collect();
    assert_eq!(unknown, vec![3, 4, 5]);
}

#[test]
fn test_one_malformed_item_does_not_abort_the_run() {
    let mut items: Vec<Value> = (0..100)
        .map(|i| performance(i, en_stage("Main"), artist(&format!("Band {i}"))))
        .collect();
    items[42]["artist"] = json!({"name": "Broken", "localized": "not a list"});

    let raw = json!({ "schedules": items });
    let stages = extract_schedule_info(Some(&raw), OutputTimeZone::Utc);

    let records = &stages["Main"];
    assert_eq!(records.len(), 99);
    assert!(records.iter().all(|r| r.id != 42));
    assert!(records.windows(2).all(|w| w[0].id < w[1].id));
}

#[test]
fn test_extraction_is_idempotent() {
    let raw = json!({"schedules": [
        performance(1, en_stage("Main"), artist("A")),
        performance(2, json!({"localized": [{"language": "CZ", "name": "Metalshop"}]}), artist("Ďáblík")),
        performance(3, Value::Null, artist("C"))
    ]});

    let first = serde_json::to_string_pretty(&extract_schedule_info(Some(&raw), OutputTimeZone::Local)).unwrap();
    let second = serde_json::to_string_pretty(&extract_schedule_info(Some(&raw), OutputTimeZone::Local)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_record_field_order() {
    let raw = json!({"schedules": [performance(1, en_stage("Main"), json!({"name": "A"}))]});
    let stages = extract_schedule_info(Some(&raw), OutputTimeZone::Utc);
    let text = serde_json::to_string(&stages).unwrap();

    let positions: Vec<usize> = ["\"id\"", "\"date_from_iso8601\"", "\"date_to_iso8601\"", "\"artist_name\"", "\"genre\""]
        .iter()
        .map(|field| text.find(field).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(text.contains("\"genre\":null"));
}
