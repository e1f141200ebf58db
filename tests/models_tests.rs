// Model serialization tests: required fields, open extras, echo guarantees

use botboard::models::{AggregateField, BotReport};
use serde_json::json;

fn full_report_json() -> serde_json::Value {
    json!({
        "bot_id": "worker-1",
        "received": 100,
        "processed": 50,
        "in_flight": 3,
        "throughput": 12.5,
        "elapsed": 60.0,
        "empty_polls": 4,
        "partitions": 2,
        "progress": 50.0,
        "timestamp": 1000.0
    })
}

#[test]
fn report_deserializes_required_fields() {
    let r: BotReport = serde_json::from_value(full_report_json()).unwrap();
    assert_eq!(r.bot_id, "worker-1");
    assert_eq!(r.received, 100);
    assert_eq!(r.throughput, 12.5);
    assert!(r.extra.is_empty());
}

#[test]
fn report_rejects_missing_required_field() {
    let mut v = full_report_json();
    v.as_object_mut().unwrap().remove("received");
    assert!(serde_json::from_value::<BotReport>(v).is_err());
}

#[test]
fn unrecognized_attributes_are_preserved_and_echoed() {
    let mut v = full_report_json();
    let obj = v.as_object_mut().unwrap();
    obj.insert("topic".into(), json!("orders"));
    obj.insert("region".into(), json!({"zone": "eu-1"}));
    obj.insert("retries".into(), json!(7));

    let r: BotReport = serde_json::from_value(v).unwrap();
    assert_eq!(r.extra.get("topic"), Some(&json!("orders")));

    // Everything the caller sent comes back verbatim on serialize.
    let out = serde_json::to_value(&r).unwrap();
    assert_eq!(out.get("topic"), Some(&json!("orders")));
    assert_eq!(out.get("region"), Some(&json!({"zone": "eu-1"})));
    assert_eq!(out.get("retries"), Some(&json!(7)));
    assert_eq!(out.get("received"), Some(&json!(100)));
}

#[test]
fn ip_address_is_omitted_until_attached() {
    let r: BotReport = serde_json::from_value(full_report_json()).unwrap();
    let out = serde_json::to_value(&r).unwrap();
    assert!(out.get("ip_address").is_none());

    let mut r = r;
    r.ip_address = Some("10.1.2.3".into());
    let out = serde_json::to_value(&r).unwrap();
    assert_eq!(out.get("ip_address"), Some(&json!("10.1.2.3")));
}

#[test]
fn group_key_comes_from_extras_or_typed_ip() {
    let mut v = full_report_json();
    v.as_object_mut().unwrap().insert("topic".into(), json!("t1"));
    let mut r: BotReport = serde_json::from_value(v).unwrap();
    r.ip_address = Some("10.0.0.9".into());

    assert_eq!(r.group_key(AggregateField::Topic), Some("t1".into()));
    assert_eq!(
        r.group_key(AggregateField::IpAddress),
        Some("10.0.0.9".into())
    );
    assert_eq!(r.group_key(AggregateField::GroupId), None);
}

#[test]
fn non_string_group_values_render_as_keys() {
    let mut v = full_report_json();
    v.as_object_mut()
        .unwrap()
        .insert("group_id".into(), json!(12));
    let r: BotReport = serde_json::from_value(v).unwrap();
    assert_eq!(r.group_key(AggregateField::GroupId), Some("12".into()));
}

#[test]
fn extra_counter_defaults_to_zero() {
    let mut v = full_report_json();
    v.as_object_mut().unwrap().insert("erred".into(), json!(5));
    let r: BotReport = serde_json::from_value(v).unwrap();
    assert_eq!(r.extra_counter("erred"), 5);
    assert_eq!(r.extra_counter("queue_size"), 0);
}
