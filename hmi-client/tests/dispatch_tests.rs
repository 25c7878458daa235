/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

//! Update dispatch: live tag batches reaching widgets through a dashboard.

mod support;

use std::rc::Rc;

use hmi_client::{BindingConfig, BindingTable, Dashboard, DashboardConfig, HmiEvent};
use serde_json::json;
use support::{drain, FakeDocument, ScriptedTransport};

fn dashboard(doc: &FakeDocument, bindings: BindingTable) -> (Rc<ScriptedTransport>, Dashboard) {
    let transport = ScriptedTransport::new();
    let config = DashboardConfig {
        bindings,
        ack_timeout_ms: None,
        ..Default::default()
    };
    let dashboard = Dashboard::start(doc, transport.clone(), &config);
    (transport, dashboard)
}

#[test]
fn fixed_label_with_unit() {
    let doc = FakeDocument::new().with("#pv");
    let (transport, _dashboard) = dashboard(
        &doc,
        BindingTable::new().bind("#pv", BindingConfig::label("smoker.temp").fixed(1).unit("°F")),
    );

    transport.push(json!({"smoker.temp": 225.4}));

    assert_eq!(doc.el("#pv").text(), "225.4 °F");
}

#[test]
fn precision_zero_rounds_instead_of_truncating() {
    let doc = FakeDocument::new().with("#cv");
    let (transport, _dashboard) = dashboard(
        &doc,
        BindingTable::new().bind("#cv", BindingConfig::label("tic1.pid.cv").fixed(0)),
    );

    transport.push(json!({"tic1.pid.cv": 57.6}));

    assert_eq!(doc.el("#cv").text(), "58");
}

#[test]
fn raw_label_prints_numbers_like_the_page_did() {
    let doc = FakeDocument::new().with("#mode").with("#pv");
    let (transport, _dashboard) = dashboard(
        &doc,
        BindingTable::new()
            .bind("#mode", BindingConfig::label("tic1.mode"))
            .bind("#pv", BindingConfig::label("tic1.pid.pv").unit("°F")),
    );

    transport.push(json!({"tic1.mode": 2.0, "tic1.pid.pv": 180.25}));

    assert_eq!(doc.el("#mode").text(), "2");
    assert_eq!(doc.el("#pv").text(), "180.25 °F");
}

#[test]
fn tags_without_subscribers_change_nothing() {
    let doc = FakeDocument::new().with("#pv");
    let (transport, dashboard) = dashboard(
        &doc,
        BindingTable::new().bind("#pv", BindingConfig::label("tic1.pid.pv")),
    );
    let mut events = dashboard.events().subscribe();

    transport.push(json!({"fan.speed": 3, "tic1.pid": 1}));

    assert_eq!(doc.total_mutations(), 0);
    assert!(drain(&mut events).is_empty());
    assert_eq!(dashboard.dispatcher().dispatch(&json!({"fan.speed": 3})), 0);
}

#[test]
fn non_object_batch_is_discarded_once() {
    let doc = FakeDocument::new().with("#pv");
    let (transport, dashboard) = dashboard(
        &doc,
        BindingTable::new().bind("#pv", BindingConfig::label("tic1.pid.pv")),
    );
    let mut events = dashboard.events().subscribe();

    for payload in [json!([1, 2, 3]), json!("tic1.pid.pv"), json!(null), json!(225.4)] {
        transport.push(payload);
    }

    assert_eq!(doc.total_mutations(), 0);
    let events = drain(&mut events);
    assert_eq!(events.len(), 4);
    assert!(events
        .iter()
        .all(|e| matches!(e, HmiEvent::BatchDiscarded(_))));
}

#[test]
fn one_bad_value_discards_the_whole_batch() {
    let doc = FakeDocument::new().with("#pv").with("#sp");
    let (transport, dashboard) = dashboard(
        &doc,
        BindingTable::new()
            .bind("#pv", BindingConfig::label("tic1.pid.pv"))
            .bind("#sp", BindingConfig::label("tic1.sp")),
    );
    let mut events = dashboard.events().subscribe();

    transport.push(json!({"tic1.pid.pv": 180.0, "tic1.sp": "hot"}));

    assert_eq!(doc.el("#pv").mutations(), 0);
    assert_eq!(doc.el("#sp").mutations(), 0);
    assert!(matches!(
        drain(&mut events).as_slice(),
        [HmiEvent::BatchDiscarded(reason)] if reason.contains("tic1.sp")
    ));
}

#[test]
fn envelope_batches_dispatch_like_bare_ones() {
    let doc = FakeDocument::new().with("#pv").with("#sp");
    let (transport, _dashboard) = dashboard(
        &doc,
        BindingTable::new()
            .bind("#pv", BindingConfig::label("tic1.pid.pv").fixed(1))
            .bind("#sp", BindingConfig::label("tic1.sp").fixed(0)),
    );

    transport.push(json!({"tags": {"tic1.pid.pv": 201.26, "tic1.sp": 225}, "ts": 1718000000.5}));

    assert_eq!(doc.el("#pv").text(), "201.3");
    assert_eq!(doc.el("#sp").text(), "225");
}

#[test]
fn booleans_drive_indicators() {
    let doc = FakeDocument::new().with("#heater").with("#fan");
    let (transport, _dashboard) = dashboard(
        &doc,
        BindingTable::new()
            .bind("#heater", BindingConfig::indicator("heater.on"))
            .bind("#fan", BindingConfig::indicator("fan.on").class("spinning")),
    );

    transport.push(json!({"heater.on": true, "fan.on": 1}));
    assert_eq!(doc.el("#heater").classes(), vec!["on"]);
    assert_eq!(doc.el("#fan").classes(), vec!["spinning"]);

    transport.push(json!({"heater.on": false, "fan.on": 0}));
    assert!(doc.el("#heater").classes().is_empty());
    assert!(doc.el("#fan").classes().is_empty());
}

#[test]
fn later_batches_overwrite_earlier_values() {
    let doc = FakeDocument::new().with("#pv");
    let (transport, _dashboard) = dashboard(
        &doc,
        BindingTable::new().bind("#pv", BindingConfig::label("tic1.pid.pv").fixed(1)),
    );

    transport.push(json!({"tic1.pid.pv": 180.0}));
    transport.push(json!({"tic1.pid.pv": 181.04}));

    assert_eq!(doc.el("#pv").text(), "181.0");
    assert_eq!(doc.el("#pv").mutations(), 2);
}

#[test]
fn input_reflects_values_without_unit() {
    let doc = FakeDocument::new().with("#sp-entry");
    let (transport, _dashboard) = dashboard(
        &doc,
        BindingTable::new().bind(
            "#sp-entry",
            BindingConfig::input("tic1.sp").fixed(0).unit("°F"),
        ),
    );

    transport.push(json!({"tic1.sp": 224.6}));

    assert_eq!(doc.el("#sp-entry").current_value(), "225");
    assert_eq!(doc.el("#sp-entry").text(), "");
}

#[test]
fn input_keeps_operator_text_while_editing() {
    let doc = FakeDocument::new().with("#sp-entry");
    let (transport, _dashboard) = dashboard(
        &doc,
        BindingTable::new().bind("#sp-entry", BindingConfig::input("tic1.sp").fixed(0)),
    );
    transport.push(json!({"tic1.sp": 225}));

    doc.el("#sp-entry").type_text("23");
    transport.push(json!({"tic1.sp": 226}));
    assert_eq!(doc.el("#sp-entry").current_value(), "23");

    // Leaving without committing shows the latest value again.
    doc.el("#sp-entry").fire("blur");
    assert_eq!(doc.el("#sp-entry").current_value(), "226");

    transport.push(json!({"tic1.sp": 227}));
    assert_eq!(doc.el("#sp-entry").current_value(), "227");
}

#[test]
fn dashboards_do_not_share_state() {
    let doc_a = FakeDocument::new().with("#pv");
    let doc_b = FakeDocument::new().with("#pv");
    let table = BindingTable::new().bind("#pv", BindingConfig::label("tic1.pid.pv"));
    let (transport_a, dashboard_a) = dashboard(&doc_a, table.clone());
    let (_transport_b, dashboard_b) = dashboard(&doc_b, table);
    let mut events_b = dashboard_b.events().subscribe();

    transport_a.push(json!({"tic1.pid.pv": 190}));
    transport_a.push(json!("garbage"));

    assert_eq!(doc_a.el("#pv").text(), "190");
    assert_eq!(doc_b.el("#pv").mutations(), 0);
    assert!(drain(&mut events_b).is_empty());
    assert_eq!(dashboard_a.index().len(), 1);
}
