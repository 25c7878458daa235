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

//! In-memory stand-ins for the page, the tag transport, the history endpoint
//! and the chart, shared by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::rc::Rc;

use async_broadcast::Receiver;
use hmi_client::{
    ChartBuffer, ChartSurface, ConnectOptions, Document, Element, HmiEvent, TagTransport,
    TransportError,
};
use hmi_history_client::{HistoryError, HistoryQuery, HistorySource};
use hmi_types::{Callback, HistoryPage, HistoryRow, SubscribeRequest, Tag, WriteAck, WriteRequest};
use serde_json::Value;

// === DOM ===

#[derive(Default)]
pub struct FakeElement {
    text: RefCell<String>,
    value: RefCell<String>,
    classes: RefCell<BTreeSet<String>>,
    listeners: RefCell<Vec<(&'static str, Callback<()>)>>,
    mutations: Cell<usize>,
}

impl FakeElement {
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn current_value(&self) -> String {
        self.value.borrow().clone()
    }

    /// How many times a widget changed this element.
    pub fn mutations(&self) -> usize {
        self.mutations.get()
    }

    pub fn classes(&self) -> Vec<String> {
        self.classes.borrow().iter().cloned().collect()
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(name, _)| *name == event)
            .count()
    }

    pub fn fire(&self, event: &str) {
        let callbacks: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(name, _)| *name == event)
            .map(|(_, cb)| cb.clone())
            .collect();
        for cb in callbacks {
            cb.emit(());
        }
    }

    pub fn click(&self) {
        self.fire("click");
    }

    /// Simulates the operator focusing the field and typing `text`.
    pub fn type_text(&self, text: &str) {
        self.fire("focus");
        *self.value.borrow_mut() = text.to_string();
        self.fire("input");
    }

    /// Simulates the operator typing `text` and leaving the field.
    pub fn type_and_commit(&self, text: &str) {
        *self.value.borrow_mut() = text.to_string();
        self.fire("change");
    }
}

impl Element for FakeElement {
    fn text_content(&self) -> String {
        self.text()
    }

    fn set_text_content(&self, text: &str) {
        self.mutations.set(self.mutations.get() + 1);
        *self.text.borrow_mut() = text.to_string();
    }

    fn value(&self) -> String {
        self.current_value()
    }

    fn set_value(&self, value: &str) {
        self.mutations.set(self.mutations.get() + 1);
        *self.value.borrow_mut() = value.to_string();
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    fn toggle_class(&self, class: &str, present: bool) {
        self.mutations.set(self.mutations.get() + 1);
        let mut classes = self.classes.borrow_mut();
        if present {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }

    fn add_event_listener(&self, event: &'static str, callback: Callback<()>) {
        self.listeners.borrow_mut().push((event, callback));
    }
}

/// A document holding only the elements a test adds. Selectors starting with
/// `!` are treated as syntactically invalid.
#[derive(Default)]
pub struct FakeDocument {
    elements: HashMap<String, Rc<FakeElement>>,
}

impl FakeDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, selector: &str) -> Self {
        self.elements
            .insert(selector.to_string(), Rc::new(FakeElement::default()));
        self
    }

    pub fn el(&self, selector: &str) -> Rc<FakeElement> {
        self.elements
            .get(selector)
            .cloned()
            .unwrap_or_else(|| panic!("no element {selector}"))
    }

    pub fn total_mutations(&self) -> usize {
        self.elements.values().map(|el| el.mutations()).sum()
    }
}

impl Document for FakeDocument {
    fn query_selector(&self, selector: &str) -> Option<Rc<dyn Element>> {
        if selector.starts_with('!') {
            return None;
        }
        self.elements
            .get(selector)
            .map(|el| el.clone() as Rc<dyn Element>)
    }
}

// === Transport ===

#[derive(Default)]
pub struct ScriptedTransport {
    connected: Cell<bool>,
    options: RefCell<ConnectOptions>,
    connects: Cell<usize>,
    writes: RefCell<Vec<(WriteRequest, Callback<WriteAck>)>>,
    subscribes: RefCell<Vec<SubscribeRequest>>,
    fail_sends: Cell<bool>,
}

impl ScriptedTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn open(&self) {
        self.connected.set(true);
        let on_connected = self.options.borrow().on_connected.clone();
        on_connected.emit(());
    }

    pub fn lose(&self, reason: &str) {
        self.connected.set(false);
        let on_lost = self.options.borrow().on_connection_lost.clone();
        on_lost.emit(reason.to_string());
    }

    pub fn push(&self, payload: Value) {
        let on_update = self.options.borrow().on_tag_update.clone();
        on_update.emit(payload);
    }

    /// Answers the `n`th write sent so far.
    pub fn ack(&self, n: usize, ack: WriteAck) {
        let cb = self.writes.borrow()[n].1.clone();
        cb.emit(ack);
    }

    pub fn fail_sends(&self) {
        self.fail_sends.set(true);
    }

    pub fn connects(&self) -> usize {
        self.connects.get()
    }

    pub fn writes(&self) -> Vec<WriteRequest> {
        self.writes.borrow().iter().map(|(w, _)| w.clone()).collect()
    }

    pub fn subscribes(&self) -> Vec<SubscribeRequest> {
        self.subscribes.borrow().clone()
    }
}

impl TagTransport for ScriptedTransport {
    fn connect(&self, options: ConnectOptions) -> Result<(), TransportError> {
        self.connects.set(self.connects.get() + 1);
        *self.options.borrow_mut() = options;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.get()
    }

    fn emit_write(
        &self,
        request: WriteRequest,
        on_ack: Callback<WriteAck>,
    ) -> Result<(), TransportError> {
        if self.fail_sends.get() {
            return Err(TransportError::Send("socket buffer full".to_string()));
        }
        self.writes.borrow_mut().push((request, on_ack));
        Ok(())
    }

    fn emit_subscribe(&self, request: SubscribeRequest) -> Result<(), TransportError> {
        self.subscribes.borrow_mut().push(request);
        Ok(())
    }
}

// === History ===

/// Answers queries from a queue of scripted responses. An exhausted queue
/// answers with an empty page.
#[derive(Clone, Default)]
pub struct ScriptedHistory {
    responses: Rc<RefCell<VecDeque<Result<HistoryPage, HistoryError>>>>,
    queries: Rc<RefCell<Vec<HistoryQuery>>>,
}

impl ScriptedHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self, rows: Vec<HistoryRow>, end: Option<f64>) -> &Self {
        self.responses
            .borrow_mut()
            .push_back(Ok(HistoryPage { rows, end }));
        self
    }

    pub fn fail(&self, status: u16) -> &Self {
        self.responses
            .borrow_mut()
            .push_back(Err(HistoryError::Status {
                status,
                body: "historian unavailable".to_string(),
            }));
        self
    }

    pub fn queries(&self) -> Vec<HistoryQuery> {
        self.queries.borrow().clone()
    }
}

impl HistorySource for ScriptedHistory {
    async fn fetch(&self, query: &HistoryQuery) -> Result<HistoryPage, HistoryError> {
        self.queries.borrow_mut().push(query.clone());
        let next = self.responses.borrow_mut().pop_front();
        next.unwrap_or_else(|| Ok(HistoryPage::default()))
    }
}

pub fn row(tag: &str, ts: f64, value: f64) -> HistoryRow {
    HistoryRow {
        tag: Tag::from(tag),
        ts,
        value,
    }
}

// === Chart ===

#[derive(Clone, Default)]
pub struct RecordingSurface {
    renders: Rc<Cell<usize>>,
    last: Rc<RefCell<Option<ChartBuffer>>>,
}

impl RecordingSurface {
    pub fn renders(&self) -> usize {
        self.renders.get()
    }

    pub fn last(&self) -> Option<ChartBuffer> {
        self.last.borrow().clone()
    }
}

impl ChartSurface for RecordingSurface {
    fn render(&self, chart: &ChartBuffer) {
        self.renders.set(self.renders.get() + 1);
        *self.last.borrow_mut() = Some(chart.clone());
    }
}

// === Events ===

pub fn drain(rx: &mut Receiver<HmiEvent>) -> Vec<HmiEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// A clock the test moves by hand.
#[derive(Clone)]
pub struct ManualClock(Rc<Cell<f64>>);

impl ManualClock {
    pub fn at(ms: f64) -> Self {
        Self(Rc::new(Cell::new(ms)))
    }

    pub fn set(&self, ms: f64) {
        self.0.set(ms);
    }

    pub fn advance(&self, ms: f64) {
        self.0.set(self.0.get() + ms);
    }

    pub fn callback(&self) -> Callback<(), f64> {
        let now = self.0.clone();
        Callback::from(move |_| now.get())
    }
}
