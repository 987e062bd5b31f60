//! `tracing` layer capturing span fields and events, for tests of the
//! OTel-backed tracer and the logging setup.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

#[derive(Debug, Clone, Default)]
pub struct CapturedSpan {
    pub name: String,
    pub fields: HashMap<String, String>,
    pub closed: bool,
}

impl CapturedSpan {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Default)]
struct State {
    spans: Vec<CapturedSpan>,
    events: Vec<CapturedEvent>,
    live: HashMap<Id, usize>,
}

#[derive(Clone, Default)]
pub struct FieldCapture {
    state: Arc<Mutex<State>>,
}

impl FieldCapture {
    pub fn spans(&self) -> Vec<CapturedSpan> {
        self.state.lock().spans.clone()
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.state.lock().events.clone()
    }
}

struct FieldVisitor<'a>(&'a mut HashMap<String, String>);

impl Visit for FieldVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

impl<S> Layer<S> for FieldCapture
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, _ctx: Context<'_, S>) {
        let mut span = CapturedSpan {
            name: attrs.metadata().name().to_string(),
            ..CapturedSpan::default()
        };
        attrs.record(&mut FieldVisitor(&mut span.fields));

        let mut state = self.state.lock();
        state.spans.push(span);
        let index = state.spans.len() - 1;
        state.live.insert(id.clone(), index);
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, _ctx: Context<'_, S>) {
        let mut state = self.state.lock();
        if let Some(&index) = state.live.get(id) {
            values.record(&mut FieldVisitor(&mut state.spans[index].fields));
        }
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut FieldVisitor(&mut fields));
        self.state.lock().events.push(CapturedEvent {
            level: *event.metadata().level(),
            fields,
        });
    }

    fn on_close(&self, id: Id, _ctx: Context<'_, S>) {
        let mut state = self.state.lock();
        if let Some(index) = state.live.remove(&id) {
            state.spans[index].closed = true;
        }
    }
}
