//! Recording layer for asserting spans and events emitted under test.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::{LookupSpan, Registry};

/// Layer that keeps every closed span and emitted event in memory.
///
/// Clones share the same buffers, so a test can hand one clone to a
/// subscriber and inspect another afterwards.
#[derive(Clone, Default)]
pub struct RecordingLayer {
    spans: Arc<Mutex<Vec<SpanRecord>>>,
    events: Arc<Mutex<Vec<EventRecord>>>,
}

impl RecordingLayer {
    /// Runs `body` with a registry subscriber carrying a fresh recording
    /// layer installed as the thread default, then returns both the body's
    /// output and the layer.
    ///
    /// # Examples
    /// ```
    /// use wuf_test_support::tracing::RecordingLayer;
    ///
    /// let (value, layer) = RecordingLayer::capture(|| {
    ///     tracing::info!(answer = 42, "computed");
    ///     7
    /// });
    /// assert_eq!(value, 7);
    /// assert_eq!(layer.events().len(), 1);
    /// ```
    pub fn capture<T>(body: impl FnOnce() -> T) -> (T, Self) {
        let layer = Self::default();
        let subscriber = Registry::default().with(layer.clone());
        let value = tracing::subscriber::with_default(subscriber, body);
        (value, layer)
    }

    /// Closed spans in completion order.
    #[must_use]
    pub fn spans(&self) -> Vec<SpanRecord> {
        lock(&self.spans).clone()
    }

    /// Emitted events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        lock(&self.events).clone()
    }

    /// Returns the first closed span called `name`, if any.
    #[must_use]
    pub fn span_named(&self, name: &str) -> Option<SpanRecord> {
        lock(&self.spans).iter().find(|span| span.name == name).cloned()
    }
}

fn lock<T>(buffer: &Mutex<T>) -> MutexGuard<'_, T> {
    buffer.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Name and fields of a closed span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanRecord {
    /// Span name from the callsite metadata.
    pub name: String,
    /// Fields recorded at creation or later through `Span::record`.
    pub fields: HashMap<String, String>,
}

/// Level, target and fields of an emitted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Level of the event.
    pub level: Level,
    /// Target of the event, normally the emitting module path.
    pub target: String,
    /// Structured fields, including `message` when one was given.
    pub fields: HashMap<String, String>,
}

impl EventRecord {
    /// The formatted message, if the event carried one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").map(String::as_str)
    }
}

struct PendingSpan(SpanRecord);

impl<S> Layer<S> for RecordingLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut record = SpanRecord {
            name: attrs.metadata().name().to_owned(),
            fields: HashMap::new(),
        };
        attrs.record(&mut FieldRecorder(&mut record.fields));
        span.extensions_mut().insert(PendingSpan(record));
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if let Some(PendingSpan(record)) = span.extensions_mut().get_mut::<PendingSpan>() {
            values.record(&mut FieldRecorder(&mut record.fields));
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        if let Some(PendingSpan(record)) = span.extensions_mut().remove::<PendingSpan>() {
            lock(&self.spans).push(record);
        }
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut FieldRecorder(&mut fields));
        let metadata = event.metadata();
        lock(&self.events).push(EventRecord {
            level: *metadata.level(),
            target: metadata.target().to_owned(),
            fields,
        });
    }
}

struct FieldRecorder<'a>(&'a mut HashMap<String, String>);

impl FieldRecorder<'_> {
    fn put(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_owned(), value);
    }
}

impl Visit for FieldRecorder<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_owned());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.put(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_span_fields_set_after_creation() {
        let ((), layer) = RecordingLayer::capture(|| {
            let span = tracing::info_span!("outer", count = tracing::field::Empty);
            span.record("count", 3_u64);
        });
        let span = layer.span_named("outer").expect("span recorded");
        assert_eq!(span.fields.get("count").map(String::as_str), Some("3"));
    }

    #[test]
    fn records_event_messages_and_levels() {
        let ((), layer) = RecordingLayer::capture(|| {
            tracing::warn!(key = "a", "missing");
        });
        let events = layer.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, Level::WARN);
        assert_eq!(events[0].message(), Some("missing"));
        assert_eq!(events[0].fields.get("key").map(String::as_str), Some("a"));
    }

    #[test]
    fn clones_share_buffers() {
        let layer = RecordingLayer::default();
        let subscriber = Registry::default().with(layer.clone());
        tracing::subscriber::with_default(subscriber, || tracing::info!("shared"));
        assert_eq!(layer.events().len(), 1);
    }
}
