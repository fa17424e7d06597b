use crate::logging::consts::{DEFAULT_LOGGING_BATCH_SIZE, QUICKWIT_LOGGING_CHANNEL_CAPACITY};
use reqwest::Client;
use std::collections::HashMap;
use std::io;
use tokio::sync::mpsc;
use tokio::task;
use tracing::field::{Field, Visit};
use tracing_core::Event;
use tracing_core::Subscriber;
use tracing_subscriber::layer::Context as TracingContext;
use tracing_subscriber::Layer;
use url::Url;

type LogRecord = serde_json::Map<String, serde_json::Value>;

/// Builds a layer that forwards marked events to Quickwit indexes in ndjson batches.
///
/// Only events carrying the marker field with a value mapped through
/// [`map_marker_to_index`](Self::map_marker_to_index) are shipped. Everything else is left to
/// the other layers.
pub struct QuickwitLoggingLayerBuilder {
    quickwit_url: Url,
    marker_field: String,
    marker_to_index: HashMap<String, String>,
    batch_size: usize,
}

impl QuickwitLoggingLayerBuilder {
    pub fn new(quickwit_url: Url) -> Self {
        Self {
            quickwit_url,
            marker_field: String::new(),
            marker_to_index: HashMap::new(),
            batch_size: DEFAULT_LOGGING_BATCH_SIZE,
        }
    }

    pub fn marker_field(mut self, field: &str) -> Self {
        self.marker_field = field.to_string();
        self
    }

    pub fn map_marker_to_index(mut self, marker: &str, index_id: &str) -> Self {
        self.marker_to_index
            .insert(marker.to_string(), index_id.to_string());
        self
    }

    pub fn build(self) -> QuickwitLoggingLayer {
        let (sender, receiver) = mpsc::channel(QUICKWIT_LOGGING_CHANNEL_CAPACITY);
        let shipper = IndexShipper {
            http_client: Client::new(),
            quickwit_url: self.quickwit_url,
            batch_size: self.batch_size,
        };
        task::spawn(shipper.run(receiver));
        QuickwitLoggingLayer {
            sender,
            marker_field: self.marker_field,
            marker_to_index: self.marker_to_index,
        }
    }
}

pub struct QuickwitLoggingLayer {
    sender: mpsc::Sender<IndexedRecord>,
    marker_field: String,
    marker_to_index: HashMap<String, String>,
}

impl QuickwitLoggingLayer {
    fn index_for(&self, event: &Event<'_>) -> Option<String> {
        let mut visitor = MarkerVisitor {
            marker_field: &self.marker_field,
            marker: None,
        };
        event.record(&mut visitor);
        visitor
            .marker
            .and_then(|marker| self.marker_to_index.get(&marker).cloned())
    }
}

impl<S: Subscriber> Layer<S> for QuickwitLoggingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: TracingContext<'_, S>) {
        let Some(index_id) = self.index_for(event) else {
            return;
        };
        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);
        // Logging must never block a request, so a full channel drops the record.
        let _ = self.sender.try_send(IndexedRecord {
            index_id,
            record: visitor.record,
        });
    }
}

#[derive(Debug)]
struct IndexedRecord {
    index_id: String,
    record: LogRecord,
}

struct IndexShipper {
    http_client: Client,
    quickwit_url: Url,
    batch_size: usize,
}

impl IndexShipper {
    async fn run(self, mut receiver: mpsc::Receiver<IndexedRecord>) {
        let mut buffers: HashMap<String, Vec<LogRecord>> = HashMap::new();
        while let Some(IndexedRecord { index_id, record }) = receiver.recv().await {
            let buffer = buffers.entry(index_id.clone()).or_default();
            buffer.push(record);
            if buffer.len() >= self.batch_size {
                let batch = std::mem::take(buffer);
                self.ship(&index_id, &batch).await;
            }
        }
        for (index_id, batch) in buffers {
            if !batch.is_empty() {
                self.ship(&index_id, &batch).await;
            }
        }
    }

    async fn ship(&self, index_id: &str, batch: &[LogRecord]) {
        let body = match to_ndjson(batch) {
            Ok(body) => body,
            Err(err) => {
                eprintln!("Failed to serialize logs for `{index_id}`: {err}");
                return;
            }
        };
        let endpoint = match self
            .quickwit_url
            .join(&format!("api/v1/{index_id}/ingest"))
        {
            Ok(endpoint) => endpoint,
            Err(err) => {
                eprintln!("Invalid Quickwit ingest URL for `{index_id}`: {err}");
                return;
            }
        };
        // Reporting through `tracing` here would feed the layer its own failures.
        if let Err(err) = self.http_client.post(endpoint).body(body).send().await {
            eprintln!("Failed to ship logs to `{index_id}`: {err}");
        }
    }
}

struct MarkerVisitor<'a> {
    marker_field: &'a str,
    marker: Option<String>,
}

impl Visit for MarkerVisitor<'_> {
    fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == self.marker_field {
            self.marker = Some(value.to_string());
        }
    }
}

#[derive(Default)]
struct RecordVisitor {
    record: LogRecord,
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record.insert(field.name().to_string(), value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record.insert(field.name().to_string(), value.into());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record.insert(field.name().to_string(), value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record.insert(field.name().to_string(), value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record.insert(field.name().to_string(), value.into());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record
            .insert(field.name().to_string(), format!("{value:?}").into());
    }
}

pub(crate) fn to_ndjson(records: &[LogRecord]) -> io::Result<Vec<u8>> {
    let mut body = Vec::new();
    for record in records {
        serde_json::to_writer(&mut body, record)?;
        io::Write::write_all(&mut body, b"\n")?;
    }
    Ok(body)
}
