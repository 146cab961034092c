use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

/// Default directives when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,holdem_engine=debug,holdem_ai=debug";

/// One captured tracing event.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// In-memory sink for tracing events, shared by clone.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|e| e.clone())
            .unwrap_or_default()
    }

    /// First entry with this message.
    pub fn find(&self, message: &str) -> Option<LogEntry> {
        self.entries().into_iter().find(|e| e.message == message)
    }

    pub fn count(&self, message: &str) -> usize {
        self.entries()
            .iter()
            .filter(|e| e.message == message)
            .count()
    }

    pub fn clear(&self) {
        if let Ok(mut e) = self.entries.lock() {
            e.clear();
        }
    }
}

impl<S: Subscriber> Layer<S> for LogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut record = EventRecord::default();
        event.record(&mut record);
        let meta = event.metadata();
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(LogEntry {
                level: *meta.level(),
                target: meta.target().to_owned(),
                message: record.message,
                fields: record.fields,
            });
        }
    }
}

#[derive(Default)]
struct EventRecord {
    message: String,
    fields: Vec<(String, String)>,
}

impl EventRecord {
    fn push(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = value,
            name => self.fields.push((name.to_owned(), value)),
        }
    }
}

impl Visit for EventRecord {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_owned());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, format!("{value:?}"));
    }
}

/// Install the process-wide fmt subscriber. Returns false if one was
/// already installed.
pub fn init_logging() -> bool {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).is_ok()
}

/// Route events to a shared in-memory subscriber. Cleared on every call.
pub fn init_test_logging() -> LogCapture {
    static CAPTURE: OnceLock<LogCapture> = OnceLock::new();

    let capture = CAPTURE.get_or_init(|| {
        let capture = LogCapture::new();
        // another global subscriber may already be installed
        let _ = tracing::subscriber::set_global_default(
            Registry::default().with(capture.clone()),
        );
        capture
    });
    capture.clear();
    capture.clone()
}
