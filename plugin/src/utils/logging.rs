use std::fmt::Write as _;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Layer, Registry};

use crate::host::{LogLevel, LogSink, COMPONENT};

/// Where host-bound log lines go.
///
/// The global subscriber is installed once per process; plugin init and
/// shutdown swap the destination here.
pub struct HostSinkSlot {
    sink: RwLock<Option<Arc<dyn LogSink>>>,
}

impl HostSinkSlot {
    pub const fn new() -> Self {
        Self {
            sink: parking_lot::const_rwlock(None),
        }
    }

    pub fn set(&self, sink: Option<Arc<dyn LogSink>>) {
        *self.sink.write() = sink;
    }

    pub fn get(&self) -> Option<Arc<dyn LogSink>> {
        self.sink.read().clone()
    }
}

impl Default for HostSinkSlot {
    fn default() -> Self {
        Self::new()
    }
}

static HOST_SINK: HostSinkSlot = HostSinkSlot::new();
static FILTER: Mutex<Option<reload::Handle<EnvFilter, Registry>>> =
    parking_lot::const_mutex(None);

/// Route host-bound log lines to `sink`, or drop them when `None`
pub fn set_host_sink(sink: Option<Arc<dyn LogSink>>) {
    HOST_SINK.set(sink);
}

/// Forwards tracing events to the host client's log.
///
/// Every line is tagged with the plugin's component name so it can be
/// filtered in the client's log view. Events are dropped while the slot
/// is empty.
pub struct HostLogLayer {
    slot: &'static HostSinkSlot,
}

impl HostLogLayer {
    pub fn new(slot: &'static HostSinkSlot) -> Self {
        Self { slot }
    }

    /// Layer reading the process-wide slot updated by [`set_host_sink`]
    pub fn global() -> Self {
        Self::new(&HOST_SINK)
    }
}

/// Map a tracing level onto the host's log levels
pub fn host_level(level: &Level) -> LogLevel {
    match *level {
        Level::ERROR => LogLevel::Error,
        Level::WARN => LogLevel::Warning,
        Level::INFO => LogLevel::Info,
        Level::DEBUG => LogLevel::Debug,
        Level::TRACE => LogLevel::Devel,
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

impl<S: Subscriber> Layer<S> for HostLogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let Some(sink) = self.slot.get() else {
            return;
        };
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let line = format!("{}{}", visitor.message, visitor.fields);
        sink.log(host_level(event.metadata().level()), COMPONENT, &line);
    }
}

/// Initialize logging with tracing
///
/// This function sets up the tracing subscriber with the following configuration:
/// - Reads filter from RUST_LOG environment variable if available
/// - Falls back to `default_filter` if RUST_LOG is not set
/// - Uses a formatted output layer
/// - Forwards events to the host log through [`set_host_sink`]
///
/// The filter can be replaced later with [`set_log_filter`], so logging can
/// start before the plugin config is read.
///
/// Returns false when a global subscriber was already installed, which
/// happens when the host reloads the plugin without unloading the library.
///
/// # Example
///
/// ```no_run
/// use tsg_lib::utils::logging::init_logging;
///
/// init_logging("tsg_lib=debug,warn");
/// ```
pub fn init_logging(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_FILTER));
    let (filter, handle) = reload::Layer::new(filter);

    let mut slot = FILTER.lock();
    let initialized = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(HostLogLayer::global())
        .try_init()
        .is_ok();

    if initialized {
        *slot = Some(handle);
        drop(slot);
        tracing::info!("TSG logging initialized");
    }
    initialized
}

/// Replace the active filter
///
/// RUST_LOG keeps precedence. Returns false when the filter was not
/// changed.
pub fn set_log_filter(filter: &str) -> bool {
    if std::env::var_os("RUST_LOG").is_some() {
        return false;
    }
    let slot = FILTER.lock();
    let Some(handle) = slot.as_ref() else {
        return false;
    };

    match EnvFilter::try_new(filter) {
        Ok(filter) => handle.reload(filter).is_ok(),
        Err(e) => {
            drop(slot);
            tracing::warn!(error = %e, filter, "Invalid log filter, keeping the current one");
            false
        }
    }
}
