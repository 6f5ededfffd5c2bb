#![forbid(unsafe_code)]

//! Tracing layer that writes formatted events to the browser console.
//!
//! Events are routed through an explicit [`ConsoleSink`]. In the browser each
//! record becomes one `console.*` call picked by level; tests use
//! [`ConsoleSink::capture`] and inspect the lines.
//!
//! ```
//! use folio_web::logging::{BrowserConsoleLayer, ConsoleSink};
//! use tracing_subscriber::prelude::*;
//!
//! let sink = ConsoleSink::capture();
//! let subscriber = tracing_subscriber::registry().with(BrowserConsoleLayer::new(sink.clone()));
//! tracing::subscriber::with_default(subscriber, || tracing::info!(target: "folio", cards = 3, "ready"));
//! assert_eq!(sink.lines()[0].text, "INFO  folio: ready cards=3");
//! ```

use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Filter used when the configured directive does not parse.
pub const FALLBACK_FILTER: &str = "info";

/// Build the level filter for a `log_level` directive such as `"debug"` or
/// `"folio_core=trace,info"`.
#[must_use]
pub fn env_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER))
}

/// One formatted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub level: Level,
    pub text: String,
}

/// Where formatted records go.
#[derive(Debug, Clone)]
pub enum ConsoleSink {
    /// `console.error` / `warn` / `info` / `debug` in the page.
    #[cfg(target_arch = "wasm32")]
    Browser,
    /// In-memory buffer.
    Capture(Arc<Mutex<Vec<ConsoleLine>>>),
}

impl ConsoleSink {
    #[must_use]
    pub fn capture() -> Self {
        Self::Capture(Arc::default())
    }

    /// Captured lines; empty for the browser sink.
    #[must_use]
    pub fn lines(&self) -> Vec<ConsoleLine> {
        match self {
            #[cfg(target_arch = "wasm32")]
            Self::Browser => Vec::new(),
            Self::Capture(lines) => lines.lock().map(|l| l.clone()).unwrap_or_default(),
        }
    }

    fn write(&self, line: ConsoleLine) {
        match self {
            #[cfg(target_arch = "wasm32")]
            Self::Browser => {
                let text = wasm_bindgen::JsValue::from_str(&line.text);
                match line.level {
                    Level::ERROR => web_sys::console::error_1(&text),
                    Level::WARN => web_sys::console::warn_1(&text),
                    Level::INFO => web_sys::console::info_1(&text),
                    Level::DEBUG | Level::TRACE => web_sys::console::debug_1(&text),
                }
            }
            Self::Capture(lines) => {
                if let Ok(mut lines) = lines.lock() {
                    lines.push(line);
                }
            }
        }
    }
}

fn level_str(level: Level) -> &'static str {
    match level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARN ",
        Level::INFO => "INFO ",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    fields: Vec<(&'static str, String)>,
}

impl EventVisitor {
    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.push((field.name(), value));
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, value.to_string());
    }
}

/// A `tracing_subscriber::Layer` formatting each event as
/// `LEVEL target: message key=value ...`.
#[derive(Debug, Clone)]
pub struct BrowserConsoleLayer {
    sink: ConsoleSink,
}

impl BrowserConsoleLayer {
    #[must_use]
    pub const fn new(sink: ConsoleSink) -> Self {
        Self { sink }
    }

    fn format(event: &Event<'_>) -> String {
        let meta = event.metadata();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let mut out = format!("{} {}:", level_str(*meta.level()), meta.target());
        if let Some(message) = visitor.message {
            let _ = write!(out, " {message}");
        }
        for (name, value) in visitor.fields {
            let _ = write!(out, " {name}={value}");
        }
        out
    }
}

impl<S: Subscriber> Layer<S> for BrowserConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        self.sink.write(ConsoleLine {
            level: *event.metadata().level(),
            text: Self::format(event),
        });
    }
}

/// Install the browser console subscriber. Later calls are no-ops.
#[cfg(target_arch = "wasm32")]
pub(crate) fn init(directive: &str) {
    use tracing_subscriber::prelude::*;

    let _ = tracing_subscriber::registry()
        .with(env_filter(directive))
        .with(BrowserConsoleLayer::new(ConsoleSink::Browser))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::prelude::*;

    fn capture_with(directive: &str, f: impl FnOnce()) -> Vec<ConsoleLine> {
        let sink = ConsoleSink::capture();
        let subscriber = tracing_subscriber::registry()
            .with(env_filter(directive))
            .with(BrowserConsoleLayer::new(sink.clone()));
        tracing::subscriber::with_default(subscriber, f);
        sink.lines()
    }

    #[test]
    fn formats_level_target_message_and_fields() {
        let lines = capture_with("trace", || {
            tracing::warn!(target: "folio", width = 320.5, mobile = true, "resized");
        });
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].level, Level::WARN);
        assert_eq!(lines[0].text, "WARN  folio: resized width=320.5 mobile=true");
    }

    #[test]
    fn filter_drops_quieter_levels() {
        let lines = capture_with("warn", || {
            tracing::info!("hidden");
            tracing::error!("shown");
        });
        assert_eq!(lines.len(), 1);
        assert!(lines[0].text.ends_with("shown"));
    }

    #[test]
    fn bad_directive_falls_back_to_info() {
        let lines = capture_with("folio=loudest", || {
            tracing::debug!("hidden");
            tracing::info!("shown");
        });
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].level, Level::INFO);
    }
}
