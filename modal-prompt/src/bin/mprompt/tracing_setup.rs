//! Tracing configuration for the mprompt binary.
//!
//! Library code logs through the `log` facade; the subscriber installed here
//! picks those records up along with native tracing events. Messages
//! matching a configured pattern (by default the widget's `shown` lifecycle
//! chatter) are dropped before they reach the output.

use std::fs::File;
use std::io;
use std::sync::Mutex;

use modal_prompt::config::LoggingConfig;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Event formatter that swallows lines containing any suppressed pattern.
struct SuppressingFormatter {
    inner: fmt::format::Format,
    patterns: Vec<String>,
}

impl<S, N> FormatEvent<S, N> for SuppressingFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let mut line = String::new();
        self.inner.format_event(ctx, Writer::new(&mut line), event)?;

        if self.patterns.iter().any(|pattern| line.contains(pattern.as_str())) {
            return Ok(());
        }
        write!(writer, "{line}")
    }
}

/// Install the global subscriber described by `config`.
///
/// `RUST_LOG` takes precedence over the configured level. Output goes to
/// the configured log file, or stderr when none is set or it cannot be
/// created.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let log_file = config.log_file.as_ref().and_then(|path| match File::create(path) {
        Ok(file) => Some(file),
        Err(err) => {
            eprintln!("Cannot open log file {}: {err}", path.display());
            None
        }
    });
    let to_file = log_file.is_some();
    let writer = match log_file {
        Some(file) => BoxMakeWriter::new(Mutex::new(file)),
        None => BoxMakeWriter::new(io::stderr),
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_ansi(!to_file)
        .with_writer(writer)
        .event_format(SuppressingFormatter {
            inner: fmt::format::Format::default(),
            patterns: config.suppressed_patterns.clone(),
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
