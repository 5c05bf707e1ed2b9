//! src/logging.rs
//! ============================================================
//! Tracing setup for the console: a daily-rolling file sink under
//! `logs/` carries everything at `info` and above, while stderr
//! only shows `warn`+ so it never fights the rendered output.

use std::{
    fs,
    path::Path,
    sync::OnceLock,
    sync::atomic::{AtomicUsize, Ordering},
};

use tracing_appender::rolling::daily;
use tracing_subscriber::{
    EnvFilter, fmt,
    fmt::format::{FormatEvent, FormatFields, Writer},
    layer::SubscriberExt,
    prelude::*,
};

static SEQ: OnceLock<AtomicUsize> = OnceLock::new();

pub struct Logger;

impl Logger {
    /// Call **once** near the start of `main`.
    pub fn init_tracing() {
        let log_dir: &Path = Path::new("logs");
        fs::create_dir_all(log_dir).expect("cannot create logs dir");

        SEQ.get_or_init(|| AtomicUsize::new(1));

        // logs/kb-console-YYYY-MM-DD.log
        let file_layer = fmt::layer()
            .event_format(CompactLine)
            .with_writer(daily(log_dir, "kb-console"))
            .with_ansi(false)
            .with_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()));

        // stderr stays quiet below warn; stdout belongs to the renderer
        let stderr_layer = fmt::layer()
            .event_format(CompactLine)
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()));

        tracing_subscriber::registry()
            .with(file_layer)
            .with(stderr_layer)
            .init();
    }
}

/// `NNNNNN LEVEL [file:line module] message`
struct CompactLine;

impl<S, N> FormatEvent<S, N> for CompactLine
where
    S: tracing::Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &fmt::FmtContext<'_, S, N>,
        mut w: Writer<'_>,
        ev: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let seq = SEQ
            .get()
            .expect("SEQ not initialised")
            .fetch_add(1, Ordering::Relaxed);

        let meta = ev.metadata();
        write!(
            w,
            "{seq:06} {:5} [{}:{} {}] ",
            meta.level(),
            meta.file().unwrap_or("??"),
            meta.line().unwrap_or(0),
            meta.module_path().unwrap_or("???"),
        )?;

        ctx.field_format().format_fields(w.by_ref(), ev)?;
        writeln!(w)
    }
}
