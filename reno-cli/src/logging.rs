//! `tracing` setup for `reno-estimator`.
//!
//! The wizard owns stdout, so log lines are written to stderr. A log file
//! can be attached once settings are known, and the filter can be swapped
//! after start-up when settings name a different level than `RUST_LOG`.

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use anyhow::{Context, Result, anyhow, bail};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, reload};

const DEFAULT_FILTER: &str = "info";

/// `12:04:31.207  WARN reno_data::loader message key=value`
struct LineFormat;

fn level_colour(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
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
        let meta = event.metadata();
        let time = Local::now().format("%H:%M:%S%.3f");

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{time}\x1b[0m {}{:>5}\x1b[0m \x1b[36m{}\x1b[0m ",
                level_colour(*meta.level()),
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{time} {:>5} {} ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// The optional log file, shared between the subscriber and
/// [`enable_file_logging`].
type LogFile = Arc<Mutex<Option<File>>>;

/// Hands the file layer whatever file is attached; discards records until
/// one is.
#[derive(Clone)]
struct LogFileWriter(LogFile);

struct LockedLogFile<'a>(MutexGuard<'a, Option<File>>);

impl Write for LockedLogFile<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), File::flush)
    }
}

impl<'a> MakeWriter<'a> for LogFileWriter {
    type Writer = LockedLogFile<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LockedLogFile(self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

static LOG_FILE: OnceLock<LogFile> = OnceLock::new();
static FILTER: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();

/// Installs the global subscriber. Later calls do nothing.
///
/// The filter starts from `RUST_LOG`, or `info` when it is unset or invalid.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let (filter, handle) = reload::Layer::new(filter);
    let log_file: LogFile = Arc::new(Mutex::new(None));

    let stderr = tracing_subscriber::fmt::layer()
        .event_format(LineFormat)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);
    let file = tracing_subscriber::fmt::layer()
        .event_format(LineFormat)
        .with_ansi(false)
        .with_writer(LogFileWriter(Arc::clone(&log_file)));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(file)
        .try_init();
    if installed.is_ok() {
        let _ = FILTER.set(handle);
        let _ = LOG_FILE.set(log_file);
    }
}

/// Replaces the log filter. Takes a level such as `debug` or any
/// `EnvFilter` directive such as `reno_core=trace`.
pub fn set_log_level(directive: &str) -> Result<()> {
    let Some(handle) = FILTER.get() else {
        bail!("logging is not initialized");
    };
    let filter = EnvFilter::try_new(directive)
        .map_err(|e| anyhow!("invalid log level '{directive}': {e}"))?;
    handle
        .reload(filter)
        .map_err(|e| anyhow!("could not apply log level '{directive}': {e}"))
}

/// Appends log records to `path` from now on, replacing any file attached
/// earlier. The parent directory must exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let Some(slot) = LOG_FILE.get() else {
        bail!("logging is not initialized");
    };
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;
    *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(file);
    Ok(())
}
