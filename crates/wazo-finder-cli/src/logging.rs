//! tracing subscriber setup.
//!
//! Logs go to stderr so stdout stays reserved for results.

use colored::{Color, Colorize};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

const CRATES: &[&str] = &["wazo_finder_core", "wazo_finder_cli"];

/// Compact `level: message` event format.
pub struct FinderFormatter;

/// Label and color for a level; trace is never enabled and shares debug's.
fn level_style(level: Level) -> (&'static str, Color) {
    match level {
        Level::ERROR => ("error", Color::Red),
        Level::WARN => ("warn", Color::Yellow),
        Level::INFO => ("info", Color::Green),
        _ => ("debug", Color::Blue),
    }
}

impl<S, N> FormatEvent<S, N> for FinderFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let (label, color) = level_style(*event.metadata().level());
        write!(writer, "{}: ", label.color(color).bold())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Filter directives for our crates; `RUST_LOG` wins when set.
pub fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "error" };
    CRATES
        .iter()
        .map(|c| format!("{}={}", c, level))
        .chain(std::iter::once("warn".to_string()))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .event_format(FinderFormatter)
        .try_init();
}
