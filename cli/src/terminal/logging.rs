use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

/// Target used by [`crate::terminal::print`] for undecorated output.
pub const PRINT_TARGET: &str = "exposr::print";
const SUCCESS_TARGET: &str = "exposr::success";

pub struct ExposrFormatter;

impl<S, N> FormatEvent<S, N> for ExposrFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        if meta.target() != PRINT_TARGET {
            let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) =
                match (*meta.level(), meta.target()) {
                    (Level::INFO, SUCCESS_TARGET) => ("[+]", |s| s.green().bold()),
                    (Level::TRACE, _) => ("[ ]", |s| s.dimmed()),
                    (Level::DEBUG, _) => ("[?]", |s| s.blue()),
                    (Level::INFO, _) => ("[*]", |s| s.cyan().bold()),
                    (Level::WARN, _) => ("[!]", |s| s.yellow().bold()),
                    _ => ("[-]", |s| s.red().bold()),
                };

            write!(writer, "{} ", color_func(symbol.into()))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}
