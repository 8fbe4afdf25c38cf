use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::IndicatifLayer;
use tracing_indicatif::span_ext::IndicatifSpanExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use exposr_core::engine::ProgressCallback;

use crate::terminal::logging::ExposrFormatter;

const DEFAULT_FILTER: &str = "info,hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn";
const QUIET_FILTER: &str = "warn";

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logging(quiet: bool) {
    let indicatif_layer = IndicatifLayer::new();

    let default_filter = if quiet { QUIET_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(ExposrFormatter)
                .with_writer(indicatif_layer.get_stderr_writer()),
        )
        .with(indicatif_layer)
        .init();
}

/// A span that renders as a progress bar over `total` targets while entered.
pub fn query_progress(total: usize) -> Span {
    let span = info_span!("query");

    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.blue} [{bar:32.cyan/blue}] {pos}/{len} hosts {elapsed_precise}",
    ) {
        span.pb_set_style(&style.tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]));
    }
    span.pb_set_length(total as u64);

    span
}

/// Moves the bar of `span` forward as the engine finishes targets.
pub fn progress_callback(span: Span) -> ProgressCallback {
    Box::new(move |done, _total| span.pb_set_position(done as u64))
}
