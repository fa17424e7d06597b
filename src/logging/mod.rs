use crate::logging::consts::MARKER_FIELD;
use crate::logging::quickwit::QuickwitLoggingLayerBuilder;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use url::Url;

pub mod consts;
pub mod quickwit;

/// Must be called from within a Tokio runtime when `quickwit_url` is set.
pub fn init(quickwit_url: Option<&Url>) {
    let quickwit_logging_layer = quickwit_url.map(|url| {
        QuickwitLoggingLayerBuilder::new(url.clone())
            .marker_field(MARKER_FIELD)
            .map_marker_to_index("http_request", "http_requests")
            .map_marker_to_index("round_submitted", "round_results")
            .map_marker_to_index("imagery_backfill", "imagery_backfills")
            .build()
    });
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("geogpt_server=info"));
    tracing_subscriber::registry()
        .with(quickwit_logging_layer)
        .with(env_filter)
        .with(fmt::layer())
        .init();
}
