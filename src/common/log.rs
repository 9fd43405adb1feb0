use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};
use tracing_tree::HierarchicalLayer;

const DEFAULT_FILTER: &str = "glass_wm=info,replay=info";

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
/// Calling this twice is harmless; the second install is ignored.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = Registry::default()
        .with(filter)
        .with(
            HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_targets(true)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
