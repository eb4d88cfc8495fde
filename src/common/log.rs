use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_tree::HierarchicalLayer;

/// Installs a stderr subscriber that nests events under their spans.
///
/// The filter comes from `RUST_LOG` and defaults to `warn`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let tree = HierarchicalLayer::default()
        .with_indent_amount(2)
        .with_targets(true)
        .with_bracketed_fields(true);

    // A subscriber may already be installed, e.g. by a test harness.
    let _ = tracing_subscriber::registry().with(filter).with(tree).try_init();
}
