use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the hierarchical stderr subscriber.
///
/// Safe to call more than once. Does nothing unless `RUST_LOG` is set, so
/// stdout stays a clean JSON channel either way.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let tree = tracing_tree::HierarchicalLayer::new(2)
                .with_writer(std::io::stderr)
                .with_targets(true)
                .with_indent_lines(true);
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(tree)
                .init();
        }
    });
}
