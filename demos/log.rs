use {
    tracing_appender::non_blocking::WorkerGuard,
    tracing_subscriber::{
        layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
        EnvFilter,
        Layer as _,
    },
};

/// Filter used when `RUST_LOG` is unset. Only the SDK's own diagnostics are
/// of interest; dependencies stay at `warn`.
const DEFAULT_DIRECTIVES: &str = "warn,faucet_client=info";
const VERBOSE_DIRECTIVES: &str = "warn,faucet_client=debug";

/// Logs SDK diagnostics to stderr so they don't mix with the command output
/// on stdout. `RUST_LOG` takes precedence over `verbose`.
pub fn init(verbose: bool) -> WorkerGuard {
    let directives = if verbose {
        VERBOSE_DIRECTIVES
    } else {
        DEFAULT_DIRECTIVES
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    let layer = tracing_subscriber::fmt::layer()
        .compact()
        .without_time()
        .with_target(verbose)
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(filter);

    tracing_subscriber::registry().with(layer).init();

    guard
}
