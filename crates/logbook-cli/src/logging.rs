//! Diagnostic logging.
//!
//! Logs go to stderr so they never mix with journal output on stdout.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::FmtSubscriber;

/// Install the global subscriber.
///
/// `--debug` forces the `debug` level; otherwise `RUST_LOG` decides,
/// defaulting to errors only.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Unable to set global default subscriber");
    }
}
