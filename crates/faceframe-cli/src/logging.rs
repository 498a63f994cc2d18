//! Log filter setup for the replay binary.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Targets logged at info level unless `RUST_LOG` says otherwise. The
/// binary logs under its own crate name, separate from this library.
pub const DEFAULT_DIRECTIVES: [&str; 3] = ["faceframe_cli=info", "faceframe_replay=info", "faceframe_tracking=info"];

/// `RUST_LOG` filter with [`DEFAULT_DIRECTIVES`] added.
pub fn env_filter() -> Result<EnvFilter> {
    let mut filter = EnvFilter::from_default_env();
    for directive in DEFAULT_DIRECTIVES {
        filter = filter.add_directive(directive.parse()?);
    }
    Ok(filter)
}
