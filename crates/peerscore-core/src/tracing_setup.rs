//! Tracing subscriber installation and span names.

use tracing_subscriber::EnvFilter;

use crate::constants::LOG_ENV_VAR;

/// Create the span one `compute()` call runs in.
#[macro_export]
macro_rules! estimate_span {
    ($estimator:expr, $users:expr, $content:expr, $reviews:expr) => {
        tracing::info_span!(
            $crate::tracing_setup::names::ESTIMATE,
            estimator = %$estimator,
            users = $users,
            content = $content,
            reviews = $reviews
        )
    };
}

/// Create the span one performance evaluation runs in.
#[macro_export]
macro_rules! evaluate_span {
    ($estimator:expr, $resolution:expr) => {
        tracing::info_span!(
            $crate::tracing_setup::names::EVALUATE,
            estimator = %$estimator,
            resolution = $resolution
        )
    };
}

/// Span names, for filtering and for matching spans in tests.
pub mod names {
    pub const ESTIMATE: &str = "peerscore.estimate";
    pub const EVALUATE: &str = "peerscore.evaluate";
}

/// Install a global fmt subscriber.
///
/// Filter directives come from `PEERSCORE_LOG` when set, otherwise from
/// `default_directives`. Returns `false` if a global subscriber was already
/// installed, so repeated calls from tests are harmless.
pub fn init_tracing(default_directives: &str) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
