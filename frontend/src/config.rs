//! Build-time configuration.

/// Base URL of the REST API. Empty means same-origin, which is what the
/// dev proxy and the bundled deployment use; override it with
/// `SWEETSHOP_API_BASE` at build time.
pub const API_BASE: &str = match option_env!("SWEETSHOP_API_BASE") {
    Some(url) => url,
    None => "",
};

/// How long a success toast stays on screen, in seconds.
pub const TOAST_SECS: u64 = 3;
