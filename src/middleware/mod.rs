//! Cross-cutting HTTP middleware.
//!
//! Authentication gates live in `auth::middleware`; this module holds the
//! ones that apply to every route.

pub mod logging;

pub use logging::request_logging;
