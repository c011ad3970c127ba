//! Core definitions (errors, results and cancellation), relied upon by all namedex-* crates.

pub mod async_runtime;
pub mod cancellation;
pub mod error;
pub mod result;

pub use cancellation::CancellationToken;
pub use result::Result;
