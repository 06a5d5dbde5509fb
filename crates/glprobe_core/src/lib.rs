//! glprobe Core
//!
//! Contains the capability probe that runs against a live OpenGL context:
//! - Driver query seam (`GlQueries`)
//! - Identity strings and numeric limits
//! - Extension enumeration (indexed and legacy strategies)
//! - Extension classification by origin

pub mod classify;
pub mod gl;
pub mod probe;
pub mod report;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use classify::{classify, category_of, OTHER};
pub use gl::GlQueries;
pub use probe::{query_extensions, query_identity, query_limits, Identity, Limits, UNKNOWN};
pub use report::{AdapterReport, ViewportDimensions};

/// Probe version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
