//! glprobe Render
//!
//! OpenGL context bootstrap with ordered acquisition and all-or-nothing
//! rollback, plus the capability probe that runs against the live context.

pub mod capabilities;
pub mod config;
pub mod context;
pub mod error;
pub mod platform;

#[cfg(any(test, feature = "stub"))]
pub mod stub;

#[cfg(target_os = "windows")]
pub mod wgl;

pub use capabilities::probe_capabilities;
pub use config::{ContextConfig, PixelFormatRequest};
pub use context::{is_context_live, BootstrapState, ContextHandle};
pub use error::{AcquireStep, BootstrapError, PlatformError, ReleaseStep, TeardownWarning};
pub use platform::Platform;

/// Platform backend for the current OS, if there is one.
#[cfg(target_os = "windows")]
pub type NativePlatform = wgl::WglPlatform;

/// Bootstrap a context on the native platform.
#[cfg(target_os = "windows")]
pub fn create_native_context(config: &ContextConfig) -> Result<ContextHandle<NativePlatform>, BootstrapError> {
    ContextHandle::create(wgl::WglPlatform::new(), config)
}
