//! Platform seam
//!
//! One method per acquisition step and one per release step. The platform
//! owns the raw handles; [`ContextHandle`](crate::ContextHandle) owns the
//! ordering and decides which releases to run.
//!
//! Release methods are only called for steps whose acquisition succeeded, but
//! must still treat an already-null handle as released.

use glprobe_core::GlQueries;

use crate::config::{ContextConfig, PixelFormatRequest};
use crate::error::PlatformError;

pub trait Platform {
    /// Function table loaded against the live context.
    type Gl: GlQueries;

    /// Register the window class. Succeeds if it is already registered.
    fn register_class(&mut self) -> Result<(), PlatformError>;
    /// Create a hidden top-level window whose client area matches `config`.
    fn create_window(&mut self, config: &ContextConfig) -> Result<(), PlatformError>;
    fn acquire_surface(&mut self) -> Result<(), PlatformError>;
    /// Returns the platform's index for the closest matching format.
    fn choose_format(&mut self, request: &PixelFormatRequest) -> Result<i32, PlatformError>;
    fn apply_format(&mut self, index: i32, request: &PixelFormatRequest) -> Result<(), PlatformError>;
    fn create_context(&mut self) -> Result<(), PlatformError>;
    fn make_current(&mut self) -> Result<(), PlatformError>;
    fn load_functions(&mut self) -> Result<Self::Gl, PlatformError>;

    fn make_not_current(&mut self) -> Result<(), PlatformError>;
    fn delete_context(&mut self) -> Result<(), PlatformError>;
    fn release_surface(&mut self) -> Result<(), PlatformError>;
    fn destroy_window(&mut self) -> Result<(), PlatformError>;
    fn unregister_class(&mut self) -> Result<(), PlatformError>;
}
