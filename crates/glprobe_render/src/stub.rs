//! Fault-injecting platform
//!
//! Stands in for the windowing system in tests. Every acquisition can be
//! forced to fail, every release can be forced to fail, and a shared
//! [`Ledger`] records what is held and in which order calls were made.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use glprobe_core::testing::ScriptedGl;

use crate::config::{ContextConfig, PixelFormatRequest};
use crate::error::{AcquireStep, PlatformError, ReleaseStep};
use crate::platform::Platform;

/// OS error code reported by injected failures (`ERROR_INVALID_HANDLE`).
pub const INJECTED_ERROR: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Resource {
    Class,
    Window,
    Surface,
    Context,
    Current,
}

#[derive(Debug, Default)]
struct LedgerState {
    held: BTreeSet<Resource>,
    log: Vec<String>,
}

/// Shared view of the stub's resource accounting.
#[derive(Debug, Clone, Default)]
pub struct Ledger(Rc<RefCell<LedgerState>>);

impl Ledger {
    /// Number of resources currently held.
    pub fn held(&self) -> usize {
        self.0.borrow().held.len()
    }

    pub fn holds(&self, resource: Resource) -> bool {
        self.0.borrow().held.contains(&resource)
    }

    /// Every platform call made so far, in order.
    pub fn log(&self) -> Vec<String> {
        self.0.borrow().log.clone()
    }

    fn push(&self, entry: String) {
        self.0.borrow_mut().log.push(entry);
    }

    fn acquire(&self, resource: Resource) {
        self.push(format!("acquire {resource:?}"));
        self.0.borrow_mut().held.insert(resource);
    }

    fn release(&self, resource: Resource) {
        if self.0.borrow_mut().held.remove(&resource) {
            self.push(format!("release {resource:?}"));
        }
    }
}

pub struct StubPlatform {
    ledger: Ledger,
    gl: ScriptedGl,
    fail_at: Option<AcquireStep>,
    failing_releases: Vec<ReleaseStep>,
    window_size: Option<(u32, u32)>,
    applied_format: Option<PixelFormatRequest>,
}

impl StubPlatform {
    pub fn new() -> Self {
        Self::with_gl(ScriptedGl::new())
    }

    /// A platform whose loaded function table answers from `gl`.
    pub fn with_gl(gl: ScriptedGl) -> Self {
        Self {
            ledger: Ledger::default(),
            gl,
            fail_at: None,
            failing_releases: Vec::new(),
            window_size: None,
            applied_format: None,
        }
    }

    pub fn fail_at(mut self, step: AcquireStep) -> Self {
        self.fail_at = Some(step);
        self
    }

    pub fn fail_release(mut self, step: ReleaseStep) -> Self {
        self.failing_releases.push(step);
        self
    }

    pub fn ledger(&self) -> Ledger {
        self.ledger.clone()
    }

    /// Client size the window was created with.
    pub fn window_size(&self) -> Option<(u32, u32)> {
        self.window_size
    }

    pub fn applied_format(&self) -> Option<PixelFormatRequest> {
        self.applied_format
    }

    fn check(&self, step: AcquireStep, operation: &'static str) -> Result<(), PlatformError> {
        if self.fail_at == Some(step) {
            self.ledger.push(format!("fail {step:?}"));
            return Err(PlatformError::new(operation, INJECTED_ERROR));
        }
        Ok(())
    }

    fn release(&self, step: ReleaseStep, resource: Resource, operation: &'static str) -> Result<(), PlatformError> {
        if self.failing_releases.contains(&step) {
            self.ledger.push(format!("fail {step:?}"));
            return Err(PlatformError::new(operation, INJECTED_ERROR));
        }
        self.ledger.release(resource);
        Ok(())
    }
}

impl Default for StubPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for StubPlatform {
    type Gl = ScriptedGl;

    fn register_class(&mut self) -> Result<(), PlatformError> {
        self.check(AcquireStep::RegisterClass, "RegisterClass")?;
        self.ledger.acquire(Resource::Class);
        Ok(())
    }

    fn create_window(&mut self, config: &ContextConfig) -> Result<(), PlatformError> {
        self.check(AcquireStep::CreateWindow, "CreateWindowEx")?;
        self.window_size = Some((config.width, config.height));
        self.ledger.acquire(Resource::Window);
        Ok(())
    }

    fn acquire_surface(&mut self) -> Result<(), PlatformError> {
        self.check(AcquireStep::AcquireSurface, "GetDC")?;
        self.ledger.acquire(Resource::Surface);
        Ok(())
    }

    fn choose_format(&mut self, _request: &PixelFormatRequest) -> Result<i32, PlatformError> {
        self.check(AcquireStep::ChooseFormat, "ChoosePixelFormat")?;
        self.ledger.push("choose format".to_owned());
        Ok(1)
    }

    fn apply_format(&mut self, _index: i32, request: &PixelFormatRequest) -> Result<(), PlatformError> {
        self.check(AcquireStep::ApplyFormat, "SetPixelFormat")?;
        self.ledger.push("apply format".to_owned());
        self.applied_format = Some(*request);
        Ok(())
    }

    fn create_context(&mut self) -> Result<(), PlatformError> {
        self.check(AcquireStep::CreateContext, "wglCreateContext")?;
        self.ledger.acquire(Resource::Context);
        Ok(())
    }

    fn make_current(&mut self) -> Result<(), PlatformError> {
        self.check(AcquireStep::MakeCurrent, "wglMakeCurrent")?;
        self.ledger.acquire(Resource::Current);
        Ok(())
    }

    fn load_functions(&mut self) -> Result<ScriptedGl, PlatformError> {
        self.check(AcquireStep::LoadFunctions, "wglGetProcAddress")?;
        self.ledger.push("load functions".to_owned());
        Ok(self.gl.clone())
    }

    fn make_not_current(&mut self) -> Result<(), PlatformError> {
        self.release(ReleaseStep::MakeNotCurrent, Resource::Current, "wglMakeCurrent")
    }

    fn delete_context(&mut self) -> Result<(), PlatformError> {
        self.release(ReleaseStep::DeleteContext, Resource::Context, "wglDeleteContext")
    }

    fn release_surface(&mut self) -> Result<(), PlatformError> {
        self.release(ReleaseStep::ReleaseSurface, Resource::Surface, "ReleaseDC")
    }

    fn destroy_window(&mut self) -> Result<(), PlatformError> {
        self.release(ReleaseStep::DestroyWindow, Resource::Window, "DestroyWindow")
    }

    fn unregister_class(&mut self) -> Result<(), PlatformError> {
        self.release(ReleaseStep::UnregisterClass, Resource::Class, "UnregisterClass")
    }
}

/// Serializes tests that create contexts; only one may be live per process.
#[cfg(test)]
pub(crate) fn serial() -> std::sync::MutexGuard<'static, ()> {
    static SERIAL: std::sync::Mutex<()> = std::sync::Mutex::new(());
    SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
