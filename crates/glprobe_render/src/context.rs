//! Context bootstrap
//!
//! Acquires window, device surface, pixel format and rendering context in a
//! fixed order and loads the function table against the result. Progress is
//! tracked as a [`BootstrapState`]; teardown reads that state and releases
//! exactly what was acquired, whether it runs after a failed step or at normal
//! shutdown.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::ContextConfig;
use crate::error::{AcquireStep, BootstrapError, PlatformError, ReleaseStep, TeardownWarning};
use crate::platform::Platform;

/// Set while a context handle exists anywhere in the process.
static LIVE: AtomicBool = AtomicBool::new(false);

/// Bootstrap progress. Variants are ordered along the success path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BootstrapState {
    Uninitialized,
    ClassRegistered,
    WindowCreated,
    SurfaceAcquired,
    FormatApplied,
    ContextCreated,
    ContextActive,
    /// Terminal success state
    FunctionsLoaded,
    Destroyed,
}

impl BootstrapState {
    pub fn is_live(self) -> bool {
        self == BootstrapState::FunctionsLoaded
    }
}

/// The platform plus how far acquisition got. Tears itself down on drop.
struct Resources<P: Platform> {
    platform: P,
    state: BootstrapState,
}

impl<P: Platform> Resources<P> {
    fn step<T>(
        &mut self,
        step: AcquireStep,
        reached: BootstrapState,
        result: Result<T, PlatformError>,
    ) -> Result<T, BootstrapError> {
        match result {
            Ok(value) => {
                tracing::trace!(?step, state = ?reached, "bootstrap step complete");
                self.state = reached;
                Ok(value)
            }
            Err(source) => Err(step.fail(source)),
        }
    }

    fn acquire(&mut self, config: &ContextConfig) -> Result<P::Gl, BootstrapError> {
        use BootstrapState::*;

        let result = self.platform.register_class();
        self.step(AcquireStep::RegisterClass, ClassRegistered, result)?;

        let result = self.platform.create_window(config);
        self.step(AcquireStep::CreateWindow, WindowCreated, result)?;

        let result = self.platform.acquire_surface();
        self.step(AcquireStep::AcquireSurface, SurfaceAcquired, result)?;

        let format = config.pixel_format();
        let result = self.platform.choose_format(&format);
        let index = self.step(AcquireStep::ChooseFormat, SurfaceAcquired, result)?;
        tracing::debug!(index, ?format, "selected pixel format");
        let result = self.platform.apply_format(index, &format);
        self.step(AcquireStep::ApplyFormat, FormatApplied, result)?;

        let result = self.platform.create_context();
        self.step(AcquireStep::CreateContext, ContextCreated, result)?;

        let result = self.platform.make_current();
        self.step(AcquireStep::MakeCurrent, ContextActive, result)?;

        let result = self.platform.load_functions();
        self.step(AcquireStep::LoadFunctions, FunctionsLoaded, result)
    }

    /// Release everything acquired so far, newest first.
    ///
    /// Every release is attempted even if an earlier one failed. Failures are
    /// logged and returned, never raised.
    fn teardown(&mut self) -> Vec<TeardownWarning> {
        use BootstrapState::*;

        let reached = self.state;
        if reached == Destroyed {
            return Vec::new();
        }

        let mut warnings = Vec::new();
        if reached >= ContextActive {
            let result = self.platform.make_not_current();
            record(&mut warnings, ReleaseStep::MakeNotCurrent, result);
        }
        if reached >= ContextCreated {
            let result = self.platform.delete_context();
            record(&mut warnings, ReleaseStep::DeleteContext, result);
        }
        if reached >= SurfaceAcquired {
            let result = self.platform.release_surface();
            record(&mut warnings, ReleaseStep::ReleaseSurface, result);
        }
        if reached >= WindowCreated {
            let result = self.platform.destroy_window();
            record(&mut warnings, ReleaseStep::DestroyWindow, result);
        }
        if reached >= ClassRegistered {
            let result = self.platform.unregister_class();
            record(&mut warnings, ReleaseStep::UnregisterClass, result);
        }

        self.state = Destroyed;
        LIVE.store(false, Ordering::Release);
        tracing::debug!(from = ?reached, warnings = warnings.len(), "context torn down");
        warnings
    }
}

fn record(warnings: &mut Vec<TeardownWarning>, step: ReleaseStep, result: Result<(), PlatformError>) {
    if let Err(source) = result {
        let warning = TeardownWarning { step, source };
        tracing::debug!(error = %warning.source, "shutdown error: {warning}");
        warnings.push(warning);
    }
}

impl<P: Platform> Drop for Resources<P> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// A live rendering context.
///
/// Only one may exist per process. Consumed by [`ContextHandle::destroy`];
/// dropping it runs the same teardown.
pub struct ContextHandle<P: Platform> {
    gl: P::Gl,
    resources: Resources<P>,
}

impl<P: Platform> ContextHandle<P> {
    /// Run the full acquisition sequence on `platform`.
    ///
    /// On failure everything acquired so far is released before the error is
    /// returned.
    ///
    /// # Panics
    ///
    /// If another `ContextHandle` is live in this process.
    pub fn create(platform: P, config: &ContextConfig) -> Result<Self, BootstrapError> {
        if LIVE.swap(true, Ordering::AcqRel) {
            panic!("a rendering context is already live in this process; destroy it first");
        }

        let mut resources = Resources {
            platform,
            state: BootstrapState::Uninitialized,
        };

        match resources.acquire(config) {
            Ok(gl) => {
                tracing::info!(width = config.width, height = config.height, bits = config.color_depth_bits, "rendering context live");
                Ok(Self { gl, resources })
            }
            Err(err) => {
                tracing::debug!(step = ?err.step(), reached = ?resources.state, "context bootstrap failed: {err}");
                resources.teardown();
                Err(err)
            }
        }
    }

    pub fn state(&self) -> BootstrapState {
        self.resources.state
    }

    /// Function table of the live context.
    pub fn gl(&self) -> &P::Gl {
        &self.gl
    }

    pub fn platform(&self) -> &P {
        &self.resources.platform
    }

    /// Tear the context down, returning any release step that failed.
    pub fn destroy(mut self) -> Vec<TeardownWarning> {
        self.resources.teardown()
    }
}

/// Whether a rendering context is live anywhere in the process.
pub fn is_context_live() -> bool {
    LIVE.load(Ordering::Acquire)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::{serial, Resource, StubPlatform};
    use glprobe_core::{gl, query_extensions, AdapterReport, GlQueries};

    #[test]
    fn all_steps_succeed() {
        let _guard = serial();
        let platform = StubPlatform::new();
        let ledger = platform.ledger();

        let handle = ContextHandle::create(platform, &ContextConfig::default()).unwrap();
        assert_eq!(handle.state(), BootstrapState::FunctionsLoaded);
        assert!(handle.state().is_live());
        assert!(is_context_live());
        assert_eq!(ledger.held(), 5);

        let warnings = handle.destroy();
        assert!(warnings.is_empty());
        assert_eq!(ledger.held(), 0);
        assert!(!is_context_live());
    }

    #[test]
    fn every_single_failure_rolls_back() {
        let _guard = serial();
        for step in AcquireStep::ALL {
            let platform = StubPlatform::new().fail_at(step);
            let ledger = platform.ledger();

            let err = match ContextHandle::create(platform, &ContextConfig::default()) {
                Ok(_) => panic!("{step:?} was forced to fail"),
                Err(err) => err,
            };
            assert_eq!(err.step(), step);
            assert_eq!(ledger.held(), 0, "leaked after {step:?} failed: {:?}", ledger.log());
            assert!(!is_context_live());
        }
    }

    #[test]
    fn failure_maps_to_matching_error() {
        let _guard = serial();
        let err = ContextHandle::create(
            StubPlatform::new().fail_at(AcquireStep::ChooseFormat),
            &ContextConfig::default(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, BootstrapError::FormatSelectionFailed(_)));

        let err = ContextHandle::create(
            StubPlatform::new().fail_at(AcquireStep::LoadFunctions),
            &ContextConfig::default(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, BootstrapError::FunctionLoadFailed(_)));
    }

    #[test]
    fn rollback_releases_in_reverse_order() {
        let _guard = serial();
        let platform = StubPlatform::new().fail_at(AcquireStep::MakeCurrent);
        let ledger = platform.ledger();

        assert!(ContextHandle::create(platform, &ContextConfig::default()).is_err());
        assert_eq!(
            ledger.log(),
            [
                "acquire Class",
                "acquire Window",
                "acquire Surface",
                "choose format",
                "apply format",
                "acquire Context",
                "fail MakeCurrent",
                "release Context",
                "release Surface",
                "release Window",
                "release Class",
            ]
        );
    }

    #[test]
    fn class_failure_releases_nothing() {
        let _guard = serial();
        let platform = StubPlatform::new().fail_at(AcquireStep::RegisterClass);
        let ledger = platform.ledger();

        assert!(ContextHandle::create(platform, &ContextConfig::default()).is_err());
        assert_eq!(ledger.log(), ["fail RegisterClass"]);
    }

    #[test]
    fn release_failures_become_warnings() {
        let _guard = serial();
        let platform = StubPlatform::new()
            .fail_release(ReleaseStep::DeleteContext)
            .fail_release(ReleaseStep::DestroyWindow);
        let ledger = platform.ledger();

        let handle = ContextHandle::create(platform, &ContextConfig::default()).unwrap();
        let warnings = handle.destroy();

        let steps: Vec<ReleaseStep> = warnings.iter().map(|warning| warning.step).collect();
        assert_eq!(steps, [ReleaseStep::DeleteContext, ReleaseStep::DestroyWindow]);
        // Later releases still ran
        assert!(!ledger.holds(Resource::Surface));
        assert!(!ledger.holds(Resource::Class));
        assert!(ledger.holds(Resource::Context));
        assert!(!is_context_live());
    }

    #[test]
    fn dropping_a_live_handle_tears_down() {
        let _guard = serial();
        let platform = StubPlatform::new();
        let ledger = platform.ledger();

        drop(ContextHandle::create(platform, &ContextConfig::default()).unwrap());
        assert_eq!(ledger.held(), 0);
        assert!(!is_context_live());
    }

    #[test]
    fn window_is_sized_from_config() {
        let _guard = serial();
        let config = ContextConfig { width: 800, height: 600, color_depth_bits: 32, ..Default::default() };

        let handle = ContextHandle::create(StubPlatform::new(), &config).unwrap();
        assert_eq!(handle.platform().window_size(), Some((800, 600)));
        assert_eq!(handle.platform().applied_format().map(|format| format.color_bits), Some(32));
        handle.destroy();
    }

    #[test]
    #[should_panic(expected = "already live")]
    fn second_live_context_is_rejected() {
        let _guard = serial();
        let _first = ContextHandle::create(StubPlatform::new(), &ContextConfig::default()).unwrap();
        let _second = ContextHandle::create(StubPlatform::new(), &ContextConfig::default());
    }

    #[test]
    fn probe_borrows_live_context() {
        let _guard = serial();
        let gl = glprobe_core::testing::ScriptedGl::new()
            .with_string(gl::RENDERER, "Stub Renderer")
            .with_string(gl::EXTENSIONS, "GL_b GL_a ");

        let handle = ContextHandle::create(StubPlatform::with_gl(gl), &ContextConfig::default()).unwrap();
        let report = AdapterReport::capture(handle.gl());
        assert_eq!(report.renderer, "Stub Renderer");
        assert_eq!(query_extensions(handle.gl()), query_extensions(handle.gl()));
        assert!(!handle.gl().supports_indexed_strings());
        assert!(handle.destroy().is_empty());

        assert_eq!(report.extensions, ["GL_a", "GL_b"]);
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn failures_stay_below_warn_level() {
        let _guard = serial();
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(captured.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let failing = StubPlatform::new().fail_at(AcquireStep::MakeCurrent);
            assert!(ContextHandle::create(failing, &ContextConfig::default()).is_err());

            let platform = StubPlatform::new().fail_release(ReleaseStep::ReleaseSurface);
            let handle = ContextHandle::create(platform, &ContextConfig::default()).unwrap();
            assert_eq!(handle.destroy().len(), 1);
        });

        // Callers own reporting; the library only traces at debug
        assert!(captured.0.lock().unwrap().is_empty());
    }
}
