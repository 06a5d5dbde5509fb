//! Driver query seam
//!
//! The probe only ever issues a handful of parameterized queries against the
//! active context. Platforms hand out a loaded function table implementing
//! this trait; tests hand out a scripted one.

pub use glow::{
    EXTENSIONS, MAX_FRAGMENT_UNIFORM_COMPONENTS, MAX_TEXTURE_IMAGE_UNITS, MAX_TEXTURE_SIZE,
    MAX_VARYING_COMPONENTS, MAX_VERTEX_ATTRIBS, MAX_VERTEX_UNIFORM_COMPONENTS, MAX_VIEWPORT_DIMS,
    NUM_EXTENSIONS, RENDERER, SHADING_LANGUAGE_VERSION, VENDOR, VERSION,
};

/// Queries a live rendering context can answer.
///
/// Implementations must only be used while their context is current on the
/// calling thread.
pub trait GlQueries {
    /// `glGetString`. `None` when the driver returns a null pointer.
    fn get_parameter_string(&self, parameter: u32) -> Option<String>;

    /// `glGetStringi`. `None` when the driver returns a null pointer or the
    /// entry point was not loaded.
    fn get_parameter_indexed_string(&self, parameter: u32, index: u32) -> Option<String>;

    /// Whether `glGetStringi` was resolved for this context.
    fn supports_indexed_strings(&self) -> bool;

    /// `glGetIntegerv` for a single-valued parameter.
    fn get_parameter_i32(&self, parameter: u32) -> i32 {
        let mut value = [0];
        self.get_parameter_i32_slice(parameter, &mut value);
        value[0]
    }

    /// `glGetIntegerv` into a caller-sized buffer.
    fn get_parameter_i32_slice(&self, parameter: u32, out: &mut [i32]);
}

impl<T: GlQueries + ?Sized> GlQueries for &T {
    fn get_parameter_string(&self, parameter: u32) -> Option<String> {
        (**self).get_parameter_string(parameter)
    }

    fn get_parameter_indexed_string(&self, parameter: u32, index: u32) -> Option<String> {
        (**self).get_parameter_indexed_string(parameter, index)
    }

    fn supports_indexed_strings(&self) -> bool {
        (**self).supports_indexed_strings()
    }

    fn get_parameter_i32(&self, parameter: u32) -> i32 {
        (**self).get_parameter_i32(parameter)
    }

    fn get_parameter_i32_slice(&self, parameter: u32, out: &mut [i32]) {
        (**self).get_parameter_i32_slice(parameter, out)
    }
}
