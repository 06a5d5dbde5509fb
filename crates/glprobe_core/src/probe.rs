//! Capability queries
//!
//! Every query is a single pass over the driver with no validation: strings
//! degrade to [`UNKNOWN`], integers are passed through as reported.

use serde::Serialize;

use crate::gl::{self, GlQueries};

/// Sentinel for identity strings the driver did not report.
pub const UNKNOWN: &str = "Unknown";

/// Adapter identity strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub renderer: String,
    pub vendor: String,
    pub driver_version: String,
    pub shading_language_version: String,
}

/// Numeric capability limits, as reported by the driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Limits {
    pub max_texture_size: i32,
    pub max_texture_units: i32,
    pub max_vertex_attributes: i32,
    pub max_varying_components: i32,
    pub max_fragment_uniform_components: i32,
    pub max_vertex_uniform_components: i32,
    pub max_viewport_dimensions: [i32; 2],
}

/// How the extension list is read from the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionStrategy {
    /// `GL_NUM_EXTENSIONS` followed by one `glGetStringi` per index.
    Indexed { count: u32 },
    /// One space-separated `GL_EXTENSIONS` string.
    Legacy,
}

pub fn query_identity<G: GlQueries + ?Sized>(gl: &G) -> Identity {
    Identity {
        renderer: string_or_unknown(gl, gl::RENDERER),
        vendor: string_or_unknown(gl, gl::VENDOR),
        driver_version: string_or_unknown(gl, gl::VERSION),
        shading_language_version: string_or_unknown(gl, gl::SHADING_LANGUAGE_VERSION),
    }
}

fn string_or_unknown<G: GlQueries + ?Sized>(gl: &G, parameter: u32) -> String {
    match gl.get_parameter_string(parameter) {
        Some(value) if !value.is_empty() => value,
        _ => {
            tracing::debug!(parameter = format_args!("{parameter:#06X}"), "driver reported no string");
            UNKNOWN.to_owned()
        }
    }
}

pub fn query_limits<G: GlQueries + ?Sized>(gl: &G) -> Limits {
    let mut max_viewport_dimensions = [0; 2];
    gl.get_parameter_i32_slice(gl::MAX_VIEWPORT_DIMS, &mut max_viewport_dimensions);

    Limits {
        max_texture_size: gl.get_parameter_i32(gl::MAX_TEXTURE_SIZE),
        max_texture_units: gl.get_parameter_i32(gl::MAX_TEXTURE_IMAGE_UNITS),
        max_vertex_attributes: gl.get_parameter_i32(gl::MAX_VERTEX_ATTRIBS),
        max_varying_components: gl.get_parameter_i32(gl::MAX_VARYING_COMPONENTS),
        max_fragment_uniform_components: gl.get_parameter_i32(gl::MAX_FRAGMENT_UNIFORM_COMPONENTS),
        max_vertex_uniform_components: gl.get_parameter_i32(gl::MAX_VERTEX_UNIFORM_COMPONENTS),
        max_viewport_dimensions,
    }
}

/// Pick the enumeration strategy the context supports.
///
/// A zero or negative extension count falls through to the legacy string even
/// when `glGetStringi` is loaded.
pub fn extension_strategy<G: GlQueries + ?Sized>(gl: &G) -> ExtensionStrategy {
    let count = gl.get_parameter_i32(gl::NUM_EXTENSIONS);
    if count > 0 && gl.supports_indexed_strings() {
        ExtensionStrategy::Indexed { count: count as u32 }
    } else {
        ExtensionStrategy::Legacy
    }
}

/// All extension names exposed by the context, sorted.
pub fn query_extensions<G: GlQueries + ?Sized>(gl: &G) -> Vec<String> {
    let strategy = extension_strategy(gl);
    tracing::debug!(?strategy, "enumerating extensions");

    let mut extensions = match strategy {
        ExtensionStrategy::Indexed { count } => (0..count)
            .filter_map(|index| gl.get_parameter_indexed_string(gl::EXTENSIONS, index))
            .collect(),
        ExtensionStrategy::Legacy => gl
            .get_parameter_string(gl::EXTENSIONS)
            .map(|list| split_extension_string(&list))
            .unwrap_or_default(),
    };

    extensions.sort();
    extensions
}

/// Split a legacy extension string on single spaces, dropping empty segments.
pub fn split_extension_string(list: &str) -> Vec<String> {
    list.split(' ')
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}
