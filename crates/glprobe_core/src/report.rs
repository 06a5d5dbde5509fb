//! Adapter report
//!
//! Plain value captured from a live context in one pass. It holds no handles,
//! so it stays valid after the context is torn down.

use serde::Serialize;

use crate::gl::GlQueries;
use crate::probe::{self, Identity, Limits};

/// Maximum viewport extent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewportDimensions {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdapterReport {
    pub renderer: String,
    pub vendor: String,
    pub driver_version: String,
    pub shading_language_version: String,
    /// Sorted extension names, duplicates kept as reported.
    pub extensions: Vec<String>,

    // Capabilities
    pub max_texture_size: i32,
    pub max_texture_units: i32,
    pub max_vertex_attributes: i32,
    pub max_varying_components: i32,
    pub max_fragment_uniform_components: i32,
    pub max_vertex_uniform_components: i32,
    pub max_viewport_dimensions: ViewportDimensions,
}

impl AdapterReport {
    /// Query everything the report holds. The context behind `gl` must be
    /// current on the calling thread.
    pub fn capture<G: GlQueries + ?Sized>(gl: &G) -> Self {
        let Identity {
            renderer,
            vendor,
            driver_version,
            shading_language_version,
        } = probe::query_identity(gl);
        let extensions = probe::query_extensions(gl);
        let Limits {
            max_texture_size,
            max_texture_units,
            max_vertex_attributes,
            max_varying_components,
            max_fragment_uniform_components,
            max_vertex_uniform_components,
            max_viewport_dimensions: [width, height],
        } = probe::query_limits(gl);

        tracing::debug!(%renderer, extensions = extensions.len(), "captured adapter report");

        Self {
            renderer,
            vendor,
            driver_version,
            shading_language_version,
            extensions,
            max_texture_size,
            max_texture_units,
            max_vertex_attributes,
            max_varying_components,
            max_fragment_uniform_components,
            max_vertex_uniform_components,
            max_viewport_dimensions: ViewportDimensions { width, height },
        }
    }
}
