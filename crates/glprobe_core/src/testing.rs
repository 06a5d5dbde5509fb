//! Scripted driver for tests
//!
//! Answers queries from fixed tables instead of a live context.

use std::collections::HashMap;

use crate::gl::{self, GlQueries};

#[derive(Debug, Clone, Default)]
pub struct ScriptedGl {
    strings: HashMap<u32, String>,
    integers: HashMap<u32, Vec<i32>>,
    /// `None` models a driver without `glGetStringi`.
    indexed_extensions: Option<Vec<String>>,
}

impl ScriptedGl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_string(mut self, parameter: u32, value: &str) -> Self {
        self.strings.insert(parameter, value.to_owned());
        self
    }

    pub fn with_integer(self, parameter: u32, value: i32) -> Self {
        self.with_integers(parameter, &[value])
    }

    pub fn with_integers(mut self, parameter: u32, values: &[i32]) -> Self {
        self.integers.insert(parameter, values.to_vec());
        self
    }

    /// Loads `glGetStringi` and reports `names.len()` as `GL_NUM_EXTENSIONS`.
    pub fn with_indexed_extensions(mut self, names: &[&str]) -> Self {
        self.indexed_extensions = Some(names.iter().map(|&name| name.to_owned()).collect());
        self.with_integer(gl::NUM_EXTENSIONS, names.len() as i32)
    }
}

impl GlQueries for ScriptedGl {
    fn get_parameter_string(&self, parameter: u32) -> Option<String> {
        self.strings.get(&parameter).cloned()
    }

    fn get_parameter_indexed_string(&self, parameter: u32, index: u32) -> Option<String> {
        if parameter != gl::EXTENSIONS {
            return None;
        }
        self.indexed_extensions.as_ref()?.get(index as usize).cloned()
    }

    fn supports_indexed_strings(&self) -> bool {
        self.indexed_extensions.is_some()
    }

    fn get_parameter_i32_slice(&self, parameter: u32, out: &mut [i32]) {
        if let Some(values) = self.integers.get(&parameter) {
            for (slot, value) in out.iter_mut().zip(values) {
                *slot = *value;
            }
        }
    }
}
