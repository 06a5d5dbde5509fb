//! Extension classification by origin
//!
//! Names are bucketed by their registry prefix. Prefixes in [`PREFIXES`] never
//! overlap, so the first match is the only match.

use std::collections::BTreeMap;

/// Category for names matching none of [`PREFIXES`].
pub const OTHER: &str = "Other";

/// Recognized extension prefixes and the category label each maps to.
pub const PREFIXES: &[(&str, &str)] = &[
    ("GL_ARB_", "ARB (Architecture Review Board)"),
    ("GL_EXT_", "EXT (Multi-vendor)"),
    ("GL_NV_", "NV (NVIDIA)"),
    ("GL_AMD_", "AMD"),
    ("GL_ATI_", "ATI"),
    ("GL_INTEL_", "INTEL"),
    ("GL_KHR_", "KHR (Khronos)"),
];

/// Category label for a single extension name.
pub fn category_of(extension: &str) -> &'static str {
    PREFIXES
        .iter()
        .find(|(prefix, _)| extension.starts_with(prefix))
        .map_or(OTHER, |&(_, label)| label)
}

/// Partition `extensions` into categories keyed by label.
///
/// Members keep their input order. Empty categories are absent, and iteration
/// runs in label order.
pub fn classify<S: AsRef<str>>(extensions: &[S]) -> BTreeMap<&'static str, Vec<String>> {
    let mut categories: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
    for extension in extensions {
        let extension = extension.as_ref();
        categories
            .entry(category_of(extension))
            .or_default()
            .push(extension.to_owned());
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut names: Vec<String> = names.iter().map(|&name| name.to_owned()).collect();
        names.sort();
        names
    }

    #[test]
    fn scenario_from_mixed_vendors() {
        let extensions = sorted(&["GL_EXT_foo", "GL_ARB_bar", "GL_NV_baz", "GL_made_up_thing"]);
        assert_eq!(extensions, ["GL_ARB_bar", "GL_EXT_foo", "GL_NV_baz", "GL_made_up_thing"]);

        let categories = classify(&extensions);
        let expected: BTreeMap<&str, Vec<String>> = [
            ("ARB (Architecture Review Board)", vec!["GL_ARB_bar".to_owned()]),
            ("EXT (Multi-vendor)", vec!["GL_EXT_foo".to_owned()]),
            ("NV (NVIDIA)", vec!["GL_NV_baz".to_owned()]),
            (OTHER, vec!["GL_made_up_thing".to_owned()]),
        ]
        .into_iter()
        .collect();
        assert_eq!(categories, expected);
    }

    #[test]
    fn known_and_unknown_prefixes() {
        assert_eq!(category_of("GL_ARB_foo"), "ARB (Architecture Review Board)");
        assert_eq!(category_of("GL_XYZ_bar"), OTHER);
        assert_eq!(category_of("GL_KHR_debug"), "KHR (Khronos)");
        assert_eq!(category_of("GL_INTEL_performance_query"), "INTEL");
        assert_eq!(category_of("GL_ATI_meminfo"), "ATI");
        assert_eq!(category_of("GL_AMD_vertex_shader_layer"), "AMD");
        // Prefix match is case sensitive and needs the trailing underscore
        assert_eq!(category_of("GL_ARBfoo"), OTHER);
        assert_eq!(category_of("gl_arb_foo"), OTHER);
        assert_eq!(category_of("WGL_ARB_pixel_format"), OTHER);
    }

    #[test]
    fn prefixes_do_not_overlap() {
        for (i, (a, _)) in PREFIXES.iter().enumerate() {
            for (b, _) in &PREFIXES[i + 1..] {
                assert!(!a.starts_with(b) && !b.starts_with(a), "{a} overlaps {b}");
            }
        }
    }

    #[test]
    fn classification_is_a_partition() {
        let extensions = sorted(&[
            "GL_AMD_a", "GL_ARB_a", "GL_ARB_b", "GL_ATI_a", "GL_EXT_a", "GL_INTEL_a",
            "GL_KHR_a", "GL_NV_a", "GL_NVX_a", "GL_OES_a", "GL_XYZ_bar",
        ]);

        let categories = classify(&extensions);
        let members: Vec<&String> = categories.values().flatten().collect();
        assert_eq!(members.len(), extensions.len());

        let unique: BTreeSet<&String> = members.iter().copied().collect();
        let input: BTreeSet<&String> = extensions.iter().collect();
        assert_eq!(unique, input);

        assert!(categories.values().all(|names| !names.is_empty()));
        assert_eq!(categories[OTHER], ["GL_NVX_a", "GL_OES_a", "GL_XYZ_bar"]);
    }

    #[test]
    fn flatten_round_trip() {
        let extensions = sorted(&["GL_KHR_debug", "GL_ARB_sync", "GL_EXT_x", "GL_ARB_a", "custom"]);

        let mut flattened: Vec<String> = classify(&extensions).into_values().flatten().collect();
        flattened.sort();
        assert_eq!(flattened, extensions);
    }

    #[test]
    fn members_keep_input_order() {
        let extensions = sorted(&["GL_ARB_c", "GL_ARB_a", "GL_ARB_b"]);

        let categories = classify(&extensions);
        assert_eq!(categories["ARB (Architecture Review Board)"], ["GL_ARB_a", "GL_ARB_b", "GL_ARB_c"]);
    }

    #[test]
    fn labels_iterate_in_order() {
        let categories = classify(&["GL_NV_x", "zzz", "GL_AMD_x", "GL_ARB_x"]);

        let labels: Vec<&str> = categories.keys().copied().collect();
        assert_eq!(labels, ["AMD", "ARB (Architecture Review Board)", "NV (NVIDIA)", OTHER]);
    }

    #[test]
    fn empty_input_has_no_categories() {
        assert!(classify::<String>(&[]).is_empty());
    }
}
