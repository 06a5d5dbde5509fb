//! Plain text report

use std::io;

use glprobe_core::{classify, AdapterReport};
use glprobe_env::DisplayDevice;

const WIDTH: usize = 80;
const LABEL_WIDTH: usize = 25;

fn print_banner(output: &mut impl io::Write, title: &str) -> io::Result<()> {
    let rule = "=".repeat(WIDTH);
    let padding = WIDTH.saturating_sub(title.len()) / 2;
    writeln!(output)?;
    writeln!(output, "{rule}")?;
    writeln!(output, "{:padding$}{title}", "")?;
    writeln!(output, "{rule}")?;
    writeln!(output)
}

fn print_sub_header(output: &mut impl io::Write, title: &str) -> io::Result<()> {
    writeln!(output, "{title}")?;
    writeln!(output, "{}", "-".repeat(title.len()))
}

fn print_field(output: &mut impl io::Write, name: &str, value: impl std::fmt::Display) -> io::Result<()> {
    writeln!(output, "{:<LABEL_WIDTH$}{value}", format!("{name}:"))
}

fn print_extensions_grouped(output: &mut impl io::Write, extensions: &[String]) -> io::Result<()> {
    for (category, names) in classify(extensions) {
        print_sub_header(output, &format!("{category} ({})", names.len()))?;
        for name in names {
            writeln!(output, "  - {name}")?;
        }
        writeln!(output)?;
    }
    Ok(())
}

fn print_extensions_flat(output: &mut impl io::Write, extensions: &[String]) -> io::Result<()> {
    for name in extensions {
        writeln!(output, "  - {name}")?;
    }
    Ok(())
}

// Lets keep these print statements on one line
#[rustfmt::skip]
pub fn print_report(output: &mut impl io::Write, report: &AdapterReport, verbose_extensions: bool) -> io::Result<()> {
    print_banner(output, "GPU INFORMATION")?;
    print_field(output, "Renderer", &report.renderer)?;
    print_field(output, "Vendor", &report.vendor)?;
    print_field(output, "OpenGL Version", &report.driver_version)?;
    print_field(output, "GLSL Version", &report.shading_language_version)?;

    print_banner(output, "CAPABILITIES")?;
    print_field(output, "Max Texture Size", format!("{0} x {0}", report.max_texture_size))?;
    print_field(output, "Max Viewport", format!("{} x {}", report.max_viewport_dimensions.width, report.max_viewport_dimensions.height))?;
    print_field(output, "Max Texture Units", report.max_texture_units)?;
    print_field(output, "Max Vertex Attributes", report.max_vertex_attributes)?;
    print_field(output, "Max Varying Components", report.max_varying_components)?;
    print_field(output, "Max Fragment Uniforms", report.max_fragment_uniform_components)?;
    print_field(output, "Max Vertex Uniforms", report.max_vertex_uniform_components)?;

    print_banner(output, &format!("EXTENSIONS ({} total)", report.extensions.len()))?;
    if verbose_extensions {
        print_extensions_grouped(output, &report.extensions)
    } else {
        print_extensions_flat(output, &report.extensions)
    }
}

const DISPLAY_RULE: &str = "+-----+----------------+----------------------------------------+--------------------------------------------------+";

pub fn print_displays(output: &mut impl io::Write, displays: &[DisplayDevice]) -> io::Result<()> {
    writeln!(output)?;
    writeln!(output, "{DISPLAY_RULE}")?;
    writeln!(output, "| {:<3} | {:<14} | {:<38} | {:<48} |", "No", "Device Name", "Device String", "Device ID")?;
    writeln!(output, "{DISPLAY_RULE}")?;
    for display in displays {
        writeln!(
            output,
            "| {:<3} | {:<14} | {:<38} | {:<48} |",
            display.index, display.name, display.description, display.id
        )?;
    }
    writeln!(output, "{DISPLAY_RULE}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use glprobe_core::ViewportDimensions;

    fn report(extensions: &[&str]) -> AdapterReport {
        AdapterReport {
            renderer: "GeForce GTX 1050/PCIe/SSE2".to_owned(),
            vendor: "NVIDIA Corporation".to_owned(),
            driver_version: "4.6.0 NVIDIA 537.58".to_owned(),
            shading_language_version: "4.60 NVIDIA".to_owned(),
            extensions: extensions.iter().map(|s| s.to_string()).collect(),
            max_texture_size: 32768,
            max_texture_units: 32,
            max_vertex_attributes: 16,
            max_varying_components: 124,
            max_fragment_uniform_components: 4096,
            max_vertex_uniform_components: 4096,
            max_viewport_dimensions: ViewportDimensions { width: 32768, height: 16384 },
        }
    }

    fn render(report: &AdapterReport, verbose: bool) -> String {
        let mut out = Vec::new();
        print_report(&mut out, report, verbose).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn banner_is_centered() {
        let mut out = Vec::new();
        print_banner(&mut out, "CAPABILITIES").unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "=".repeat(80));
        assert_eq!(lines[2], format!("{}CAPABILITIES", " ".repeat(34)));
        assert_eq!(lines[3], "=".repeat(80));
        assert_eq!(lines[4], "");
    }

    #[test]
    fn fields_are_aligned() {
        let text = render(&report(&[]), true);
        assert!(text.contains("\nRenderer:                GeForce GTX 1050/PCIe/SSE2\n"));
        assert!(text.contains("\nOpenGL Version:          4.6.0 NVIDIA 537.58\n"));
        assert!(text.contains("\nMax Texture Size:        32768 x 32768\n"));
        assert!(text.contains("\nMax Viewport:            32768 x 16384\n"));
        assert!(text.contains("\nMax Varying Components:  124\n"));
    }

    #[test]
    fn sections_in_order() {
        let text = render(&report(&["GL_ARB_a"]), true);
        let gpu = text.find("GPU INFORMATION").unwrap();
        let caps = text.find("CAPABILITIES").unwrap();
        let exts = text.find("EXTENSIONS (1 total)").unwrap();
        assert!(gpu < caps && caps < exts);
    }

    #[test]
    fn grouped_extensions() {
        let text = render(&report(&["GL_ARB_multitexture", "GL_EXT_blend_color", "GL_NV_fence", "WGL_EXT_swap_control"]), true);
        let tail = &text[text.find("EXTENSIONS (4 total)").unwrap()..];
        let expected = "\
ARB (Architecture Review Board) (1)
-----------------------------------
  - GL_ARB_multitexture

EXT (Multi-vendor) (1)
----------------------
  - GL_EXT_blend_color

NV (NVIDIA) (1)
---------------
  - GL_NV_fence

Other (1)
---------
  - WGL_EXT_swap_control

";
        assert!(tail.ends_with(expected), "{tail}");
    }

    #[test]
    fn compact_extensions() {
        let text = render(&report(&["GL_ARB_multitexture", "GL_NV_fence"]), false);
        assert!(text.ends_with("\n\n  - GL_ARB_multitexture\n  - GL_NV_fence\n"));
        assert!(!text.contains("NV (NVIDIA)"));
    }

    #[test]
    fn no_extensions() {
        let text = render(&report(&[]), true);
        assert!(text.ends_with("EXTENSIONS (0 total)\n================================================================================\n\n"));
    }

    #[test]
    fn display_table() {
        let displays = vec![DisplayDevice {
            index: 1,
            name: r"\\.\DISPLAY1".to_owned(),
            description: "NVIDIA GeForce GTX 1050".to_owned(),
            id: r"PCI\VEN_10DE&DEV_1C8D".to_owned(),
            primary: true,
        }];
        let mut out = Vec::new();
        print_displays(&mut out, &displays).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], DISPLAY_RULE);
        assert_eq!(lines[2], "| No  | Device Name    | Device String                          | Device ID                                        |");
        assert_eq!(lines[4], r"| 1   | \\.\DISPLAY1   | NVIDIA GeForce GTX 1050                | PCI\VEN_10DE&DEV_1C8D                            |");
        assert_eq!(lines[5], DISPLAY_RULE);
        assert!(lines.iter().skip(1).all(|line| line.len() == DISPLAY_RULE.len()));
    }

    #[test]
    fn empty_display_table() {
        let mut out = Vec::new();
        print_displays(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 5);
    }
}
