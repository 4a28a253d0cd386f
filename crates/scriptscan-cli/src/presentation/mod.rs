//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: no domain transforms.

use std::fmt::Write as _;

use scriptscan_core::ParsedScript;

const RULE_WIDTH: usize = 60;

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Print a boxed title.
pub fn print_banner(title: &str) {
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("  {title}");
    println!("{}", "=".repeat(RULE_WIDTH));
}

/// Print a `label: status` line, padded so statuses line up.
pub fn print_status(label: &str, status: impl std::fmt::Display) {
    println!("  {label:<14} {status}");
}

/// Print `prompt` and block until Enter is pressed.
pub fn wait_for_enter(prompt: &str) -> std::io::Result<()> {
    println!();
    println!("{prompt}");
    console::Term::stdout().read_line().map(|_| ())
}

/// Render a parsed script the way `scriptscan parse` prints it.
///
/// Each scene gets a rule, its header, a thin rule and one line per
/// category.
pub fn render_script(script: &ParsedScript) -> String {
    let mut out = String::new();
    for scene in &script.scenes {
        let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
        let _ = writeln!(out, "{}", scene.scene_header);
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        for (label, value) in scene.analysis.rows() {
            let _ = writeln!(out, "{label}: {value}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptscan_core::{SceneAnalysis, SceneBreakdown};

    #[test]
    fn renders_each_scene_with_dashes_for_empty_lists() {
        let script = ParsedScript {
            scenes: vec![SceneBreakdown {
                scene_header: "1. ИНТ. КАФЕ. ДЕНЬ.".to_string(),
                analysis: SceneAnalysis {
                    characters: vec!["Анна".to_string(), "Борис".to_string()],
                    ..SceneAnalysis::default()
                },
            }],
        };

        let rendered = render_script(&script);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "=".repeat(60));
        assert_eq!(lines[1], "1. ИНТ. КАФЕ. ДЕНЬ.");
        assert_eq!(lines[2], "-".repeat(60));
        assert_eq!(lines[3], "Персонажи: Анна, Борис");
        assert_eq!(lines[4], "Массовка: -");
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn empty_script_renders_nothing() {
        assert!(render_script(&ParsedScript::default()).is_empty());
    }
}
