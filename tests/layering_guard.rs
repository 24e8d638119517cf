//! Layering guardrails for the workspace crates.
//!
//! `stylescan_core` is the dependency-free vocabulary crate, and `stylescan_syntax` is a library that must stay
//! usable from hosts with their own CLI and logging setup. These tests scan the member manifests and fail if a
//! forbidden crate appears in `[dependencies]`.

/// Dependency names listed in the `[dependencies]` table of `manifest`.
fn dependencies(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            if line == "[dependencies]" {
                in_dependencies = true;
                continue;
            }
            // Any new section after `[dependencies]` ends the scan window.
            if in_dependencies {
                break;
            }
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some(name) = line_no_comment.split('=').next() {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn core_has_no_dependencies() {
    let deps = dependencies(include_str!("../crates/stylescan_core/Cargo.toml"));
    assert!(deps.is_empty(), "`stylescan_core` must stay dependency-free, found {deps:?}");
}

#[test]
fn syntax_does_not_depend_on_binary_only_crates() {
    let deps = dependencies(include_str!("../crates/stylescan_syntax/Cargo.toml"));
    for forbidden in ["clap", "tracing-subscriber", "stylescan"] {
        if deps.iter().any(|d| d == forbidden) {
            panic!("`{forbidden}` must not appear in stylescan_syntax's [dependencies]");
        }
    }
    assert!(deps.iter().any(|d| d == "stylescan_core"));
}
