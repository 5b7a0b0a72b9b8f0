//! Hygiene — enforces coding standards at test time.
//!
//! Scans the canvas crate's production sources for antipatterns. Every
//! pattern has a budget of zero: if one must be added, an existing one has
//! to be removed first — the budget never grows.

use std::fs;
use std::path::Path;

/// (pattern, why it is banned in production code)
const BANNED: &[(&str, &str)] = &[
    // Panics crash the whole canvas.
    (".unwrap()", "panics on None/Err"),
    (".expect(", "panics on None/Err"),
    ("panic!(", "explicit panic"),
    ("unreachable!(", "explicit panic"),
    ("todo!(", "unfinished stub"),
    ("unimplemented!(", "unfinished stub"),
    // Silent loss — discards errors without inspecting them.
    ("let _ =", "silently discards a result"),
    (".ok()", "silently discards an error"),
    // Structure.
    ("#[allow(dead_code)]", "hides unused code instead of removing it"),
];

struct SourceFile {
    path: String,
    content: String,
}

/// Collect production `.rs` files from `src/`, excluding `*_test.rs`.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    assert!(!files.is_empty(), "no sources found; is the test running from the crate root?");
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

#[test]
fn banned_patterns_stay_at_zero() {
    let files = source_files();
    let mut violations = Vec::new();

    for (pattern, why) in BANNED {
        for file in &files {
            for (line_no, line) in file.content.lines().enumerate() {
                if line.contains(pattern) {
                    violations.push(format!(
                        "  {}:{} uses `{pattern}` ({why})",
                        file.path,
                        line_no + 1
                    ));
                }
            }
        }
    }

    assert!(
        violations.is_empty(),
        "hygiene violations found:\n{}",
        violations.join("\n")
    );
}

#[test]
fn every_module_has_a_doc_comment() {
    for file in source_files() {
        let has_module_doc = file
            .content
            .lines()
            .find(|line| !line.trim().is_empty())
            .is_some_and(|line| line.starts_with("//!") || line.starts_with("#"));
        assert!(has_module_doc, "{} is missing a module-level doc comment", file.path);
    }
}
