//! Show Project Structure: a depth-limited tree of the current directory.

use std::env;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use magic_core::application::Session;
use magic_core::application::services::CONTINUE_PROMPT;
use magic_core::domain::{ActionResult, Signal};

use super::section;
use crate::error::IntoCli;

const MAX_DEPTH: usize = 3;
const MAX_ENTRIES: usize = 200;

/// Directories that are never worth listing.
const SKIPPED: &[&str] = &["target", "node_modules", "__pycache__", "venv"];

pub fn show_structure(session: &mut Session) -> ActionResult {
    let cwd = env::current_dir().with_cli_context(|| "Cannot read the current directory")?;
    let mut lines = tree(&cwd, MAX_DEPTH);
    if lines.len() == MAX_ENTRIES {
        lines.push("...".into());
    }
    if lines.is_empty() {
        lines.push("(empty)".into());
    }

    section(
        session,
        &format!("Project Structure: {}", cwd.display()),
        &lines.join("\n"),
    )?;
    session.pause(CONTINUE_PROMPT)?;
    Ok(Signal::Stay)
}

/// Indented listing of `root`, directories suffixed with `/`.
///
/// Hidden entries and build output are skipped; unreadable entries are
/// ignored.
fn tree(root: &Path, max_depth: usize) -> Vec<String> {
    WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped(e))
        .filter_map(Result::ok)
        .take(MAX_ENTRIES)
        .map(|entry| {
            let indent = "  ".repeat(entry.depth() - 1);
            let name = entry.file_name().to_string_lossy();
            if entry.file_type().is_dir() {
                format!("{indent}{name}/")
            } else {
                format!("{indent}{name}")
            }
        })
        .collect()
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.') || SKIPPED.contains(&name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn tree_lists_nested_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/main.rs"), "fn main() {}").unwrap();
        fs::write(dir.path().join("Cargo.toml"), "").unwrap();

        assert_eq!(tree(dir.path(), 3), ["Cargo.toml", "src/", "  main.rs"]);
    }

    #[test]
    fn tree_skips_hidden_and_build_dirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::create_dir_all(dir.path().join("target/debug")).unwrap();
        fs::write(dir.path().join("README.md"), "").unwrap();

        assert_eq!(tree(dir.path(), 3), ["README.md"]);
    }

    #[test]
    fn tree_respects_depth() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b/c")).unwrap();

        assert_eq!(tree(dir.path(), 2), ["a/", "  b/"]);
    }
}
