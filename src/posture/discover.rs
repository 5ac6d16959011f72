//! Find candidate images for the upload page.
//!
//! The posture page lists `*.jpg`, `*.jpeg` and `*.png` files under the current
//! working directory so one can be picked without typing a path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::posture::accepted_format;

/// Default directory recursion depth for finding images.
const DEFAULT_SEARCH_DEPTH: usize = 3;

/// Upper bound on listed files.
const MAX_CANDIDATES: usize = 50;

/// Discover images under the current directory (deterministic order).
pub fn discover_image_files() -> Vec<PathBuf> {
    find_image_files(Path::new("."), DEFAULT_SEARCH_DEPTH)
}

pub fn find_image_files(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    let mut out = Vec::new();
    find_inner(root, 0, max_depth, &mut out);
    out.sort_by_key(|p| pretty_path(p));
    out.truncate(MAX_CANDIDATES);
    out
}

fn find_inner(root: &Path, depth: usize, max_depth: usize, out: &mut Vec<PathBuf>) {
    if depth > max_depth {
        return;
    }

    let Ok(entries) = fs::read_dir(root) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            if !should_skip_dir(&path) {
                find_inner(&path, depth + 1, max_depth, out);
            }
            continue;
        }

        if file_type.is_file() && accepted_format(&path).is_ok() {
            out.push(path);
        }
    }
}

fn should_skip_dir(path: &Path) -> bool {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    matches!(name, ".git" | "target" | "node_modules")
}

pub fn pretty_path(path: &Path) -> String {
    let stripped = path.strip_prefix("./").unwrap_or(path);
    stripped.display().to_string()
}
