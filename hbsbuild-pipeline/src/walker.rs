//! Directory discovery.
//!
//! [`walk`] lists every regular file below a root as a `/`-separated path
//! relative to that root. Files of a directory come before the contents of
//! its subdirectories; within one directory the order is whatever the OS
//! returns. A root that does not exist yields no files rather than an error,
//! so optional stage directories can simply be left out.

use std::fs;
use std::path::Path;

use crate::error::{walk_err, BuildError};

/// OS/editor artifacts that never take part in a build.
const JUNK_NAMES: &[&str] = &[
    ".DS_Store",
    ".AppleDouble",
    ".LSOverride",
    "Icon\r",
    ".Spotlight-V100",
    ".Trashes",
    "__MACOSX",
    "Thumbs.db",
    "ehthumbs.db",
    "Desktop.ini",
    "desktop.ini",
    "npm-debug.log",
];

/// Whether a file or directory name is a junk artifact.
pub fn is_junk(name: &str) -> bool {
    JUNK_NAMES.contains(&name)
        || name.starts_with("._")
        || name.ends_with('~')
        || name.ends_with("@eaDir")
        || is_vim_swap(name)
}

// Vim swap files: `.name.swa` through `.name.swp`.
fn is_vim_swap(name: &str) -> bool {
    let Some(rest) = name.strip_prefix('.') else {
        return false;
    };
    match rest.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.as_bytes();
            ext.len() == 3 && &ext[..2] == b"sw" && (b'a'..=b'p').contains(&ext[2])
        }
        _ => false,
    }
}

/// Recursively list the files under `root`, relative to `root`.
pub fn walk(root: &str) -> Result<Vec<String>, BuildError> {
    let root = Path::new(root);
    if !root.exists() {
        tracing::info!("directory does not exist, skipping: {}", root.display());
        return Ok(vec![]);
    }
    let mut files = Vec::new();
    collect_files(root, root, &mut files)?;
    Ok(files)
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<String>) -> Result<(), BuildError> {
    let mut subdirs = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| walk_err(dir, e))? {
        let entry = entry.map_err(|e| walk_err(dir, e))?;
        if is_junk(&entry.file_name().to_string_lossy()) {
            continue;
        }
        let path = entry.path();
        // Follow symlinks.
        let meta = fs::metadata(&path).map_err(|e| walk_err(&path, e))?;
        if meta.is_file() {
            out.push(relative_path(root, &path));
        } else if meta.is_dir() {
            subdirs.push(path);
        }
    }
    for sub in subdirs {
        collect_files(root, &sub, out)?;
    }
    Ok(())
}

fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Keep only the paths listed in `allow`. An empty `allow` keeps everything.
///
/// Matching is exact string equality on the relative path.
pub fn filter_paths(paths: Vec<String>, allow: &[String]) -> Vec<String> {
    if allow.is_empty() {
        return paths;
    }
    paths.into_iter().filter(|p| allow.contains(p)).collect()
}

/// Logical name of a discovered file: its relative path up to the first `.`.
///
/// `blog/post.hbs` is `blog/post`; `foo.bar.json` is `foo`.
pub fn logical_name(rel: &str) -> &str {
    match rel.find('.') {
        Some(i) => &rel[..i],
        None => rel,
    }
}
