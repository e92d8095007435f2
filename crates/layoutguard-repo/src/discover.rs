use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use layoutguard_types::RepoPath;
use std::path::PathBuf;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Discover data files under `root` whose extension is `extension`.
///
/// Behavior:
/// - Every depth is searched; hidden directories and `target/` are not descended into.
/// - A file is dropped when its file name or its root-relative path matches an `exclude` glob.
/// - The result is sorted and deduplicated, so callers get a stable order.
pub fn discover_data_files(
    root: &Utf8Path,
    extension: &str,
    exclude: &[String],
) -> anyhow::Result<Vec<RepoPath>> {
    let exclude_set = build_exclude_set(exclude).context("compile exclude globset")?;

    let mut out: Vec<RepoPath> = Vec::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry during discovery");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(abs) = pathbuf_to_utf8(entry.path().to_path_buf()) else {
            warn!(path = %entry.path().display(), "skipping non UTF-8 path");
            continue;
        };
        if abs.extension() != Some(extension) {
            continue;
        }

        let rel = abs
            .strip_prefix(root)
            .unwrap_or(&abs)
            .as_str()
            .replace('\\', "/");
        let file_name = abs.file_name().unwrap_or_default();
        if exclude_set.is_match(file_name) || exclude_set.is_match(&rel) {
            debug!(path = %rel, "excluded");
            continue;
        }
        out.push(RepoPath::new(&rel));
    }

    // Stable order.
    out.sort();
    out.dedup();

    debug!(count = out.len(), extension, "discovered data files");
    Ok(out)
}

/// Compile exclude patterns into one set.
pub fn build_exclude_set(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        b.add(Glob::new(p).with_context(|| format!("invalid exclude glob: {p}"))?);
    }
    Ok(b.build()?)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name == "target"
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
