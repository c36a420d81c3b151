//! File-level conversion and directory discovery

use crate::{
    error::{Error, Result},
    is_apple_png, normalize,
};
use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Outcome counts from a directory walk
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeSummary {
    /// Files converted successfully
    pub converted: usize,
    /// Files that failed to convert
    pub failed: usize,
    /// Files skipped as prior outputs (name already bears the suffix)
    pub skipped: usize,
}

/// Read `input`, convert it, and write the result to `output`
///
/// Nothing is written unless conversion succeeds.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    let data = fs::read(input)?;
    let marked = is_apple_png(&data);
    let converted = normalize(&data)?;
    fs::write(output, converted)?;

    log::info!(
        "converted {} -> {}{}",
        input.display(),
        output.display(),
        if marked { "" } else { " (no CgBI marker)" }
    );
    Ok(())
}

/// Convert every `.png` under `root`, writing each result next to its
/// source with `suffix` appended to the file stem
///
/// Files whose names already bear the suffix are prior outputs and are
/// skipped. A file that fails to convert is logged and the walk
/// continues; only an unusable `root` is an error.
pub fn convert_tree<P: AsRef<Path>>(root: P, suffix: &str) -> Result<TreeSummary> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("not a directory: {}", root.display()),
        )));
    }

    let mut summary = TreeSummary::default();

    // Collect before converting so freshly written outputs are never
    // rediscovered mid-walk
    let mut candidates: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("walk error: {e}");
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !has_png_extension(path) {
            continue;
        }
        if bears_suffix(path, suffix) {
            log::debug!("skipping prior output {}", path.display());
            summary.skipped += 1;
            continue;
        }
        candidates.push(path.to_path_buf());
    }

    for path in candidates {
        match convert_file(&path, output_path_for(&path, suffix)) {
            Ok(()) => summary.converted += 1,
            Err(e) => {
                log::warn!("failed to convert {}: {e}", path.display());
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Output path for `path`: the suffix lands between stem and extension
pub fn output_path_for(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::new();
    name.push(path.file_stem().unwrap_or_default());
    name.push(suffix);
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    path.with_file_name(name)
}

/// Whether the file stem already ends with the output suffix
pub fn bears_suffix(path: &Path, suffix: &str) -> bool {
    !suffix.is_empty()
        && path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| stem.ends_with(suffix))
}

fn has_png_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}
