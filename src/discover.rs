//! Source discovery: recursive directory walks, explicit files and glob
//! patterns.

use crate::error::{Error, Result};
use crate::model::Unit;
use crate::parser;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file to parse and the root its module path is relative to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub root: PathBuf,
    pub path: PathBuf,
}

impl SourceFile {
    pub fn parse(&self, extension: &str) -> Result<Unit> {
        parser::parse_unit(&self.root, &self.path, extension)
    }
}

/// Collect sources from `directories` (each walked recursively and used as its
/// own root) followed by `inputs`, which may be files, directories or glob
/// patterns relative to `root`.
///
/// Order is deterministic: directory entries sorted by name, duplicates
/// dropped after their first occurrence.
pub fn collect(
    root: &Path,
    inputs: &[String],
    directories: &[PathBuf],
    extension: &str,
) -> Result<Vec<SourceFile>> {
    let mut sources = Vec::new();

    for dir in directories {
        sources.extend(walk_directory(dir, extension)?);
    }

    for input in inputs {
        let path = Path::new(input);
        if path.is_dir() {
            sources.extend(walk_directory(path, extension)?);
        } else if path.is_file() {
            sources.push(SourceFile {
                root: root.to_path_buf(),
                path: path.to_path_buf(),
            });
        } else {
            sources.extend(expand_glob(root, input)?);
        }
    }

    let mut seen = HashSet::new();
    sources.retain(|s| seen.insert(s.path.clone()));
    Ok(sources)
}

/// Recursively find files ending in `.<extension>` below `dir`.
pub fn walk_directory(dir: &Path, extension: &str) -> Result<Vec<SourceFile>> {
    if !dir.exists() {
        return Err(Error::InvalidRoot {
            path: dir.to_path_buf(),
            reason: "directory doesn't exist".to_string(),
        });
    }
    if !dir.is_dir() {
        return Err(Error::InvalidRoot {
            path: dir.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    let suffix = format!(".{extension}");
    let files: Vec<SourceFile> = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(&suffix))
        .map(|entry| SourceFile {
            root: dir.to_path_buf(),
            path: entry.into_path(),
        })
        .collect();

    tracing::debug!(dir = %dir.display(), count = files.len(), "walked directory");
    Ok(files)
}

fn expand_glob(root: &Path, pattern: &str) -> Result<Vec<SourceFile>> {
    let matches: Vec<SourceFile> = glob::glob(pattern)
        .map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .map(|path| SourceFile {
            root: root.to_path_buf(),
            path,
        })
        .collect();

    if matches.is_empty() {
        tracing::warn!("no files matched: {pattern}");
    }
    Ok(matches)
}
