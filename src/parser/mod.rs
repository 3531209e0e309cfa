//! Unit parser: drives comment extraction, annotation splitting and table
//! resolution over one source file.

pub mod annotation;
pub mod args;
pub mod comment;
pub mod table;

use crate::error::{Error, Result};
use crate::model::{Comment, Declaration, Function, Unit, Variable};
use comment::Signature;
use std::fs;
use std::path::{Component, Path};

/// Default DataWeave source extension.
pub const DEFAULT_EXTENSION: &str = "dwl";

/// Read and parse one source file.
///
/// `root` only affects the unit's name and module path. Fails only when the
/// file cannot be read; malformed comments degrade to empty structure.
pub fn parse_unit(root: &Path, path: &Path, extension: &str) -> Result<Unit> {
    let text = fs::read_to_string(path).map_err(|source| Error::UnreadableSource {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_source(root, path, extension, &text))
}

/// Parse already-loaded source text. Pure: the same input always yields an
/// equal [`Unit`].
pub fn parse_source(root: &Path, path: &Path, extension: &str, text: &str) -> Unit {
    let mut unit = identify(root, path, extension);
    let mut header_seen = false;

    for found in comment::extract(text) {
        let comment = parse_comment(&found.comment);
        let table = table::resolve(&comment.annotations);

        match found.signature {
            // Only the first block before `%dw` documents the module
            Signature::Header if header_seen => {}
            Signature::Header => {
                header_seen = true;
                unit.comment = comment;
                unit.table = table;
            }
            Signature::Function { name, args } => {
                unit.declarations.push(Declaration::Function(Function {
                    name: name.to_string(),
                    arguments: args::parse(args),
                    comment,
                    table,
                }));
            }
            Signature::Variable { name } => {
                unit.declarations.push(Declaration::Variable(Variable {
                    name: name.to_string(),
                    comment,
                    table,
                }));
            }
        }
    }

    tracing::debug!(
        unit = %unit.qualified_name(),
        declarations = unit.declarations.len(),
        header = header_seen,
        "parsed unit"
    );
    unit
}

/// Split a decoration-stripped comment into a [`Comment`].
pub fn parse_comment(text: &str) -> Comment {
    let (description, annotations) = annotation::split(text);
    Comment {
        text: description.trim().to_string(),
        annotations,
    }
}

/// Derive name, file name and module path from the root-relative path.
fn identify(root: &Path, path: &Path, extension: &str) -> Unit {
    let root_segments = normal_segments(root);
    let mut segments = normal_segments(path);
    // `./dw` and `dw` name the same root
    if segments.starts_with(&root_segments) && path.has_root() == root.has_root() {
        segments.drain(..root_segments.len());
    }

    let file_name = segments.last().cloned().unwrap_or_default();
    let rel_path = segments.join("/");
    let suffix = format!(".{extension}");
    let name = file_name
        .strip_suffix(suffix.as_str())
        .unwrap_or(&file_name)
        .to_string();
    if let Some(last) = segments.last_mut() {
        last.clone_from(&name);
    }

    Unit {
        name,
        file_name,
        path: rel_path,
        module_path: segments,
        ..Default::default()
    }
}

/// Path components that name a directory or file, `.` and roots dropped.
fn normal_segments(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect()
}
