//! Renderer module: trait-based format dispatch.
//!
//! Renderers only read the parsed [`Unit`]s. Every format implements the same
//! capabilities (header table, single unit, unit collection) and shares the
//! document assembly in [`assemble`].

pub mod html;
pub mod json;
pub mod markdown;
pub mod paginated;

use crate::error::{Error, Result};
use crate::model::Unit;

/// Document-level options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocOptions {
    pub write_header_table: bool,
    pub header_text: String,
    pub footer_text: String,
    /// Module names placed first, in this order
    pub module_list: Vec<String>,
}

/// Trait for rendering units into a specific output format.
pub trait Renderer {
    /// Table of modules with their descriptions, linking to each module.
    fn write_header_table(&self, units: &[&Unit]) -> Result<String>;

    fn write_unit(&self, unit: &Unit) -> Result<String>;

    fn write_units(&self, units: &[&Unit]) -> Result<String> {
        let mut out = String::new();
        for unit in units {
            out.push_str(&self.write_unit(unit)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Free-form header or footer text.
    fn write_text(&self, text: &str) -> Result<String>;

    /// Complete document: header text, optional header table, every unit in
    /// module-list order, footer text.
    fn write_document(&self, units: &[Unit], options: &DocOptions) -> Result<String> {
        assemble(self, units, options)
    }

    fn file_extension(&self) -> &str;
}

/// Default document layout shared by the text formats.
pub fn assemble<R: Renderer + ?Sized>(
    renderer: &R,
    units: &[Unit],
    options: &DocOptions,
) -> Result<String> {
    let units = ordered(units, &options.module_list);
    let mut out = String::new();

    if !options.header_text.is_empty() {
        out.push_str(&renderer.write_text(&options.header_text)?);
    }
    if options.write_header_table {
        out.push_str(&renderer.write_header_table(&units)?);
    }
    out.push_str(&renderer.write_units(&units)?);
    if !options.footer_text.is_empty() {
        out.push_str(&renderer.write_text(&options.footer_text)?);
    }

    Ok(out)
}

/// Order units so the names in `module_list` come first, in list order,
/// followed by the remaining units in discovery order.
///
/// Names that match no unit are reported and skipped.
pub fn ordered<'a>(units: &'a [Unit], module_list: &[String]) -> Vec<&'a Unit> {
    let mut out: Vec<&Unit> = Vec::with_capacity(units.len());

    for name in module_list {
        if out.iter().any(|u| &u.name == name) {
            continue;
        }
        match units.iter().find(|u| &u.name == name) {
            Some(unit) => out.push(unit),
            None => tracing::warn!(
                "module name '{name}' was supplied in the module list but matches no parsed unit"
            ),
        }
    }

    let rest: Vec<&Unit> = units
        .iter()
        .filter(|u| !out.iter().any(|placed| std::ptr::eq(*placed, *u)))
        .collect();
    out.extend(rest);
    out
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "html" => Ok(Box::new(html::HtmlRenderer::default())),
        "text" | "txt" | "pdf" => Ok(Box::new(paginated::PaginatedRenderer::default())),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(Error::UnknownFormat(format.to_string())),
    }
}

/// Collapse a multi-line description onto one line.
pub(crate) fn flatten(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
