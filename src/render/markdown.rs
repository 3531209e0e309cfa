//! GitHub-flavored markdown renderer.
//!
//! Each unit becomes a `#` heading followed by its module path, a
//! `### Variables` section and a `### Functions` section. Descriptions,
//! annotations and tables are written as blockquotes below each declaration.

use crate::error::Result;
use crate::model::*;
use crate::render::{flatten, Renderer};
use crate::toc;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn write_header_table(&self, units: &[&Unit]) -> Result<String> {
        let mut out = String::from("| Module | Description |\n|-|-|\n");
        for unit in units {
            out.push_str(&format!(
                "| {} | {} |\n",
                toc::link(&unit.name),
                escape_cell(&flatten(&unit.comment.text))
            ));
        }
        out.push('\n');
        Ok(out)
    }

    fn write_unit(&self, unit: &Unit) -> Result<String> {
        let mut out = format!("# {}\n###### {}\n", unit.name, unit.qualified_name());
        if !unit.comment.text.is_empty() {
            out.push_str(&unit.comment.text);
            out.push('\n');
        }
        if let Some(ref table) = unit.table {
            out.push('\n');
            out.push_str(&render_table(table));
        }
        out.push('\n');

        let vars: String = unit.variables().map(render_variable).collect();
        if !vars.is_empty() {
            out.push_str("### Variables\n");
            out.push_str(&vars);
            out.push('\n');
        }

        let funcs: String = unit.functions().map(render_function).collect();
        if !funcs.is_empty() {
            out.push_str("### Functions\n");
            out.push_str(&funcs);
            out.push('\n');
        }

        Ok(out)
    }

    fn write_text(&self, text: &str) -> Result<String> {
        Ok(format!("{text}\n\n"))
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

fn render_variable(var: &Variable) -> String {
    let mut out = format!("__var__ `{}`\n", var.name);
    out.push_str(&format!("> {}\n\n", var.comment.text.replace('\n', "  \n> ")));
    if let Some(ref table) = var.table {
        out.push_str(&render_table(table));
        out.push('\n');
    }
    out
}

fn render_function(func: &Function) -> String {
    let mut out = format!("__fun__ `{}` ( {} )\n\n", func.name, render_arguments(func));

    let annotations = render_annotations(&func.comment);
    if !annotations.is_empty() {
        out.push_str(&annotations);
        out.push_str(">\n");
    }
    out.push_str(&format!("> {}\n\n", flatten(&func.comment.text)));

    if let Some(ref table) = func.table {
        out.push_str(&render_table(table));
        out.push('\n');
    }
    out
}

/// `__a__:_Number_, __b__`
fn render_arguments(func: &Function) -> String {
    func.visible_arguments()
        .map(|arg| {
            if arg.datatype.is_empty() {
                format!("__{}__", arg.name)
            } else {
                format!("__{}__:_{}_", arg.name, arg.datatype)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Params in source order, then the last return.
fn render_annotations(comment: &Comment) -> String {
    let mut out = String::new();
    for param in comment.annotations_of(TagKind::Param) {
        out.push_str(&format!(
            "> __param__ `{}` {}  \n",
            param.key,
            flatten(&param.value)
        ));
    }
    if let Some(ret) = comment.annotations_of(TagKind::Return).last() {
        out.push_str(&format!("> __return__ {}  \n", flatten(&ret.value)));
    }
    out
}

fn render_table(table: &AnnotationTable) -> String {
    let mut out = format!("> | {} |\n", join_cells(&table.columns));
    out.push_str("> |");
    for _ in &table.columns {
        out.push_str("-|");
    }
    out.push('\n');
    for row in &table.rows {
        out.push_str(&format!("> | {} |\n", join_cells(&row.fields)));
    }
    out
}

fn join_cells(cells: &[String]) -> String {
    cells
        .iter()
        .map(|c| escape_cell(c))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
