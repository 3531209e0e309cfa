//! HTML renderer: standalone HTML page with semantic markup.

use crate::error::Result;
use crate::model::*;
use crate::render::{assemble, DocOptions, Renderer};
use crate::toc;

#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    /// External stylesheet linked instead of the built-in style block
    pub stylesheet: Option<String>,
}

impl HtmlRenderer {
    pub fn with_stylesheet(stylesheet: impl Into<String>) -> Self {
        Self {
            stylesheet: Some(stylesheet.into()),
        }
    }

    fn head(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>\n<html>\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str("<title>DataWeave Documentation</title>\n");
        match self.stylesheet {
            Some(ref href) => {
                out.push_str(&format!(
                    "<link rel=\"stylesheet\" href=\"{}\">\n",
                    html_escape(href)
                ));
            }
            None => {
                out.push_str("<style>\n");
                out.push_str("body { font-family: system-ui, sans-serif; max-width: 48em; margin: 2em auto; padding: 0 1em; }\n");
                out.push_str("code { background: #f4f4f4; padding: 0.15em 0.3em; border-radius: 3px; }\n");
                out.push_str("blockquote { border-left: 3px solid #ddd; margin: 0.5em 0; padding-left: 1em; }\n");
                out.push_str("table { border-collapse: collapse; margin: 0.5em 0; }\n");
                out.push_str("th, td { border: 1px solid #ddd; padding: 0.2em 0.6em; }\n");
                out.push_str(".module-path { color: #666; font-weight: normal; }\n");
                out.push_str("</style>\n");
            }
        }
        out.push_str("</head>\n<body>\n");
        out
    }
}

impl Renderer for HtmlRenderer {
    fn write_header_table(&self, units: &[&Unit]) -> Result<String> {
        let mut out = String::from("<div class=\"header-table\">\n<table>\n");
        out.push_str("<tr><th>Module</th><th>Description</th></tr>\n");
        for unit in units {
            out.push_str(&format!(
                "<tr><td><a href=\"#{}\">{}</a></td><td>{}</td></tr>\n",
                toc::slug(&unit.name),
                html_escape(&unit.name),
                html_escape(&unit.comment.text)
            ));
        }
        out.push_str("</table>\n</div>\n");
        Ok(out)
    }

    fn write_unit(&self, unit: &Unit) -> Result<String> {
        let mut out = format!(
            "<section class=\"module\">\n<h1 id=\"{}\">{}</h1>\n",
            toc::slug(&unit.name),
            html_escape(&unit.name)
        );
        out.push_str(&format!(
            "<h3 class=\"module-path\">{}</h3>\n",
            html_escape(&unit.qualified_name())
        ));
        if !unit.comment.text.is_empty() {
            out.push_str(&paragraph(&unit.comment.text));
        }
        if let Some(ref table) = unit.table {
            out.push_str(&render_table(table));
        }

        let vars: Vec<&Variable> = unit.variables().collect();
        if !vars.is_empty() {
            out.push_str("<h2>Variables</h2>\n");
            for var in vars {
                out.push_str(&render_variable(var));
            }
        }

        let funcs: Vec<&Function> = unit.functions().collect();
        if !funcs.is_empty() {
            out.push_str("<h2>Functions</h2>\n");
            for func in funcs {
                out.push_str(&render_function(func));
            }
        }

        out.push_str("</section>\n");
        Ok(out)
    }

    fn write_text(&self, text: &str) -> Result<String> {
        Ok(format!("<div class=\"free-text\">{}</div>\n", html_escape(text)))
    }

    fn write_document(&self, units: &[Unit], options: &DocOptions) -> Result<String> {
        let mut out = self.head();
        out.push_str(&assemble(self, units, options)?);
        out.push_str("</body>\n</html>\n");
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "html"
    }
}

fn render_variable(var: &Variable) -> String {
    let mut out = format!("<h4>var <code>{}</code></h4>\n", html_escape(&var.name));
    out.push_str("<blockquote>\n");
    out.push_str(&paragraph(&var.comment.text));
    if let Some(ref table) = var.table {
        out.push_str(&render_table(table));
    }
    out.push_str("</blockquote>\n");
    out
}

fn render_function(func: &Function) -> String {
    let args: Vec<String> = func
        .visible_arguments()
        .map(|arg| {
            if arg.datatype.is_empty() {
                format!("<em>{}</em>", html_escape(&arg.name))
            } else {
                format!(
                    "<em>{}</em>: {}",
                    html_escape(&arg.name),
                    html_escape(&arg.datatype)
                )
            }
        })
        .collect();
    let mut out = format!(
        "<h4>fun <code>{}</code>({})</h4>\n",
        html_escape(&func.name),
        args.join(", ")
    );
    out.push_str("<blockquote>\n");

    let params: Vec<&Annotation> = func.comment.annotations_of(TagKind::Param).collect();
    let ret = func.comment.annotations_of(TagKind::Return).last();
    if !params.is_empty() || ret.is_some() {
        out.push_str("<dl>\n");
        for param in params {
            out.push_str(&format!(
                "  <dt>param <code>{}</code></dt><dd>{}</dd>\n",
                html_escape(&param.key),
                html_escape(&param.value)
            ));
        }
        if let Some(ret) = ret {
            out.push_str(&format!(
                "  <dt>return</dt><dd>{}</dd>\n",
                html_escape(&ret.value)
            ));
        }
        out.push_str("</dl>\n");
    }

    out.push_str(&paragraph(&func.comment.text));
    if let Some(ref table) = func.table {
        out.push_str(&render_table(table));
    }
    out.push_str("</blockquote>\n");
    out
}

fn render_table(table: &AnnotationTable) -> String {
    let mut out = String::from("<table>\n<tr>");
    for column in &table.columns {
        out.push_str(&format!("<th>{}</th>", html_escape(column)));
    }
    out.push_str("</tr>\n");
    for row in &table.rows {
        out.push_str("<tr>");
        for field in &row.fields {
            out.push_str(&format!("<td>{}</td>", html_escape(field)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}

fn paragraph(text: &str) -> String {
    format!("<p>{}</p>\n", html_escape(text).replace('\n', "<br/>\n"))
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
