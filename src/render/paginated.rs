//! Paginated plain-text renderer for printing.
//!
//! Lines are wrapped to a fixed width and cut into fixed-length pages. Every
//! module starts on a new page, pages are separated by form feeds and each
//! page ends with a centered `- N -` footer.

use crate::error::Result;
use crate::model::*;
use crate::render::{assemble, flatten, DocOptions, Renderer};

/// Forced page break between modules.
const PAGE_BREAK: char = '\x0c';

/// Blank line plus page number.
const FOOTER_LINES: usize = 2;

#[derive(Debug, Clone)]
pub struct PaginatedRenderer {
    /// Lines per page, footer included
    pub page_length: usize,
    /// Columns per line
    pub width: usize,
}

impl Default for PaginatedRenderer {
    fn default() -> Self {
        Self {
            page_length: 66,
            width: 80,
        }
    }
}

impl PaginatedRenderer {
    /// Cut `body` into pages. Form feeds in `body` force a new page; empty
    /// sections produce no page.
    pub fn paginate(&self, body: &str) -> String {
        let per_page = self.page_length.saturating_sub(FOOTER_LINES).max(1);
        let mut pages: Vec<Vec<String>> = Vec::new();

        for section in body.split(PAGE_BREAK) {
            if section.trim().is_empty() {
                continue;
            }
            let lines: Vec<String> = section
                .trim_matches('\n')
                .lines()
                .flat_map(|line| wrap(line, self.width))
                .collect();
            for chunk in lines.chunks(per_page) {
                pages.push(chunk.to_vec());
            }
        }

        let mut out = String::new();
        for (i, mut page) in pages.into_iter().enumerate() {
            if i > 0 {
                out.push(PAGE_BREAK);
            }
            page.resize(per_page, String::new());
            page.push(String::new());
            page.push(
                format!("{:^width$}", format!("- {} -", i + 1), width = self.width)
                    .trim_end()
                    .to_string(),
            );
            for line in page {
                out.push_str(&line);
                out.push('\n');
            }
        }
        out
    }
}

impl Renderer for PaginatedRenderer {
    fn write_header_table(&self, units: &[&Unit]) -> Result<String> {
        let name_width = units
            .iter()
            .map(|u| u.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Module".len());

        let mut out = format!("{:<name_width$}  Description\n", "Module");
        out.push_str(&format!("{}  {}\n", "-".repeat(name_width), "-".repeat(11)));
        for unit in units {
            out.push_str(&format!(
                "{:<name_width$}  {}\n",
                unit.name,
                flatten(&unit.comment.text)
            ));
        }
        out.push('\n');
        Ok(out)
    }

    fn write_unit(&self, unit: &Unit) -> Result<String> {
        let mut out = format!("{}\n{}\n", unit.name, "=".repeat(unit.name.chars().count()));
        out.push_str(&unit.qualified_name());
        out.push_str("\n\n");
        if !unit.comment.text.is_empty() {
            out.push_str(&unit.comment.text);
            out.push_str("\n\n");
        }
        if let Some(ref table) = unit.table {
            out.push_str(&render_table(table, ""));
            out.push('\n');
        }

        let vars: Vec<&Variable> = unit.variables().collect();
        if !vars.is_empty() {
            out.push_str("Variables\n---------\n");
            for var in vars {
                out.push_str(&format!("  var {}\n", var.name));
                out.push_str(&indent(&var.comment.text, "      "));
                if let Some(ref table) = var.table {
                    out.push_str(&render_table(table, "      "));
                }
                out.push('\n');
            }
        }

        let funcs: Vec<&Function> = unit.functions().collect();
        if !funcs.is_empty() {
            out.push_str("Functions\n---------\n");
            for func in funcs {
                out.push_str(&render_function(func));
                out.push('\n');
            }
        }

        Ok(out)
    }

    fn write_units(&self, units: &[&Unit]) -> Result<String> {
        let mut out = String::new();
        for unit in units {
            out.push(PAGE_BREAK);
            out.push_str(&self.write_unit(unit)?);
        }
        Ok(out)
    }

    fn write_text(&self, text: &str) -> Result<String> {
        Ok(format!("{text}\n\n"))
    }

    fn write_document(&self, units: &[Unit], options: &DocOptions) -> Result<String> {
        Ok(self.paginate(&assemble(self, units, options)?))
    }

    fn file_extension(&self) -> &str {
        "txt"
    }
}

fn render_function(func: &Function) -> String {
    let args: Vec<String> = func
        .visible_arguments()
        .map(|arg| {
            if arg.datatype.is_empty() {
                arg.name.clone()
            } else {
                format!("{}: {}", arg.name, arg.datatype)
            }
        })
        .collect();
    let mut out = format!("  fun {}({})\n", func.name, args.join(", "));

    for param in func.comment.annotations_of(TagKind::Param) {
        out.push_str(&format!(
            "      param {}  {}\n",
            param.key,
            flatten(&param.value)
        ));
    }
    if let Some(ret) = func.comment.annotations_of(TagKind::Return).last() {
        out.push_str(&format!("      return  {}\n", flatten(&ret.value)));
    }
    out.push_str(&indent(&func.comment.text, "      "));
    if let Some(ref table) = func.table {
        out.push_str(&render_table(table, "      "));
    }
    out
}

/// Columns padded to their widest cell.
fn render_table(table: &AnnotationTable, prefix: &str) -> String {
    let count = table
        .rows
        .iter()
        .map(|r| r.fields.len())
        .chain(std::iter::once(table.columns.len()))
        .max()
        .unwrap_or(0);
    let mut widths = vec![0; count];
    for cells in std::iter::once(&table.columns).chain(table.rows.iter().map(|r| &r.fields)) {
        for (i, cell) in cells.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, &w)| format!("{:<w$}", cells.get(i).map(String::as_str).unwrap_or("")))
            .collect();
        format!("{prefix}{}\n", padded.join(" | ").trim_end())
    };

    let mut out = line(&table.columns);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("{prefix}{}\n", rule.join("-+-")));
    for row in &table.rows {
        out.push_str(&line(&row.fields));
    }
    out
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|l| {
            if l.trim().is_empty() {
                "\n".to_string()
            } else {
                format!("{prefix}{l}\n")
            }
        })
        .collect()
}

/// Greedy word wrap keeping the line's leading indentation.
fn wrap(line: &str, width: usize) -> Vec<String> {
    if line.chars().count() <= width {
        return vec![line.to_string()];
    }

    let body = line.trim_start();
    let lead = &line[..line.len() - body.len()];
    let mut lines = Vec::new();
    let mut current = lead.to_string();

    for word in body.split_whitespace() {
        let fits = current.chars().count() + 1 + word.chars().count() <= width;
        if current.trim().is_empty() {
            current.push_str(word);
        } else if fits {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::replace(&mut current, format!("{lead}{word}")));
        }
    }
    lines.push(current);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer(page_length: usize) -> PaginatedRenderer {
        PaginatedRenderer {
            page_length,
            width: 20,
        }
    }

    #[test]
    fn every_page_has_fixed_length_and_footer() {
        let body: String = (1..=7).map(|i| format!("line {i}\n")).collect();
        let text = renderer(5).paginate(&body);
        let pages: Vec<&str> = text.split(PAGE_BREAK).collect();
        assert_eq!(pages.len(), 3);
        for (i, page) in pages.iter().enumerate() {
            assert_eq!(page.lines().count(), 5);
            assert_eq!(page.lines().last().unwrap().trim(), format!("- {} -", i + 1));
        }
        assert!(pages[0].starts_with("line 1\nline 2\nline 3\n\n"));
        assert!(pages[2].starts_with("line 7\n\n\n\n"));
    }

    #[test]
    fn page_breaks_start_new_pages() {
        let text = renderer(6).paginate("a\n\x0cb\n\x0c\n\x0cc\n");
        assert_eq!(text.matches(PAGE_BREAK).count(), 2);
    }

    #[test]
    fn footer_is_centered() {
        let text = renderer(3).paginate("x\n");
        assert_eq!(text, "x\n\n       - 1 -\n");
    }

    #[test]
    fn wrap_keeps_indent() {
        let lines = wrap("    alpha beta gamma delta", 16);
        assert_eq!(lines, ["    alpha beta", "    gamma delta"]);
    }

    #[test]
    fn each_module_gets_its_own_page() {
        let units = vec![
            Unit {
                name: "a".into(),
                module_path: vec!["a".into()],
                ..Default::default()
            },
            Unit {
                name: "b".into(),
                module_path: vec!["b".into()],
                ..Default::default()
            },
        ];
        let text = PaginatedRenderer::default()
            .write_document(&units, &DocOptions::default())
            .unwrap();
        let pages: Vec<&str> = text.split(PAGE_BREAK).collect();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].starts_with("a\n=\na\n"));
        assert!(pages[1].starts_with("b\n=\nb\n"));
        assert!(pages[1].trim_end().ends_with("- 2 -"));
    }

    #[test]
    fn table_columns_are_aligned() {
        let table = AnnotationTable {
            columns: vec!["in".into(), "result".into()],
            rows: vec![Row {
                fields: vec!["long input".into(), "x".into()],
            }],
        };
        assert_eq!(
            render_table(&table, ""),
            "in         | result\n-----------+-------\nlong input | x\n"
        );
    }
}
