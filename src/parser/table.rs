//! Table annotation resolver: assembles `@tbl` / `@row` annotations into an
//! [`AnnotationTable`].
//!
//! ```text
//! @tbl Code,Meaning
//! @row 200,OK
//! @row 3xx,Redirect\, follow Location
//! ```

use crate::model::{Annotation, AnnotationTable, Row, TagKind};

/// Build the table declared by the first `@tbl`/`@table` annotation, if any.
///
/// Every `@row` in the list becomes a row in source order, whether it appears
/// before or after the table annotation. Field counts are not checked.
pub fn resolve(annotations: &[Annotation]) -> Option<AnnotationTable> {
    let header = annotations
        .iter()
        .find(|a| a.kind() == Some(TagKind::Table))?;

    let columns = split_fields(&header.value)
        .into_iter()
        .map(strip_newlines)
        .collect();

    let rows = annotations
        .iter()
        .filter(|a| a.kind() == Some(TagKind::Row))
        .map(|a| Row {
            fields: split_fields(&a.value)
                .into_iter()
                .map(|f| strip_newlines(&f.replace("\\,", ",")))
                .collect(),
        })
        .collect();

    Some(AnnotationTable { columns, rows })
}

/// Split on commas that are not escaped with a backslash. Escapes are left in
/// place.
pub fn split_fields(value: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut prev = None;
    for (i, c) in value.char_indices() {
        if c == ',' && prev != Some('\\') {
            fields.push(&value[start..i]);
            start = i + 1;
        }
        prev = Some(c);
    }
    fields.push(&value[start..]);
    fields
}

fn strip_newlines(field: &str) -> String {
    field.chars().filter(|&c| c != '\n' && c != '\r').collect()
}
