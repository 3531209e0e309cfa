//! Annotation splitter: separates description text from `@tag value` lines.
//!
//! An annotation starts at a line beginning with `@` and runs until the next
//! such line or the end of the comment. Values may span several lines.

use crate::model::{Annotation, TagKind};

/// Split a decoration-stripped comment into its description and annotations.
///
/// The description is returned untrimmed; callers decide how to normalise it.
/// Text without any `@` line is all description.
pub fn split(text: &str) -> (&str, Vec<Annotation>) {
    let starts: Vec<usize> = annotation_line_starts(text).collect();
    let Some(&first) = starts.first() else {
        return (text, Vec::new());
    };

    let mut annotations = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        // The line break before the next annotation belongs to neither entry
        let end = starts.get(i + 1).map_or(text.len(), |&next| next - 1);
        let entry = &text[start..end];
        match parse_entry(entry) {
            Some(annotation) => annotations.push(annotation),
            None => tracing::debug!(entry, "skipping malformed annotation"),
        }
    }

    (&text[..first], annotations)
}

/// Byte offsets of every line that begins with `@`.
fn annotation_line_starts(text: &str) -> impl Iterator<Item = usize> + '_ {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(i, _)| i + 1))
        .filter(move |&i| text[i..].starts_with('@'))
}

/// Parse `@tag value`. The tag is one or more word characters followed by a
/// single whitespace separator or the end of the entry.
fn parse_entry(entry: &str) -> Option<Annotation> {
    let rest = entry.strip_prefix('@')?;
    let tag_len = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    if tag_len == 0 {
        return None;
    }
    let (tag, after) = rest.split_at(tag_len);

    let value = match after.chars().next() {
        None => "",
        Some(sep) if sep.is_whitespace() => &after[sep.len_utf8()..],
        Some(_) => return None,
    };

    let (key, value) = if TagKind::resolve(tag) == Some(TagKind::Param) {
        split_key(value)
    } else {
        (String::new(), value.to_string())
    };

    Some(Annotation {
        tag: tag.to_string(),
        key,
        value,
    })
}

/// Split a parameter annotation into its name and description on the first
/// whitespace run. Without whitespace the key stays empty.
fn split_key(text: &str) -> (String, String) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(i) => (
            text[..i].to_string(),
            text[i..].trim_start().to_string(),
        ),
        None => (String::new(), text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_annotations_is_all_description() {
        let (desc, anns) = split("Just text.\nMore text with an inline @mention.");
        assert_eq!(desc, "Just text.\nMore text with an inline @mention.");
        assert!(anns.is_empty());
    }

    #[test]
    fn param_and_return_in_order() {
        let (desc, anns) = split("Adds.\n@param a first operand\n@return the sum");
        assert_eq!(desc, "Adds.\n");
        assert_eq!(anns.len(), 2);
        assert_eq!(anns[0].tag, "param");
        assert_eq!(anns[0].key, "a");
        assert_eq!(anns[0].value, "first operand");
        assert_eq!(anns[1].tag, "return");
        assert_eq!(anns[1].key, "");
        assert_eq!(anns[1].value, "the sum");
    }

    #[test]
    fn short_param_tag_keeps_casing() {
        let (_, anns) = split("@P name The name.");
        assert_eq!(anns[0].tag, "P");
        assert_eq!(anns[0].key, "name");
        assert_eq!(anns[0].value, "The name.");
    }

    #[test]
    fn multiline_value_runs_to_next_annotation() {
        let (_, anns) = split("@r a value\nspanning lines\n\n@since 2.0");
        assert_eq!(anns[0].value, "a value\nspanning lines\n");
        assert_eq!(anns[1].tag, "since");
        assert_eq!(anns[1].value, "2.0");
    }

    #[test]
    fn inline_at_does_not_end_a_value() {
        let (_, anns) = split("@author jane@example.com\n@r ok");
        assert_eq!(anns[0].value, "jane@example.com");
        assert_eq!(anns.len(), 2);
    }

    #[test]
    fn tag_without_value() {
        let (_, anns) = split("@deprecated\n@p x the x");
        assert_eq!(anns[0].tag, "deprecated");
        assert_eq!(anns[0].value, "");
        assert_eq!(anns[1].key, "x");
    }

    #[test]
    fn param_without_description_has_empty_key() {
        let (_, anns) = split("@param lonely");
        assert_eq!(anns[0].key, "");
        assert_eq!(anns[0].value, "lonely");
    }

    #[test]
    fn malformed_tag_ends_previous_value() {
        let (_, anns) = split("@r result\n@-bad line\n@@\n@row 1,2");
        assert_eq!(anns.len(), 2);
        assert_eq!(anns[0].value, "result");
        assert_eq!(anns[1].tag, "row");
    }

    #[test]
    fn indented_at_is_not_an_annotation() {
        let (desc, anns) = split("Text\n  @param a b");
        assert_eq!(desc, "Text\n  @param a b");
        assert!(anns.is_empty());
    }
}
