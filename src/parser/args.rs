//! Argument list parser: turns `a: Number, b` into [`Argument`]s.

use crate::model::Argument;

/// Parse the raw text between a function's parentheses.
///
/// Segments are split on top-level commas. `name: type` keeps everything
/// after the first colon as the type label. An empty list yields a single
/// argument with an empty name.
pub fn parse(text: &str) -> Vec<Argument> {
    let mut segments = split_top_level(text);
    while segments.len() > 1 && segments.last().is_some_and(|s| s.trim().is_empty()) {
        segments.pop();
    }

    segments
        .into_iter()
        .map(|segment| match segment.split_once(':') {
            Some((name, datatype)) => Argument::new(name.trim(), datatype.trim()),
            None => Argument::new(segment.trim(), ""),
        })
        .collect()
}

fn split_top_level(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    // Generic brackets only, as in `Array<String>`
    let mut angle = 0usize;
    let mut start = 0;
    let mut prev: Option<char> = None;
    for (i, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            '<' if prev.is_some_and(|p| p.is_alphanumeric() || p == '_') => angle += 1,
            // `->` in a function type is not a closing bracket
            '>' if angle > 0 && prev != Some('-') => angle -= 1,
            ',' if depth == 0 && angle == 0 => {
                segments.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        prev = Some(c);
    }
    segments.push(&text[start..]);
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_arguments() {
        assert_eq!(
            parse("a: Number, b: Number"),
            [Argument::new("a", "Number"), Argument::new("b", "Number")]
        );
    }

    #[test]
    fn untyped_arguments() {
        assert_eq!(
            parse("x, y"),
            [Argument::new("x", ""), Argument::new("y", "")]
        );
    }

    #[test]
    fn empty_list_is_one_empty_argument() {
        assert_eq!(parse(""), [Argument::default()]);
        assert_eq!(parse("   "), [Argument::default()]);
    }

    #[test]
    fn trailing_comma_dropped() {
        assert_eq!(parse("a: String,"), [Argument::new("a", "String")]);
    }

    #[test]
    fn type_keeps_text_after_first_colon() {
        assert_eq!(
            parse("m: { a: String }"),
            [Argument::new("m", "{ a: String }")]
        );
    }

    #[test]
    fn nested_commas_stay_in_type() {
        assert_eq!(
            parse("f: (String, Number) -> Boolean, items: Array<Pair<String, Number>>"),
            [
                Argument::new("f", "(String, Number) -> Boolean"),
                Argument::new("items", "Array<Pair<String, Number>>"),
            ]
        );
    }

    #[test]
    fn comparison_in_default_value_is_not_a_bracket() {
        assert_eq!(
            parse("a = 1 < 2, b: Number, c"),
            [
                Argument::new("a = 1 < 2", ""),
                Argument::new("b", "Number"),
                Argument::new("c", ""),
            ]
        );
        assert_eq!(
            parse("a = 3 > 2, b"),
            [Argument::new("a = 3 > 2", ""), Argument::new("b", "")]
        );
    }
}
