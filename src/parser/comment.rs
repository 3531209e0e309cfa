//! Comment extractor: locates `/** ... */` blocks and the declaration that
//! immediately follows each one.
//!
//! The source is scanned block by block rather than matched with one pattern
//! over the whole file: every `/*` opener is paired with the first `*/` after
//! it, and when several openers precede the same closer the innermost one
//! wins. Only whitespace may separate a block from the declaration it
//! documents.

use regex::Regex;
use std::sync::LazyLock;

/// Language marker that opens a module header.
pub const HEADER_MARKER: &str = "%dw";

static RE_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:function|fun)\b(?:\s+(\w+))?\s*\(").unwrap());

static RE_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:variable|var)\b(?:\s+(\w+))?").unwrap());

/// What a documentation block is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signature<'a> {
    /// The `%dw` module header
    Header,
    /// `fun name(args)`; `args` is the raw text between the parentheses
    Function { name: &'a str, args: &'a str },
    /// `var name`
    Variable { name: &'a str },
}

/// A documentation block together with the declaration it precedes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted<'a> {
    pub signature: Signature<'a>,
    /// Decoration-stripped comment text, trimmed
    pub comment: String,
}

/// A raw block comment found by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block<'a> {
    /// Text between `/*` and `*/`
    interior: &'a str,
    /// Byte offset just past the closing `*/`
    end: usize,
}

impl<'a> Block<'a> {
    /// Documentation blocks open with `/**`. `/**/` is an empty plain comment.
    fn doc_body(&self) -> Option<&'a str> {
        self.interior.strip_prefix('*')
    }
}

/// Extract every documented header, function and variable, in file order.
///
/// Blocks that are not followed by a recognised declaration are skipped, as
/// are declarations without a documentation block.
pub fn extract(source: &str) -> Vec<Extracted<'_>> {
    let mut found = Vec::new();

    for block in scan_blocks(source) {
        let Some(body) = block.doc_body() else {
            continue;
        };
        match signature_after(&source[block.end..]) {
            Some(signature) => found.push(Extracted {
                signature,
                comment: strip_decoration(body),
            }),
            None => tracing::trace!(
                offset = block.end,
                "documentation block not followed by a declaration"
            ),
        }
    }

    found
}

/// Pair each block-comment opener with its closer, innermost first.
fn scan_blocks(source: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some(rel) = source[pos..].find("/*") {
        let body_start = pos + rel + 2;
        let Some(close_rel) = source[body_start..].find("*/") else {
            // Unterminated comment runs to end of input
            break;
        };
        let close = body_start + close_rel;

        // A later opener before the same closer starts the innermost block
        let start = match source[body_start..close].rfind("/*") {
            Some(inner) => body_start + inner + 2,
            None => body_start,
        };

        blocks.push(Block {
            interior: &source[start..close],
            end: close + 2,
        });
        pos = close + 2;
    }

    blocks
}

/// Recognise the declaration that follows a block, allowing only whitespace
/// in between.
fn signature_after(rest: &str) -> Option<Signature<'_>> {
    let rest = rest.trim_start();

    if rest.starts_with(HEADER_MARKER) {
        return Some(Signature::Header);
    }

    if let Some(caps) = RE_FUNCTION.captures(rest) {
        let name = caps.get(1).map_or("", |m| m.as_str());
        let open = caps.get(0).map_or(0, |m| m.end());
        return match argument_text(&rest[open..]) {
            Some(args) => Some(Signature::Function { name, args }),
            None => {
                tracing::debug!(function = name, "unterminated argument list");
                None
            }
        };
    }

    if let Some(caps) = RE_VARIABLE.captures(rest) {
        let name = caps.get(1).map_or("", |m| m.as_str());
        return Some(Signature::Variable { name });
    }

    None
}

/// Text up to the `)` that closes an already-consumed `(`.
fn argument_text(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(&text[..i]),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Remove the `" * "` leader from each line and trim the joined result.
///
/// Internal blank lines and indentation beyond the leader are preserved.
pub fn strip_decoration(body: &str) -> String {
    body.split('\n')
        .map(strip_leader)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// At most one whitespace character, then `*`, then at most one space.
fn strip_leader(line: &str) -> &str {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let rest = match line.chars().next() {
        Some(c) if c.is_whitespace() => &line[c.len_utf8()..],
        _ => line,
    };
    match rest.strip_prefix('*') {
        Some(after) => after.strip_prefix(' ').unwrap_or(after),
        None => line,
    }
}
