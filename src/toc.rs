//! Heading anchors for the module header table.

/// GitHub heading anchor slug.
///
/// - lowercase
/// - keep alphanumerics, spaces, hyphens and underscores; drop everything else
/// - replace spaces with hyphens
pub fn slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
            slug.push(c);
        }
    }
    slug.replace(' ', "-")
}

/// Markdown link to the heading `text`.
pub fn link(text: &str) -> String {
    format!("[{}](#{})", text, slug(text))
}
