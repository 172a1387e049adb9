//! URL-safe slug derivation for blog posts.

/// Derive a slug from a title.
///
/// Lower-cases the input, drops every character that is not an ASCII letter,
/// digit, whitespace or hyphen, turns whitespace runs into a single hyphen and
/// collapses repeated hyphens. The result never starts or ends with a hyphen
/// and may be empty when the title has no usable characters.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' {
            pending_hyphen = true;
        }
    }

    slug
}
