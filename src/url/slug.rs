/// Converts free text into a URL slug
///
/// Lowercases the text, drops punctuation, and joins the remaining words with
/// single hyphens. Whitespace, underscores and hyphens all count as word
/// separators.
///
/// # Examples
///
/// ```
/// use jobgraph::url::slugify;
///
/// assert_eq!(slugify("Senior Rust Engineer"), "senior-rust-engineer");
/// assert_eq!(slugify("  C++ / Embedded  "), "c-embedded");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.trim().chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            pending_separator = true;
        } else if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.extend(c.to_lowercase());
        }
    }

    slug
}
