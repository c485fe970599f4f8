use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("static regex is valid")
});

/// Extracts email addresses from free text, first occurrence order, no repeats
pub fn extract_emails(text: &str) -> Vec<String> {
    let mut emails: Vec<String> = Vec::new();
    for found in EMAIL_RE.find_iter(text) {
        let email = found.as_str().to_string();
        if !emails.contains(&email) {
            emails.push(email);
        }
    }
    emails
}
