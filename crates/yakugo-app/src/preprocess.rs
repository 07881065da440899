use unicode_normalization::UnicodeNormalization;

/// Canonical form of a query: trimmed, NFKC-normalized, line breaks removed
pub fn normalize(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    let text: String = text.nfkc().collect();
    text.replace(['\n', '\r'], "").trim().to_string()
}
