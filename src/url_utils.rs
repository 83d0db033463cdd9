use percent_encoding::percent_decode_str;

/// Scheme put in front of inputs that lack one
pub const DEFAULT_PREFIX: &str = "http://";

/// Inputs treated as "no URL entered"
const PLACEHOLDERS: [&str; 3] = ["http://", "http://www", "http://www."];

/// Returns true for empty input and for the form placeholders people leave behind
pub fn is_placeholder(input: &str) -> bool {
    let input = input.trim();
    input.is_empty() || PLACEHOLDERS.contains(&input)
}

/// Adds a scheme prefix when none appears before the first dot.
///
/// `example.com` becomes `http://example.com`, while `ftp://example.com`
/// is left alone. Strings without any dot are returned as they are.
pub fn auto_prefix_url(url: &str, prefix: Option<&str>) -> String {
    let prefix = prefix.unwrap_or(DEFAULT_PREFIX);

    match url.find('.') {
        Some(pos) if !url[..pos].contains("//") => format!("{}{}", prefix, url),
        _ => url.to_string(),
    }
}

/// Strips every trailing slash
pub fn trim_trailing_slashes(url: &str) -> String {
    let mut url = url.to_string();
    while url.ends_with('/') {
        url.pop();
    }
    url
}

/// Decodes the value of a `Location` header.
///
/// Only `%XX` escapes are decoded; malformed escapes pass through untouched.
/// If decoding produces invalid UTF-8 the trimmed raw value is kept.
pub fn decode_location(raw: &str) -> String {
    let raw = raw.trim();
    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => decoded.trim().to_string(),
        Err(_) => raw.to_string(),
    }
}
