//! Input sanitization for user-submitted text, URLs and domains

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>|<style[^>]*>.*?</style>|<[^>]*>").expect("tag regex is valid"));

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").expect("whitespace regex is valid"));

static LABEL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9](?:[a-z0-9\-]{0,61}[a-z0-9])?$").expect("label regex is valid"));

/// Remove HTML tags, including the bodies of `<script>` and `<style>`
pub fn strip_html(input: &str) -> String {
    TAG_REGEX.replace_all(input, "").into_owned()
}

/// Clean free text from a form field.
///
/// Strips tags and control characters (newlines are kept), collapses runs of
/// spaces, trims, and truncates to `max_chars` characters.
pub fn sanitize_text(input: &str, max_chars: usize) -> String {
    let stripped = strip_html(input);
    let no_controls: String = stripped
        .chars()
        .filter(|c| !c.is_control() || *c == '\n')
        .collect();
    let collapsed = WHITESPACE_REGEX.replace_all(&no_controls, " ");
    let trimmed = collapsed.trim();
    trimmed.chars().take(max_chars).collect::<String>().trim_end().to_string()
}

/// Reduce a user-entered website to its bare registrable host.
///
/// `https://www.Example.com/path?q=1` becomes `example.com`. Returns `None`
/// for input that cannot be a public hostname.
pub fn normalize_domain(input: &str) -> Option<String> {
    let trimmed = input.trim().to_lowercase();
    if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
        return None;
    }

    let without_scheme = match trimmed.find("://") {
        Some(idx) => &trimmed[idx + 3..],
        None => trimmed.as_str(),
    };
    let host_port = without_scheme
        .split(|c| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or_default();
    let host_port = host_port.rsplit('@').next().unwrap_or_default();
    let host = host_port.split(':').next().unwrap_or_default().trim_end_matches('.');
    let host = host.strip_prefix("www.").unwrap_or(host);

    if host.len() > 253 {
        return None;
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 || !labels.iter().all(|label| LABEL_REGEX.is_match(label)) {
        return None;
    }
    // Top-level domain must not be numeric (rules out bare IPv4).
    if labels
        .last()
        .map_or(true, |tld| tld.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }

    Some(host.to_string())
}

/// Ensure a URL carries a scheme, defaulting to https
pub fn normalize_url(input: &str) -> Option<String> {
    let trimmed = input.trim();
    normalize_domain(trimmed)?;
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        Some(format!("https://{}", trimmed.trim_start_matches('/')))
    }
}

/// Escape text for interpolation into HTML email bodies
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Mask an email address for logs: `jane.doe@example.com` -> `j*******@example.com`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(1).collect();
            let hidden = local.chars().count().saturating_sub(1);
            format!("{}{}@{}", first, "*".repeat(hidden), domain)
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">Tom & Jerry's</a>"), "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;");
    }

    #[test]
    fn test_strip_html_removes_scripts() {
        assert_eq!(strip_html("Hi <b>there</b><script>alert(1)</script>!"), "Hi there!");
    }

    #[test]
    fn test_sanitize_text_collapses_and_truncates() {
        assert_eq!(sanitize_text("  hello \t  world\u{0007} ", 100), "hello world");
        assert_eq!(sanitize_text("line one\nline two", 100), "line one\nline two");
        assert_eq!(sanitize_text("abcdef", 3), "abc");
        assert_eq!(sanitize_text("ééééé", 2), "éé");
    }

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("https://www.Example.com/path?q=1").as_deref(), Some("example.com"));
        assert_eq!(normalize_domain("shop.example.co.uk").as_deref(), Some("shop.example.co.uk"));
        assert_eq!(normalize_domain("http://user@example.com:8080/").as_deref(), Some("example.com"));
        assert_eq!(normalize_domain("example.com.").as_deref(), Some("example.com"));
    }

    #[test]
    fn test_normalize_domain_rejects_garbage() {
        assert_eq!(normalize_domain(""), None);
        assert_eq!(normalize_domain("not a domain"), None);
        assert_eq!(normalize_domain("localhost"), None);
        assert_eq!(normalize_domain("192.168.0.1"), None);
        assert_eq!(normalize_domain("-bad-.com"), None);
        assert_eq!(normalize_domain("javascript:alert(1)"), None);
    }

    #[test]
    fn test_normalize_url_adds_scheme() {
        assert_eq!(normalize_url("example.com/about").as_deref(), Some("https://example.com/about"));
        assert_eq!(normalize_url("http://example.com").as_deref(), Some("http://example.com"));
        assert_eq!(normalize_url("nope"), None);
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("jane@example.com"), "j***@example.com");
        assert_eq!(mask_email("invalid"), "***");
    }
}
