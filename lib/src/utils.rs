use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn get_default_datadir() -> PathBuf {
    if let Ok(path) = std::env::var("THUMBMARK_DATA_DIR") {
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(path).join("thumbmark");
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local/share/thumbmark");
    }

    #[cfg(target_os = "windows")]
    if let Ok(appdata) = std::env::var("APPDATA") {
        return PathBuf::from(appdata).join("thumbmark");
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

pub fn get_config_dir() -> PathBuf {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(path).join("thumbmark");
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config/thumbmark");
    }

    #[cfg(target_os = "windows")]
    if let Ok(appdata) = std::env::var("APPDATA") {
        return PathBuf::from(appdata).join("thumbmark");
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Current UNIX timestamp in seconds
pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Escape text for use inside an HTML attribute value or element body
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

/// Decode the entities produced by `escape_html`, `&apos;` and numeric
/// character references. Unknown entities are left untouched.
pub fn unescape_html(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        let decoded = rest.find(';').and_then(|end| {
            let entity = &rest[1..end];
            let c = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => numeric_entity(entity),
            };
            c.map(|c| (c, end + 1))
        });

        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// `#38` or `#x26` style character references
fn numeric_entity(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://example.com", "https://example.com")]
    #[case("a&b", "a&amp;b")]
    #[case("<\"quoted\">", "&lt;&quot;quoted&quot;&gt;")]
    #[case("it's", "it&#39;s")]
    fn test_escape_html(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_html(input), expected);
    }

    #[rstest]
    #[case("https://example.com/?a=1&amp;b=2", "https://example.com/?a=1&b=2")]
    #[case("&lt;tag&gt;", "<tag>")]
    #[case("&quot;x&quot; &apos;y&#39;", "\"x\" 'y'")]
    #[case("AT&T", "AT&T")]
    #[case("&unknown; stays", "&unknown; stays")]
    #[case("trailing &", "trailing &")]
    #[case("https://example.com/?a=1&#38;b=2", "https://example.com/?a=1&b=2")]
    #[case("https://example.com/?a=1&#x26;b=2&#X26;c=3", "https://example.com/?a=1&b=2&c=3")]
    #[case("caf&#233; &#x1F600;", "café 😀")]
    #[case("&#; &#x; &#xZZ; &#1114112;", "&#; &#x; &#xZZ; &#1114112;")]
    fn test_unescape_html(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(unescape_html(input), expected);
    }

    #[test]
    fn test_escape_unescape_inverse() {
        let raw = "https://example.com/search?q=\"rust\"&lang=<en>";
        assert_eq!(unescape_html(&escape_html(raw)), raw);
    }

    #[test]
    fn test_now_unix_is_positive() {
        assert!(now_unix() > 1_600_000_000);
    }
}
