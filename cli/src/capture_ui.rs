use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use thumbmark::error::{Result, ThumbmarkError};

/// Run a capturing operation behind an animated spinner
///
/// The spinner ends with a success mark or a short categorized reason.
pub fn capture_with_spinner<T>(url: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );

    let url_display = truncate_url(url, 60);
    spinner.set_message(format!("Capturing: {}", url_display));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = f();

    match &result {
        Ok(_) => spinner.finish_with_message(format!("✓ {}", url_display)),
        Err(e) => {
            spinner.finish_with_message(format!("✗ {} ({})", url_display, categorize_error(e)))
        }
    }

    result
}

/// Progress bar for batch work over `total` URLs
pub fn batch_progress(total: usize, verb: &str) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{pos}/{len}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb.set_message(verb.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Update `pb` for the entry at `index` (1-based)
pub fn report_entry(pb: &ProgressBar, verb: &str, index: usize, url: &str) {
    pb.set_position(index.saturating_sub(1) as u64);
    pb.set_message(format!("{} {}", verb, truncate_url(url, url_budget(verb))));
}

/// Space left for a URL after the bar's prefix, based on terminal width
fn url_budget(verb: &str) -> usize {
    let terminal_width = Term::stderr().size().1 as usize;
    // spinner, counter and separators
    let overhead = 2 + 2 + 11 + 1 + verb.len() + 1;

    if terminal_width > overhead + 10 {
        terminal_width - overhead
    } else {
        60
    }
}

/// Truncate URL to specified length with ellipsis
pub fn truncate_url(url: &str, max_len: usize) -> String {
    if url.chars().count() <= max_len {
        return url.to_string();
    }
    let keep = max_len.saturating_sub(3); // Reserve 3 chars for "..."
    let head: String = url.chars().take(keep).collect();
    format!("{}...", head)
}

/// Categorize error for user-friendly display
pub fn categorize_error(error: &ThumbmarkError) -> &'static str {
    match error {
        ThumbmarkError::Duplicate(_) => "already bookmarked",
        ThumbmarkError::Validation(_) => "invalid input",
        ThumbmarkError::Io(_) => "storage error",
        ThumbmarkError::Database(_) => "database error",
        ThumbmarkError::Capture(msg) => {
            if msg.contains("timed out") {
                "timeout"
            } else if msg.contains("ERR_NAME_NOT_RESOLVED") {
                "dns error"
            } else if msg.contains("ERR_CONNECTION") {
                "connection error"
            } else if msg.contains("ERR_CERT") || msg.contains("ERR_SSL") {
                "tls error"
            } else if msg.contains("no headless browser") {
                "no browser"
            } else {
                "capture error"
            }
        }
        _ => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://example.com", 60, "https://example.com")]
    #[case(
        "https://example.com/very/long/path/that/exceeds/the/limit",
        30,
        "https://example.com/very/lo..."
    )]
    #[case("https://a.com", 100, "https://a.com")]
    #[case("https://example.com/test", 20, "https://example.c...")]
    fn test_truncate_url(#[case] url: &str, #[case] max_len: usize, #[case] expected: &str) {
        let result = truncate_url(url, max_len);
        assert_eq!(result, expected);
        assert!(result.len() <= max_len);
    }

    #[test]
    fn test_truncate_url_boundary() {
        let url = "https://example.com/12345";
        assert_eq!(truncate_url(url, 25), url);

        let result = truncate_url(url, 24);
        assert_eq!(result, "https://example.com/1...");
        assert_eq!(result.len(), 24);
    }

    #[test]
    fn test_truncate_url_multibyte() {
        // must not split inside a character
        let url = "https://例え.jp/ページ/ページ";
        let result = truncate_url(url, 12);
        assert_eq!(result.chars().count(), 12);
        assert!(result.ends_with("..."));
    }

    #[rstest]
    #[case("timed out after 30s", "timeout")]
    #[case("net::ERR_NAME_NOT_RESOLVED at https://x.invalid", "dns error")]
    #[case("net::ERR_CONNECTION_REFUSED", "connection error")]
    #[case("net::ERR_CERT_AUTHORITY_INVALID", "tls error")]
    #[case("no headless browser found on PATH (tried chromium)", "no browser")]
    #[case("browser exited with exit status: 3 while loading https://a.example", "capture error")]
    fn test_categorize_capture_error(#[case] msg: &str, #[case] expected: &str) {
        let error = ThumbmarkError::Capture(msg.to_string());
        assert_eq!(categorize_error(&error), expected);
    }

    #[test]
    fn test_categorize_other_errors() {
        assert_eq!(
            categorize_error(&ThumbmarkError::Duplicate("https://a.example".into())),
            "already bookmarked"
        );
        assert_eq!(
            categorize_error(&ThumbmarkError::Validation("empty".into())),
            "invalid input"
        );
        assert_eq!(categorize_error(&ThumbmarkError::NotFound(3)), "error");
    }

    #[test]
    fn test_capture_with_spinner_passes_result_through() {
        let ok = capture_with_spinner("https://example.com", || Ok(7));
        assert_eq!(ok.unwrap(), 7);

        let err: Result<()> = capture_with_spinner("https://example.com", || {
            Err(ThumbmarkError::Capture("timed out after 1s".into()))
        });
        assert!(matches!(err, Err(ThumbmarkError::Capture(_))));
    }
}
