//! Turns raw email bodies into plain text suitable for prompting.

use htmd::HtmlToMarkdown;
use regex::Regex;

/// A single email reduced to prompt-ready plain text. Produced once
/// per pipeline run and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct NormalizedEmail {
    pub subject: String,
    pub body: String,
}

impl NormalizedEmail {
    pub fn new(subject: &str, raw_body: &str) -> Self {
        Self {
            subject: subject.trim().to_string(),
            body: normalize(raw_body),
        }
    }

    /// Subject and body combined for prompting, truncated to `limit`
    /// characters. Truncation is silent: staying inside the model's
    /// practical context budget matters more than the tail of a long
    /// message.
    pub fn prompt_text(&self, limit: usize) -> String {
        let full = format!("Subject: {}\n{}", self.subject, self.body);
        truncate_chars(&full, limit)
    }
}

/// Converts a raw, possibly-HTML email body into clean readable text.
///
/// Script, style, metadata, embedded svg, and hyperlink markup carry
/// no readable value and are dropped entirely, content included
/// (tracking links in marketing email are mostly noise). Malformed
/// markup degrades to the raw text rather than failing the pipeline.
pub fn normalize(raw_body: &str) -> String {
    if raw_body.trim().is_empty() {
        return String::new();
    }

    let converter = HtmlToMarkdown::builder()
        .skip_tags(vec![
            "script", "style", "head", "title", "meta", "link", "iframe", "svg", "img", "footer",
            "a",
        ])
        .build();
    let text = converter
        .convert(raw_body)
        .unwrap_or_else(|_| raw_body.to_string());

    let collapsed = Regex::new(r"\n{3,}")
        .unwrap()
        .replace_all(&text, "\n")
        .to_string();

    collapsed.trim().to_string()
}

fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n  "), "");
    }

    #[test]
    fn test_normalize_plain_text_passthrough() {
        let out = normalize("Lunch at noon tomorrow?");
        assert_eq!(out, "Lunch at noon tomorrow?");
    }

    #[test]
    fn test_normalize_strips_script_and_style() {
        let html = r#"
            <html>
              <head><style>body { color: red; }</style></head>
              <body>
                <script>trackUser("abc123");</script>
                <p>Team sync on Friday at 2pm.</p>
              </body>
            </html>
        "#;
        let out = normalize(html);
        assert!(out.contains("Team sync on Friday at 2pm."));
        assert!(!out.contains("trackUser"));
        assert!(!out.contains("color: red"));
    }

    #[test]
    fn test_normalize_drops_link_markup_entirely() {
        let html = r#"<p>See you there.</p><a href="https://t.co/abc">Unsubscribe</a>"#;
        let out = normalize(html);
        assert!(out.contains("See you there."));
        assert!(!out.contains("Unsubscribe"));
        assert!(!out.contains("t.co"));
    }

    #[test]
    fn test_normalize_collapses_newline_runs() {
        let html = "<p>one</p><br><br><br><br><p>two</p>";
        let out = normalize(html);
        assert!(!out.contains("\n\n\n"));
        assert!(out.contains("one"));
        assert!(out.contains("two"));
    }

    #[test]
    fn test_normalize_malformed_markup_degrades() {
        let out = normalize("<div><p>Open house <b>Saturday</div> 10am");
        assert!(out.contains("Open house"));
        assert!(out.contains("10am"));
    }

    #[test]
    fn test_prompt_text_includes_subject() {
        let email = NormalizedEmail::new("Hackathon kickoff", "Friday 3pm at the Student Union");
        let text = email.prompt_text(3000);
        assert!(text.starts_with("Subject: Hackathon kickoff\n"));
        assert!(text.contains("Student Union"));
    }

    #[test]
    fn test_prompt_text_truncates_at_char_boundary() {
        let email = NormalizedEmail::new("", "héllo héllo héllo");
        let text = email.prompt_text(12);
        assert_eq!(text.chars().count(), 12);
    }

    #[test]
    fn test_prompt_text_short_input_untouched() {
        let email = NormalizedEmail::new("Hi", "short body");
        assert_eq!(email.prompt_text(10_000), "Subject: Hi\nshort body");
    }
}
