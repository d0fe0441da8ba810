//! Markup and text helpers

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref COMMENT: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();
    static ref TAG: Regex = Regex::new(r"(?s)</?[a-zA-Z!][^>]*>").unwrap();
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Remove comments and tags, keeping text content (entities are left as-is)
pub fn strip_tags(html: &str) -> String {
    let without_comments = COMMENT.replace_all(html, "");
    TAG.replace_all(&without_comments, "").into_owned()
}

/// First `length` characters of `s`
pub fn take_chars(s: &str, length: usize) -> String {
    s.chars().take(length).collect()
}

/// Social description: the first `length` characters of the tag-stripped body
pub fn meta_description(html: &str, length: usize) -> String {
    take_chars(&strip_tags(html), length)
}

/// Plain-text preview cut at a word boundary, with an ellipsis when shortened
pub fn excerpt_text(html: &str, length: usize) -> String {
    let text = strip_tags(html);
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if text.chars().count() <= length {
        return text;
    }

    let mut excerpt = String::new();
    for word in text.split(' ') {
        let needed = if excerpt.is_empty() { 0 } else { 1 } + word.chars().count();
        if excerpt.chars().count() + needed > length {
            break;
        }
        if !excerpt.is_empty() {
            excerpt.push(' ');
        }
        excerpt.push_str(word);
    }
    if excerpt.is_empty() {
        excerpt = take_chars(&text, length);
    }
    excerpt.push('…');
    excerpt
}

/// Count words in HTML content; each CJK ideograph counts as a word
pub fn count_words(html: &str) -> usize {
    let text = strip_tags(html);
    let mut count = 0;
    let mut in_word = false;

    for c in text.chars() {
        if ('\u{4E00}'..='\u{9FFF}').contains(&c) {
            count += 1;
            in_word = false;
        } else if c.is_alphanumeric() || c == '\'' {
            if !in_word {
                in_word = true;
                count += 1;
            }
        } else {
            in_word = false;
        }
    }

    count
}

/// `"3 min read"`
pub fn reading_time(html: &str, words_per_minute: usize) -> String {
    let words = count_words(html);
    let minutes = words.div_ceil(words_per_minute.max(1));
    format!("{} min read", minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<p>Hello <b>World</b></p>"), "Hello World");
        assert_eq!(strip_tags("a<!-- more -->b"), "ab");
        assert_eq!(strip_tags("1 < 2 and 3 > 2"), "1 < 2 and 3 > 2");
        assert_eq!(
            strip_tags("<a href=\"/x\"\n class=\"y\">link</a>"),
            "link"
        );
    }

    #[test]
    fn test_meta_description_is_exact_prefix() {
        let body: String = "word ".repeat(100);
        let html = format!("<p><em>{}</em></p>", body);
        let description = meta_description(&html, 200);
        assert_eq!(description.chars().count(), 200);
        assert_eq!(description, body.chars().take(200).collect::<String>());
    }

    #[test]
    fn test_meta_description_short_body() {
        assert_eq!(meta_description("<p>Short</p>", 200), "Short");
    }

    #[test]
    fn test_meta_description_counts_chars_not_bytes() {
        let html = "<p>émulateur</p>";
        assert_eq!(meta_description(html, 3), "ému");
    }

    #[test]
    fn test_excerpt_text() {
        let html = "<p>The quick brown fox jumps over the lazy dog</p>";
        assert_eq!(excerpt_text(html, 100), "The quick brown fox jumps over the lazy dog");
        assert_eq!(excerpt_text(html, 15), "The quick brown…");
    }

    #[test]
    fn test_reading_time() {
        let html = format!("<p>{}</p>", "word ".repeat(450));
        assert_eq!(count_words(&html), 450);
        assert_eq!(reading_time(&html, 200), "3 min read");
        assert_eq!(reading_time("", 200), "0 min read");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<a & 'b'>"), "&lt;a &amp; &#39;b&#39;&gt;");
    }
}
