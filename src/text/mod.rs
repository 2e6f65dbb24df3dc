//! Pure string helpers shared by the response parsers.

use std::sync::LazyLock;

use html_escape::decode_html_entities;
use regex::Regex;

pub const ELLIPSIS: &str = "…";

/// Reduce markup to its visible text.
///
/// Tags are dropped and `<script>`/`<style>` bodies are removed. A `<` that
/// does not open a tag is kept as text. Entities are decoded and runs of
/// whitespace collapse to a single space.
pub fn strip_html(html: &str) -> String {
    static INVISIBLE_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>").expect("valid regex")
    });

    let visible = INVISIBLE_RE.replace_all(html, " ");

    let mut text = String::with_capacity(visible.len());
    let mut in_tag = false;
    let mut chars = visible.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '<' if !in_tag && chars.peek().is_some_and(|&n| opens_tag(n)) => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    decode_html_entities(&text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// A bare `<` in text such as `<50ms` or `1 < 2` is not markup.
fn opens_tag(next: char) -> bool {
    next.is_ascii_alphabetic() || matches!(next, '/' | '!' | '?')
}

/// `src` attribute of the first `<img>` in the markup.
pub fn first_image_src(html: &str) -> Option<String> {
    static IMG_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r#"(?i)<img\b[^>]*?\bsrc\s*=\s*["']([^"']+)["']"#).expect("valid regex")
    });

    IMG_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| decode_html_entities(m.as_str()).to_string())
}

pub fn truncate(text: &str, max_len: usize) -> String {
    truncate_with(text, max_len, ELLIPSIS)
}

/// Shorten `text` to roughly `max_len` characters without splitting a word.
///
/// Text shorter than `max_len` comes back untouched. Otherwise the cut is
/// placed before the last word that reaches into the first `max_len`
/// characters, and `ellipsis` is appended. The kept prefix never exceeds
/// `max_len` characters.
pub fn truncate_with(text: &str, max_len: usize, ellipsis: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() || chars.len() < max_len {
        return text.to_string();
    }

    let prefix = &chars[..max_len];
    let word_run = prefix.iter().rev().take_while(|c| is_word_char(**c)).count();
    let gap_run = prefix[..max_len - word_run]
        .iter()
        .rev()
        .take_while(|c| !is_word_char(**c))
        .count();

    let mut last = (max_len - word_run - gap_run) as isize;
    if let Some(&c) = chars.get(last as usize) {
        if c.is_whitespace() || matches!(c, '(' | '[' | '{') {
            last -= 1;
        }
    }

    let kept: String = if last > 0 {
        chars[..=last as usize].iter().collect()
    } else {
        String::new()
    };

    format!("{kept}{ellipsis}")
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
