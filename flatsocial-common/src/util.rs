use crate::{
    content::PostContent,
    model::{Id, post::PostMarker},
};
use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_SUMMARY_LIMIT: usize = 300;
pub const DEFAULT_OMISSION: &str = "...";

const MAX_SLUG_LENGTH: usize = 60;
const SLUG_SEPARATOR: char = '-';

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct Summary {
    pub summary: Option<String>,
    pub is_show_more: bool,
}

/// Ordered rewrites turning markdown into plain text.
static MARKDOWN_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"```[^\n]*", ""),
        (r"!\[[^\]]*\]\([^)]*\)", ""),
        (r"\[([^\]]*)\]\([^)]*\)", "$1"),
        (r"<[^>]+>", ""),
        (r"(?m)^[ \t]{0,3}(?:#{1,6}|>|[-*+]|\d+\.)[ \t]+", ""),
        (r"`([^`\n]*)`", "$1"),
        (r"\*\*(\S(?:.*?\S)?)\*\*", "$1"),
        (r"\*(\S(?:.*?\S)?)\*", "$1"),
        (r"~~(\S(?:.*?\S)?)~~", "$1"),
        (r"(^|\W)__(\S(?:.*?\S)?)__(\W|$)", "$1$2$3"),
        (r"(^|\W)_(\S(?:.*?\S)?)_(\W|$)", "$1$2$3"),
        (r"(^|\s)[*_~]+(\s|$)", "$1$2"),
        (r"\s+", " "),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("Markdown rule is a valid regex"),
            replacement,
        )
    })
    .collect()
});

#[must_use]
pub fn markdown_to_text(markdown: &str) -> String {
    let text = MARKDOWN_RULES
        .iter()
        .fold(markdown.to_owned(), |text, (regex, replacement)| {
            regex.replace_all(&text, *replacement).into_owned()
        });
    text.trim().to_owned()
}

/// Cuts `text` down to at most `limit` characters plus `omission`, preferring a word
/// boundary.
#[must_use]
pub fn summarize(text: &str, limit: usize, omission: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= limit {
        return text.to_owned();
    }

    let cut = text
        .char_indices()
        .nth(limit)
        .map_or(text.len(), |(index, _)| index);
    let head = &text[..cut];
    let head = match head.rfind(char::is_whitespace) {
        Some(boundary) if boundary > 0 => &head[..boundary],
        _ => head,
    };
    let head = head.trim_end_matches(|c: char| c.is_whitespace() || ",.;:!?-".contains(c));

    format!("{head}{omission}")
}

#[must_use]
pub fn summarize_md(markdown: &str) -> Summary {
    let text = markdown_to_text(markdown);
    if text.is_empty() {
        return Summary::default();
    }

    Summary {
        summary: Some(summarize(&text, DEFAULT_SUMMARY_LIMIT, DEFAULT_OMISSION)),
        is_show_more: text.chars().count() > DEFAULT_SUMMARY_LIMIT,
    }
}

#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars().filter(|c| *c != '\'') {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with(SLUG_SEPARATOR) {
            slug.push(SLUG_SEPARATOR);
        }
    }
    slug.trim_end_matches(SLUG_SEPARATOR).to_owned()
}

/// Slug of the post's title (or body when it has none), ending in the post id.
#[must_use]
pub fn create_post_slug(post_id: Id<PostMarker>, content: Option<&PostContent>) -> String {
    let title_or_body = content.and_then(|content| {
        content
            .title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .or(content.body.as_deref())
    });

    let slug = title_or_body
        .map(|text| slugify(&summarize(&markdown_to_text(text), MAX_SLUG_LENGTH, "")))
        .unwrap_or_default();

    if slug.is_empty() {
        post_id.to_string()
    } else {
        format!("{slug}{SLUG_SEPARATOR}{post_id}")
    }
}

#[must_use]
pub fn get_post_id_from_slug(slug: &str) -> Option<Id<PostMarker>> {
    slug.rsplit(SLUG_SEPARATOR).next()?.parse().ok()
}
