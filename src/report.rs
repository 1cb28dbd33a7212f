// Generated text is carried as UntrustedMarkdown; render() is the only way to markup
use pulldown_cmark::{Options, Parser, html};
use serde::Serialize;

// markdown from the generation API, not safe to embed as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UntrustedMarkdown(String);

impl UntrustedMarkdown {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SanitizedHtml(String);

impl SanitizedHtml {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

fn is_info_string(s: &str) -> bool {
    s.trim().chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

// Drops a fence wrapping the whole text (```html, ```markdown, bare ```).
// A text that merely starts or ends with a code block is left alone.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some((info, body)) = rest.split_once('\n') else {
        return trimmed;
    };
    if !is_info_string(info) {
        return trimmed;
    }
    let Some(inner) = body.trim_end().strip_suffix("```") else {
        return trimmed;
    };
    // another fence inside means the outer ones belong to separate blocks
    if inner.lines().any(|l| l.trim_start().starts_with("```")) {
        return trimmed;
    }
    inner.trim()
}

pub fn render(markdown: &UntrustedMarkdown) -> SanitizedHtml {
    let source = strip_code_fences(markdown.as_str());

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(source, options);

    let mut raw = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut raw, parser);

    SanitizedHtml(ammonia::clean(&raw))
}
