//! Changelog formatting.
//!
//! Release notes arrive in a small markdown-like dialect. This module turns
//! them into a list of [`ChangelogBlock`]s that any surface can draw, plus an
//! HTML serialisation for page-based surfaces.
//!
//! Recognised constructs, applied in this order:
//!
//! - `## text` and `### text` headings
//! - `- text` bullet items (consecutive items form one list)
//! - `**bold**`, then `*italic*` over the whole line, so italic applies
//!   inside bold and may also wrap it
//! - line breaks
//!
//! Anything else is kept as literal text. The input is trusted; nothing is
//! escaped when serialising to HTML.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern is valid"));
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("italic pattern is valid"));

/// Inline content of a changelog line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
}

/// Heading depth; `##` is a section, `###` a subsection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingLevel {
    Section,
    Subsection,
}

/// One formatted block of a changelog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangelogBlock {
    Heading {
        level: HeadingLevel,
        content: Vec<Inline>,
    },
    List {
        items: Vec<Vec<Inline>>,
    },
    Line {
        content: Vec<Inline>,
    },
    Blank,
}

impl ChangelogBlock {
    const fn breaks_lines_itself(&self) -> bool {
        matches!(self, Self::Heading { .. } | Self::List { .. })
    }
}

/// Format changelog text into blocks.
///
/// Whitespace-only input produces no blocks.
pub fn format_changelog(text: &str) -> Vec<ChangelogBlock> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut blocks: Vec<ChangelogBlock> = Vec::new();
    for raw_line in text.split('\n') {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);

        if let Some(title) = non_empty_rest(line, "## ") {
            blocks.push(ChangelogBlock::Heading {
                level: HeadingLevel::Section,
                content: parse_inlines(title),
            });
        } else if let Some(title) = non_empty_rest(line, "### ") {
            blocks.push(ChangelogBlock::Heading {
                level: HeadingLevel::Subsection,
                content: parse_inlines(title),
            });
        } else if let Some(item) = non_empty_rest(line, "- ") {
            let item = parse_inlines(item);
            match blocks.last_mut() {
                Some(ChangelogBlock::List { items }) => items.push(item),
                _ => blocks.push(ChangelogBlock::List { items: vec![item] }),
            }
        } else if line.is_empty() {
            blocks.push(ChangelogBlock::Blank);
        } else {
            blocks.push(ChangelogBlock::Line {
                content: parse_inlines(line),
            });
        }
    }
    blocks
}

fn non_empty_rest<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.strip_prefix(prefix).filter(|rest| !rest.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SpanKind {
    Strong,
    Emphasis,
}

/// A styled byte range of the marker-free line text.
#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    end: usize,
    kind: SpanKind,
}

/// Parse inline markup the way ordered substitutions would: bold first,
/// then italic over the whole bold-substituted line.
///
/// An italic run may therefore wrap bold text. A run that crosses a bold
/// boundary is split at that boundary so the result stays a tree.
fn parse_inlines(line: &str) -> Vec<Inline> {
    // Pass 1: remove bold markers, remembering bold ranges.
    let mut unbolded = String::with_capacity(line.len());
    let mut bold = Vec::new();
    let mut cursor = 0;
    for caps in BOLD.captures_iter(line) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        unbolded.push_str(&line[cursor..whole.start()]);
        let start = unbolded.len();
        unbolded.push_str(inner.as_str());
        bold.push((start, unbolded.len()));
        cursor = whole.end();
    }
    unbolded.push_str(&line[cursor..]);

    // Pass 2: italic over the unbolded line, then drop its markers.
    let mut markers = Vec::new();
    let mut italic = Vec::new();
    for whole in ITALIC.find_iter(&unbolded) {
        markers.push(whole.start());
        markers.push(whole.end() - 1);
        italic.push((whole.start() + 1, whole.end() - 1));
    }
    let text: String = unbolded
        .char_indices()
        .filter(|(index, _)| markers.binary_search(index).is_err())
        .map(|(_, c)| c)
        .collect();
    let shift = |position: usize| position - markers.partition_point(|&m| m < position);

    let bold: Vec<(usize, usize)> = bold.iter().map(|&(s, e)| (shift(s), shift(e))).collect();
    let mut spans: Vec<Span> = bold
        .iter()
        .map(|&(start, end)| Span {
            start,
            end,
            kind: SpanKind::Strong,
        })
        .collect();
    for &(s, e) in &italic {
        let (start, end) = (shift(s), shift(e));
        let mut cuts: Vec<usize> = bold
            .iter()
            .filter_map(|&(bs, be)| {
                if bs < start && start < be && be < end {
                    Some(be)
                } else if start < bs && bs < end && end < be {
                    Some(bs)
                } else {
                    None
                }
            })
            .collect();
        cuts.sort_unstable();
        let mut from = start;
        for to in cuts.into_iter().chain(std::iter::once(end)) {
            if from < to {
                spans.push(Span {
                    start: from,
                    end: to,
                    kind: SpanKind::Emphasis,
                });
            }
            from = to;
        }
    }
    spans.retain(|span| span.start < span.end);
    // Outer spans first; on equal ranges bold encloses italic.
    spans.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(b.end.cmp(&a.end))
            .then(a.kind.cmp(&b.kind))
    });

    build_inlines(&text, &spans, 0, text.len())
}

/// Build the inline tree for `text[start..end]` from properly nested spans.
fn build_inlines(text: &str, spans: &[Span], start: usize, end: usize) -> Vec<Inline> {
    let mut inlines = Vec::new();
    let mut cursor = start;
    let mut index = 0;
    while index < spans.len() {
        let span = spans[index];
        push_text(&mut inlines, &text[cursor..span.start]);
        let nested = spans[index + 1..]
            .iter()
            .take_while(|inner| inner.start < span.end)
            .count();
        let children = build_inlines(
            text,
            &spans[index + 1..index + 1 + nested],
            span.start,
            span.end,
        );
        inlines.push(match span.kind {
            SpanKind::Strong => Inline::Strong(children),
            SpanKind::Emphasis => Inline::Emphasis(children),
        });
        cursor = span.end;
        index += 1 + nested;
    }
    push_text(&mut inlines, &text[cursor..end]);
    inlines
}

fn push_text(inlines: &mut Vec<Inline>, text: &str) {
    if !text.is_empty() {
        inlines.push(Inline::Text(text.to_string()));
    }
}

/// Serialise formatted blocks as an HTML fragment.
///
/// Adjacent text lines are separated by `<br>`; headings and lists break
/// lines on their own, so no `<br>` is emitted next to them. `##` and `###`
/// map to `<h5>` and `<h6>`, the two smallest valid heading levels.
pub fn blocks_to_html(blocks: &[ChangelogBlock]) -> String {
    let mut html = String::new();
    for (index, block) in blocks.iter().enumerate() {
        if index > 0 {
            let previous = &blocks[index - 1];
            if !previous.breaks_lines_itself() && !block.breaks_lines_itself() {
                html.push_str("<br>");
            }
        }
        match block {
            ChangelogBlock::Heading { level, content } => {
                let tag = match level {
                    HeadingLevel::Section => "h5",
                    HeadingLevel::Subsection => "h6",
                };
                let _ = write!(html, "<{tag}>{}</{tag}>", inlines_to_html(content));
            }
            ChangelogBlock::List { items } => {
                html.push_str("<ul>");
                for item in items {
                    let _ = write!(html, "<li>{}</li>", inlines_to_html(item));
                }
                html.push_str("</ul>");
            }
            ChangelogBlock::Line { content } => html.push_str(&inlines_to_html(content)),
            ChangelogBlock::Blank => {}
        }
    }
    html
}

/// Convenience wrapper: format and serialise in one step.
pub fn changelog_to_html(text: &str) -> String {
    blocks_to_html(&format_changelog(text))
}

fn inlines_to_html(inlines: &[Inline]) -> String {
    let mut html = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(text) => html.push_str(text),
            Inline::Strong(inner) => {
                let _ = write!(html, "<strong>{}</strong>", inlines_to_html(inner));
            }
            Inline::Emphasis(inner) => {
                let _ = write!(html, "<em>{}</em>", inlines_to_html(inner));
            }
        }
    }
    html
}

/// Flatten inline content to plain text, dropping emphasis markers.
pub fn inlines_to_plain(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text(text) => text.clone(),
            Inline::Strong(inner) | Inline::Emphasis(inner) => inlines_to_plain(inner),
        })
        .collect()
}
