//! Line-oriented rendering of analysis reports into HTML fragments
//!
//! The hosted model answers with a constrained markdown dialect: `###`
//! headings, top-level `* **Label:**` blocks, indented `* **Key:** value`
//! pairs, two list depths, and plain prose. Each line is classified against
//! an ordered rule cascade and rewritten into a Tailwind-classed fragment;
//! lines that match no rule pass through untouched.

use once_cell::sync::Lazy;
use regex::Regex;

// Class attributes for the emitted fragments. These must stay in sync with
// the stylesheet shipped alongside the report viewer.
const HEADING_CLASSES: &str = "text-lg font-semibold text-sky-400 mt-6 mb-3 border-b border-slate-700 pb-2";
const LABEL_BLOCK_CLASSES: &str = "mt-4";
const LABEL_TEXT_CLASSES: &str = "font-semibold text-slate-100";
const KEY_VALUE_CLASSES: &str = "ml-5 text-slate-400";
const KEY_CLASSES: &str = "font-medium text-slate-300";
const QUOTED_VALUE_CLASSES: &str = "text-amber-300 not-italic";
const NESTED_ITEM_CLASSES: &str = "ml-10 list-disc text-slate-400";
const SHALLOW_ITEM_CLASSES: &str = "ml-6 list-disc text-slate-400";

static TOP_LABEL_COLON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\*\s*\*\*(.*):\*\*").unwrap());
static TOP_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\*\s*\*\*(.*)\*\*").unwrap());
static LEADING_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\*\s*").unwrap());
static KEY_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s+\*\s*\*\*(.*:)\*\*\s(.*)").unwrap());
static NESTED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+\*").unwrap());
static SHALLOW_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-\s(.+)").unwrap());

/// Classification of a single report line
///
/// Variants appear in cascade order; the first matching rule wins. `Label`
/// carries owned text because the transform strips every asterisk from the
/// line, not just the bold delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// `### ` heading; the marker is stripped (first occurrence only)
    Heading(&'a str),
    /// Top-level `* **…**` label block, with or without a trailing colon
    Label(String),
    /// Indented `* **Key:** value` pair; the key keeps its colon
    KeyValue { key: &'a str, value: &'a str },
    /// Indented `* ` list item, marker stripped and remainder trimmed
    NestedItem(&'a str),
    /// `- ` list item, everything after the marker kept as-is
    ShallowItem(&'a str),
    /// No rule matched; the line is emitted unchanged
    Verbatim(&'a str),
}

/// Classify one line of report text against the rule cascade
pub fn classify_line(line: &str) -> LineClass<'_> {
    if let Some(rest) = line.strip_prefix("### ") {
        return LineClass::Heading(rest);
    }

    if TOP_LABEL_COLON.is_match(line) || TOP_LABEL.is_match(line) {
        let stripped = LEADING_STAR.replace(line, "");
        return LineClass::Label(stripped.replace('*', ""));
    }

    if let Some(caps) = KEY_VALUE.captures(line) {
        if let (Some(key), Some(value)) = (caps.get(1), caps.get(2)) {
            return LineClass::KeyValue {
                key: key.as_str(),
                value: value.as_str(),
            };
        }
    }

    if let Some(m) = NESTED_ITEM.find(line) {
        return LineClass::NestedItem(line[m.end()..].trim());
    }

    if let Some(caps) = SHALLOW_ITEM.captures(line) {
        if let Some(rest) = caps.get(1) {
            return LineClass::ShallowItem(rest.as_str());
        }
    }

    LineClass::Verbatim(line)
}

/// Render one report line as an HTML fragment
///
/// Values quoted end-to-end (emotion evidence citations) are highlighted
/// with an `<em>` wrapper. No HTML escaping is performed; the fragment is
/// rendered by a trusted viewer.
pub fn render_line(line: &str) -> String {
    match classify_line(line) {
        LineClass::Heading(text) => {
            format!(r#"<h3 class="{}">{}</h3>"#, HEADING_CLASSES, text)
        }
        LineClass::Label(label) => format!(
            r#"<div class="{}"><strong class="{}">{}</strong></div>"#,
            LABEL_BLOCK_CLASSES, LABEL_TEXT_CLASSES, label
        ),
        LineClass::KeyValue { key, value } => {
            if value.starts_with('"') && value.ends_with('"') {
                format!(
                    r#"<p class="{}"><strong class="{}">{}</strong> <em class="{}">{}</em></p>"#,
                    KEY_VALUE_CLASSES, KEY_CLASSES, key, QUOTED_VALUE_CLASSES, value
                )
            } else {
                format!(
                    r#"<p class="{}"><strong class="{}">{}</strong> {}</p>"#,
                    KEY_VALUE_CLASSES, KEY_CLASSES, key, value
                )
            }
        }
        LineClass::NestedItem(text) => {
            format!(r#"<li class="{}">{}</li>"#, NESTED_ITEM_CLASSES, text)
        }
        LineClass::ShallowItem(text) => {
            format!(r#"<li class="{}">{}</li>"#, SHALLOW_ITEM_CLASSES, text)
        }
        LineClass::Verbatim(text) => text.to_string(),
    }
}

/// Render a whole report as a single HTML fragment
///
/// Every input line maps to exactly one fragment, in order. Fragments are
/// joined and the newlines rewritten to `<br />` so the result renders as
/// one flow.
pub fn format_report(report: &str) -> String {
    report
        .split('\n')
        .map(render_line)
        .collect::<Vec<_>>()
        .join("\n")
        .replace('\n', "<br />")
}
