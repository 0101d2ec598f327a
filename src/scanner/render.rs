//! HTML renderer
//!
//! Turns an `AnalysisResult` into the markup the highlighter page shows.
//! Detection never depends on this module; it only reads segments and
//! summary lists.

use serde::{Deserialize, Serialize};

use super::types::{AnalysisResult, LabeledSegment};

pub const EMPTY_INPUT_PLACEHOLDER: &str = r#"<p class="placeholder">분석할 텍스트가 없습니다.</p>"#;
pub const NO_HIGHLIGHTS_PLACEHOLDER: &str =
    r#"<p class="placeholder">문맥 강조 또는 반복된 항목이 없습니다.</p>"#;
const EMPTY_LIST_PLACEHOLDER: &str = r#"<p class="placeholder">없음</p>"#;

/// Markup for each view of the page
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderedHtml {
    pub highlighted: String,
    pub summary: String,
    pub emphasis_list: String,
    pub repeat_list: String,
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
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

/// Render every view. Empty input gets the placeholder and blank summaries.
pub fn render(text: &str, result: &AnalysisResult) -> RenderedHtml {
    if result.is_empty {
        return RenderedHtml {
            highlighted: EMPTY_INPUT_PLACEHOLDER.to_string(),
            ..RenderedHtml::default()
        };
    }

    RenderedHtml {
        highlighted: render_highlighted(text, &result.segments),
        summary: render_summary(result),
        emphasis_list: render_list("문맥상 강조 문장", &result.emphasis_items),
        repeat_list: render_list("반복된 항목", &result.repeated_items),
    }
}

/// Annotated copy of the text
pub fn render_highlighted(text: &str, segments: &[LabeledSegment]) -> String {
    if !segments.iter().any(LabeledSegment::is_labeled) {
        return NO_HIGHLIGHTS_PLACEHOLDER.to_string();
    }

    let mut html = String::with_capacity(text.len() * 2);
    for segment in segments {
        let content = escape_html(segment.text(text));
        match segment.primary_category() {
            None => html.push_str(&content),
            Some(category) => {
                let tooltip = escape_html(&segment.labels.join(", "));
                html.push_str(&format!(
                    r#"<span class="highlight {}" title="{}">{}</span>"#,
                    category.as_str(),
                    tooltip,
                    content
                ));
            }
        }
    }
    html
}

pub fn render_summary(result: &AnalysisResult) -> String {
    format!(
        concat!(
            "<h3>통계</h3>",
            r#"<div><span class="tag">강조</span> {}</div>"#,
            r#"<div><span class="tag">문맥 강조</span> {}</div>"#,
            r#"<div><span class="tag">반복</span> {}</div>"#,
        ),
        result.counts.emphasis, result.counts.context, result.counts.repeat
    )
}

pub fn render_list(title: &str, items: &[String]) -> String {
    let body = if items.is_empty() {
        EMPTY_LIST_PLACEHOLDER.to_string()
    } else {
        let entries: String = items
            .iter()
            .map(|item| format!("<li>{}</li>", escape_html(item)))
            .collect();
        format!("<ul>{}</ul>", entries)
    };
    format!("<h3>{}</h3>{}", escape_html(title), body)
}

// =============================================================================
// Tests
// =============================================================================
