//! Presentation-independent rendering of diff segments.

use serde::{Deserialize, Serialize};

use super::cleanup::{DiffSegment, SegmentKind};

/// Highlight style for a rendered span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    /// No highlighting.
    Plain,
    /// Text added by the candidate.
    Insert,
    /// Source text the candidate dropped.
    Delete,
}

impl Highlight {
    /// CSS class used by the review page, if any.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Highlight::Plain => None,
            Highlight::Insert => Some("diff-insert"),
            Highlight::Delete => Some("diff-delete"),
        }
    }
}

/// One span of rendered markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub highlight: Highlight,
    pub text: String,
}

/// Structured markup for a highlighted diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markup {
    pub spans: Vec<Span>,
}

impl Markup {
    /// Whether there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Number of highlighted (non-plain) spans.
    pub fn change_count(&self) -> usize {
        self.spans
            .iter()
            .filter(|s| s.highlight != Highlight::Plain)
            .count()
    }

    /// Render as HTML, escaping all text.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for span in &self.spans {
            match span.highlight.css_class() {
                Some(class) => {
                    html.push_str("<span class=\"");
                    html.push_str(class);
                    html.push_str("\">");
                    push_escaped(&mut html, &span.text);
                    html.push_str("</span>");
                }
                None => push_escaped(&mut html, &span.text),
            }
        }
        html
    }
}

/// Render segments into markup. Pure; one span per segment.
pub fn render(segments: &[DiffSegment]) -> Markup {
    let spans = segments
        .iter()
        .map(|segment| Span {
            highlight: match segment.kind {
                SegmentKind::Equal => Highlight::Plain,
                SegmentKind::Inserted => Highlight::Insert,
                SegmentKind::Deleted => Highlight::Delete,
            },
            text: segment.text.clone(),
        })
        .collect();

    Markup { spans }
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
