//! Element list rendering

use serde::{Deserialize, Serialize};

use crate::entities::Span;
use crate::value_objects::{MentionTarget, TextRange};

/// One run of the rendered draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DraftElement {
    Text {
        text: String,
    },
    Mention {
        text: String,
        range: TextRange,
        target: MentionTarget,
    },
}

impl DraftElement {
    pub fn text(&self) -> &str {
        match self {
            Self::Text { text } | Self::Mention { text, .. } => text,
        }
    }

    pub fn is_mention(&self) -> bool {
        matches!(self, Self::Mention { .. })
    }
}

/// Split `text` into text and mention runs ordered by offset.
///
/// Spans may come in any order. Empty text runs are omitted.
pub fn elements(text: &str, spans: &[Span]) -> Vec<DraftElement> {
    let mut ordered: Vec<&Span> = spans.iter().collect();
    ordered.sort_by_key(|span| span.start());

    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::with_capacity(ordered.len() * 2 + 1);
    let mut cursor = 0;

    for span in ordered {
        let end = span.end().min(chars.len());
        if span.start() < cursor || span.start() >= end {
            continue;
        }
        if span.start() > cursor {
            out.push(DraftElement::Text {
                text: chars[cursor..span.start()].iter().collect(),
            });
        }
        out.push(DraftElement::Mention {
            text: chars[span.start()..end].iter().collect(),
            range: span.range,
            target: span.target.clone(),
        });
        cursor = end;
    }

    if cursor < chars.len() {
        out.push(DraftElement::Text {
            text: chars[cursor..].iter().collect(),
        });
    }

    out
}
