//! Structured narrative text.
//!
//! A narrative is a run of plain and emphasised segments. Markup is only ever
//! produced at render time, with every segment escaped, so remark text taken
//! from loan records cannot inject markup.

use serde::{Deserialize, Serialize};

use crate::formatting::CurrencyFormatter;
use crate::types::{Currency, Money};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub emphasis: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Narrative {
    segments: Vec<Segment>,
}

impl Narrative {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    pub fn emphasis(mut self, text: impl Into<String>) -> Self {
        self.push_emphasis(text);
        self
    }

    /// Append plain text, merging into a trailing plain segment.
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(last) if !last.emphasis => last.text.push_str(&text),
            _ => self.segments.push(Segment {
                text,
                emphasis: false,
            }),
        }
    }

    pub fn push_emphasis(&mut self, text: impl Into<String>) {
        self.segments.push(Segment {
            text: text.into(),
            emphasis: true,
        });
    }

    pub fn append(&mut self, other: Narrative) {
        for seg in other.segments {
            if seg.emphasis {
                self.push_emphasis(seg.text);
            } else {
                self.push_text(seg.text);
            }
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn to_plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Escaped HTML; emphasised segments are wrapped in `<span>`.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for seg in &self.segments {
            if seg.emphasis {
                out.push_str("<span>");
                out.push_str(&escape_html(&seg.text));
                out.push_str("</span>");
            } else {
                out.push_str(&escape_html(&seg.text));
            }
        }
        out
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Currency formatter bound to a currency, used while composing narratives.
#[derive(Clone, Copy)]
pub struct AmountStyle<'a> {
    pub formatter: &'a dyn CurrencyFormatter,
    pub currency: &'a Currency,
}

impl<'a> AmountStyle<'a> {
    pub fn new(formatter: &'a dyn CurrencyFormatter, currency: &'a Currency) -> Self {
        Self {
            formatter,
            currency,
        }
    }

    pub fn money(&self, amount: Money) -> String {
        self.formatter.format(amount, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_adjacent_plain_text_merges() {
        let n = Narrative::new()
            .text("Disbursed: ")
            .emphasis("₹5,00,000")
            .text(".")
            .text(" Tranche 2");
        assert_eq!(
            n.segments(),
            &[
                Segment {
                    text: "Disbursed: ".into(),
                    emphasis: false
                },
                Segment {
                    text: "₹5,00,000".into(),
                    emphasis: true
                },
                Segment {
                    text: ". Tranche 2".into(),
                    emphasis: false
                },
            ]
        );
        assert_eq!(n.to_plain_text(), "Disbursed: ₹5,00,000. Tranche 2");
    }

    #[test]
    fn test_html_escapes_every_segment() {
        let n = Narrative::new()
            .text("EMI set to ")
            .emphasis("₹9,000")
            .text(". <b>bonus</b> & \"more\"");
        assert_eq!(
            n.to_html(),
            "EMI set to <span>₹9,000</span>. &lt;b&gt;bonus&lt;/b&gt; &amp; &quot;more&quot;"
        );
    }

    #[test]
    fn test_empty_text_is_skipped() {
        let n = Narrative::new().text("").emphasis("1");
        assert_eq!(n.segments().len(), 1);
        assert!(Narrative::new().is_empty());
    }
}
