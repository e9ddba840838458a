/// Data structures shared between the content script, the popup and the API
use serde::{Deserialize, Serialize};

/// Author name used when the author element cannot be read.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// One normalized YouTube comment scraped from the page.
///
/// The `id` is only unique within a single extraction pass (it is derived
/// from the element position and a timestamp).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: String,
    pub text: String,
    pub author: String,
}

impl Comment {
    pub fn new(id: String, text: String, author: String) -> Comment {
        Comment { id, text, author }
    }
}

/// Discrete sentiment class, encoded numerically on the wire:
/// positive = 1, neutral = 0, negative = -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl TryFrom<i8> for Sentiment {
    type Error = String;

    fn try_from(value: i8) -> Result<Sentiment, String> {
        match value {
            1 => Ok(Sentiment::Positive),
            0 => Ok(Sentiment::Neutral),
            -1 => Ok(Sentiment::Negative),
            other => Err(format!("invalid sentiment value: {}", other)),
        }
    }
}

impl From<Sentiment> for i8 {
    fn from(sentiment: Sentiment) -> i8 {
        match sentiment {
            Sentiment::Positive => 1,
            Sentiment::Neutral => 0,
            Sentiment::Negative => -1,
        }
    }
}

impl Sentiment {
    /// CSS class used on rendered comment entries.
    pub fn css_class(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Sentiment::Positive => "😊",
            Sentiment::Neutral => "😐",
            Sentiment::Negative => "😞",
        }
    }

    /// Localized label used in the CSV export.
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positif",
            Sentiment::Neutral => "Neutre",
            Sentiment::Negative => "Négatif",
        }
    }

    /// Fixed bar color in the stats chart.
    pub fn chart_color(&self) -> &'static str {
        match self {
            Sentiment::Positive => "#34a853",
            Sentiment::Neutral => "#fbbc04",
            Sentiment::Negative => "#ea4335",
        }
    }
}

/// Classification result for one comment, matched to it by list position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    pub sentiment: Sentiment,
    pub confidence: f64,
}

impl Prediction {
    /// Confidence formatted as a percentage with one decimal, e.g. `87.3%`.
    pub fn confidence_percent(&self) -> String {
        format!("{:.1}%", self.confidence * 100.0)
    }
}
