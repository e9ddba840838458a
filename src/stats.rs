/// Sentiment tallies and bar chart geometry for the popup
use crate::comment::{Prediction, Sentiment};

/// Per-category counts over one prediction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    /// Tally counts across all predictions.
    pub fn tally(predictions: &[Prediction]) -> SentimentCounts {
        predictions
            .iter()
            .fold(SentimentCounts::default(), |mut counts, pred| {
                match pred.sentiment {
                    Sentiment::Positive => counts.positive += 1,
                    Sentiment::Neutral => counts.neutral += 1,
                    Sentiment::Negative => counts.negative += 1,
                }
                counts
            })
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    pub fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }

    /// Bar heights in pixels for the three chart bars, in positive, neutral,
    /// negative order. Heights are proportional to the largest count, with a
    /// denominator floor of 1 so an all-zero tally stays at zero height.
    pub fn bar_heights(&self, max_height: u32) -> [u32; 3] {
        let data = [self.positive, self.neutral, self.negative];
        let max = data.iter().copied().max().unwrap_or(0).max(1);
        data.map(|value| (value as f64 / max as f64 * max_height as f64) as u32)
    }
}
