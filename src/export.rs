/// CSV export of classified comments
use crate::comment::{Comment, Prediction};

/// Fixed download filename for the export artifact.
pub const EXPORT_FILENAME: &str = "youtube_comments_sentiment.csv";

const CSV_HEADER: &str = "Texte,Auteur,Sentiment,Confiance";

/// Serialize (comment, prediction) pairs to CSV text.
///
/// Pairs are matched by index; extra comments without a prediction are left
/// out. Double quotes embedded in the text field are doubled so each pair
/// stays one parseable CSV record.
pub fn build_csv(comments: &[Comment], predictions: &[Prediction]) -> String {
    let mut rows = vec![CSV_HEADER.to_string()];

    for (pred, comment) in predictions.iter().zip(comments.iter()) {
        rows.push(format!(
            "\"{}\",\"{}\",\"{}\",\"{}\"",
            comment.text.replace('"', "\"\""),
            comment.author.replace('"', "\"\""),
            pred.sentiment.label(),
            pred.confidence
        ));
    }

    rows.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::Sentiment;

    fn comment(text: &str, author: &str) -> Comment {
        Comment::new("comment-0-1".to_string(), text.to_string(), author.to_string())
    }

    fn pred(sentiment: Sentiment, confidence: f64) -> Prediction {
        Prediction {
            sentiment,
            confidence,
        }
    }

    #[test]
    fn test_header_row() {
        let csv = build_csv(&[], &[]);
        assert_eq!(csv, "Texte,Auteur,Sentiment,Confiance");
    }

    #[test]
    fn test_one_row_per_pair() {
        let comments = vec![comment("Great video!", "Alice"), comment("Meh", "Bob")];
        let predictions = vec![pred(Sentiment::Positive, 0.9), pred(Sentiment::Neutral, 0.5)];

        let csv = build_csv(&comments, &predictions);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "\"Great video!\",\"Alice\",\"Positif\",\"0.9\"");
        assert_eq!(lines[2], "\"Meh\",\"Bob\",\"Neutre\",\"0.5\"");
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let comments = vec![comment("He said \"wow\" twice", "Alice")];
        let predictions = vec![pred(Sentiment::Negative, 0.4)];

        let csv = build_csv(&comments, &predictions);
        let row = csv.lines().nth(1).unwrap();

        assert_eq!(row, "\"He said \"\"wow\"\" twice\",\"Alice\",\"Négatif\",\"0.4\"");

        // The row stays one parseable CSV record: an even number of quotes
        // and exactly three unquoted separators.
        assert_eq!(row.matches('"').count() % 2, 0);
        let mut in_quotes = false;
        let mut separators = 0;
        for c in row.chars() {
            match c {
                '"' => in_quotes = !in_quotes,
                ',' if !in_quotes => separators += 1,
                _ => {}
            }
        }
        assert_eq!(separators, 3);
    }

    #[test]
    fn test_french_sentiment_labels() {
        let comments = vec![comment("a", "x"), comment("b", "y"), comment("c", "z")];
        let predictions = vec![
            pred(Sentiment::Positive, 0.9),
            pred(Sentiment::Neutral, 0.5),
            pred(Sentiment::Negative, 0.1),
        ];

        let csv = build_csv(&comments, &predictions);

        assert!(csv.contains("\"Positif\""));
        assert!(csv.contains("\"Neutre\""));
        assert!(csv.contains("\"Négatif\""));
    }

    #[test]
    fn test_pairs_matched_by_index() {
        // More comments than predictions: the unmatched tail is not exported.
        let comments = vec![comment("first", "A"), comment("second", "B")];
        let predictions = vec![pred(Sentiment::Positive, 0.8)];

        let csv = build_csv(&comments, &predictions);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("first"));
    }
}
