/// Comment extraction from the YouTube watch page DOM
use wasm_bindgen::JsCast;
use web_sys::Document;

use crate::comment::{Comment, ANONYMOUS_AUTHOR};

/// YouTube selectors (current as of the 2025 comment markup).
pub mod selectors {
    /// Container element for one rendered comment.
    pub const COMMENT_CONTAINER: &str = "ytd-comment-view-model";
    /// Comment body inside a container.
    pub const TEXT_ELEMENT: &str = "#content-text";
    /// Author name inside a container.
    pub const AUTHOR_ELEMENT: &str = "#author-text span";
    /// Comments section anchor, used to check we are on a watch page at all.
    pub const COMMENTS_SECTION: &str = "ytd-comments#comments";
}

/// Build one comment record from raw element content.
///
/// Rules:
/// - text is trimmed; an empty result means no record at all
/// - a missing author falls back to `Anonymous`
/// - the id is derived from the element position and a timestamp, so it is
///   only unique within one extraction pass
pub fn materialize(
    index: usize,
    timestamp_ms: u64,
    text: Option<&str>,
    author: Option<&str>,
) -> Option<Comment> {
    let text = text.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return None;
    }

    let author = author
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or(ANONYMOUS_AUTHOR);

    Some(Comment::new(
        format!("comment-{}-{}", index, timestamp_ms),
        text.to_string(),
        author.to_string(),
    ))
}

/// Normalize a batch of raw (text, author) pairs in document order.
pub fn materialize_all(
    timestamp_ms: u64,
    raw: &[(Option<&str>, Option<&str>)],
) -> Vec<Comment> {
    raw.iter()
        .enumerate()
        .filter_map(|(index, (text, author))| materialize(index, timestamp_ms, *text, *author))
        .collect()
}

/// Scan the live DOM for visible comments, in document order.
///
/// Returns an empty list when the comments section anchor is absent (not on a
/// relevant page). Per-element failures skip that element only.
pub fn scan(document: &Document) -> Vec<Comment> {
    if document
        .query_selector(selectors::COMMENTS_SECTION)
        .ok()
        .flatten()
        .is_none()
    {
        log::info!("comments section not found, skipping scan");
        return Vec::new();
    }

    let containers = match document.query_selector_all(selectors::COMMENT_CONTAINER) {
        Ok(list) => list,
        Err(_) => return Vec::new(),
    };
    log::info!(
        "{} elements found with {}",
        containers.length(),
        selectors::COMMENT_CONTAINER
    );

    let timestamp_ms = js_sys::Date::now() as u64;
    let mut comments = Vec::new();

    for index in 0..containers.length() {
        let Some(node) = containers.item(index) else {
            continue;
        };
        let Ok(container) = node.dyn_into::<web_sys::Element>() else {
            continue;
        };

        let text = container
            .query_selector(selectors::TEXT_ELEMENT)
            .ok()
            .flatten()
            .and_then(|el| el.text_content());
        let author = container
            .query_selector(selectors::AUTHOR_ELEMENT)
            .ok()
            .flatten()
            .and_then(|el| el.text_content());

        if let Some(comment) = materialize(
            index as usize,
            timestamp_ms,
            text.as_deref(),
            author.as_deref(),
        ) {
            comments.push(comment);
        }
    }

    log::info!("extraction finished: {} comments", comments.len());
    comments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_materialize_basic() {
        let comment = materialize(0, 1700000000000, Some("Great video!"), Some("Alice")).unwrap();
        assert_eq!(comment.text, "Great video!");
        assert_eq!(comment.author, "Alice");
        assert_eq!(comment.id, "comment-0-1700000000000");
    }

    #[test]
    fn test_materialize_trims_whitespace() {
        let comment = materialize(3, 42, Some("  Nice \n"), Some(" Bob ")).unwrap();
        assert_eq!(comment.text, "Nice");
        assert_eq!(comment.author, "Bob");
    }

    #[test]
    fn test_materialize_drops_empty_text() {
        assert!(materialize(0, 42, Some(""), Some("Alice")).is_none());
        assert!(materialize(0, 42, Some("   \n\t"), Some("Alice")).is_none());
        assert!(materialize(0, 42, None, Some("Alice")).is_none());
    }

    #[test]
    fn test_materialize_missing_author_defaults_to_anonymous() {
        let comment = materialize(0, 42, Some("Nice"), None).unwrap();
        assert_eq!(comment.author, ANONYMOUS_AUTHOR);

        let comment = materialize(0, 42, Some("Nice"), Some("  ")).unwrap();
        assert_eq!(comment.author, ANONYMOUS_AUTHOR);
    }

    #[test]
    fn test_materialize_all_preserves_order_and_drops_empties() {
        // Three containers, the middle one has empty text.
        let raw = vec![
            (Some("Great video!"), Some("Alice")),
            (Some(""), Some("Bob")),
            (Some("Nice"), None),
        ];

        let comments = materialize_all(1700000000000, &raw);

        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].text, "Great video!");
        assert_eq!(comments[1].text, "Nice");
        assert_eq!(comments[1].author, ANONYMOUS_AUTHOR);
    }

    #[test]
    fn test_materialize_all_empty_input() {
        assert!(materialize_all(42, &[]).is_empty());
    }

    #[test]
    fn test_materialize_all_idempotent_modulo_id() {
        let raw = vec![(Some("first"), Some("A")), (Some("second"), Some("B"))];

        let pass1 = materialize_all(1, &raw);
        let pass2 = materialize_all(2, &raw);

        assert_eq!(pass1.len(), pass2.len());
        for (a, b) in pass1.iter().zip(pass2.iter()) {
            assert_eq!(a.text, b.text);
            assert_eq!(a.author, b.author);
            // ids carry the timestamp, so they legitimately differ
            assert_ne!(a.id, b.id);
        }
    }

    #[test]
    fn test_id_embeds_position() {
        let raw = vec![
            (Some("first"), Some("A")),
            (Some("second"), Some("B")),
            (Some("third"), Some("C")),
        ];

        let comments = materialize_all(99, &raw);

        assert_eq!(comments[0].id, "comment-0-99");
        assert_eq!(comments[1].id, "comment-1-99");
        assert_eq!(comments[2].id, "comment-2-99");
    }
}
