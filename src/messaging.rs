/// Message protocol between the popup and the content script
use serde::{Deserialize, Serialize};

use crate::comment::Comment;

/// Runtime messages exchanged over `chrome.runtime` / `chrome.tabs`,
/// discriminated by the `action` field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action")]
pub enum Message {
    /// Pull request from the popup: extract and return the visible comments.
    #[serde(rename = "getComments")]
    GetComments,
    /// Unsolicited push from the content script after the page has loaded.
    #[serde(rename = "commentsExtracted")]
    CommentsExtracted {
        comments: Vec<Comment>,
        #[serde(rename = "videoUrl")]
        video_url: String,
        #[serde(rename = "videoTitle")]
        video_title: String,
    },
}

/// Response to a `getComments` pull request.
///
/// The shape is validated by deserialization at the boundary; a response that
/// does not parse into this struct is treated as a communication failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommentsResponse {
    pub success: bool,
    pub comments: Vec<Comment>,
    #[serde(rename = "videoUrl")]
    pub video_url: String,
    #[serde(rename = "videoTitle")]
    pub video_title: String,
}

/// True when `raw` is a YouTube video watch page URL.
pub fn is_watch_page(raw: &str) -> bool {
    let Ok(parsed) = url::Url::parse(raw) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let is_youtube = host == "youtube.com" || host.ends_with(".youtube.com");
    is_youtube && parsed.path() == "/watch"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::Comment;

    #[test]
    fn test_get_comments_wire_shape() {
        let json = serde_json::to_string(&Message::GetComments).unwrap();
        assert_eq!(json, r#"{"action":"getComments"}"#);
    }

    #[test]
    fn test_push_message_wire_shape() {
        let message = Message::CommentsExtracted {
            comments: vec![Comment::new(
                "comment-0-1".to_string(),
                "Nice".to_string(),
                "Alice".to_string(),
            )],
            video_url: "https://www.youtube.com/watch?v=abc".to_string(),
            video_title: "Some video".to_string(),
        };

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["action"], "commentsExtracted");
        assert_eq!(value["videoUrl"], "https://www.youtube.com/watch?v=abc");
        assert_eq!(value["videoTitle"], "Some video");
        assert_eq!(value["comments"][0]["text"], "Nice");
    }

    #[test]
    fn test_response_round_trip() {
        let json = r#"{
            "success": true,
            "comments": [{"id": "comment-0-1", "text": "Nice", "author": "Alice"}],
            "videoUrl": "https://www.youtube.com/watch?v=abc",
            "videoTitle": "Some video"
        }"#;

        let response: CommentsResponse = serde_json::from_str(json).unwrap();
        assert!(response.success);
        assert_eq!(response.comments.len(), 1);
        assert_eq!(response.comments[0].author, "Alice");
    }

    #[test]
    fn test_malformed_response_is_rejected() {
        // Missing the comments field entirely.
        let json = r#"{"success": true, "videoUrl": "u", "videoTitle": "t"}"#;
        assert!(serde_json::from_str::<CommentsResponse>(json).is_err());
    }

    #[test]
    fn test_is_watch_page_accepts_watch_urls() {
        assert!(is_watch_page("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_watch_page("https://youtube.com/watch?v=abc"));
        assert!(is_watch_page("https://m.youtube.com/watch?v=abc"));
    }

    #[test]
    fn test_is_watch_page_rejects_other_urls() {
        assert!(!is_watch_page("https://www.youtube.com/"));
        assert!(!is_watch_page("https://www.youtube.com/feed/subscriptions"));
        assert!(!is_watch_page("https://www.google.com/watch?v=abc"));
        assert!(!is_watch_page("https://notyoutube.com/watch"));
        assert!(!is_watch_page("not a url"));
        assert!(!is_watch_page(""));
    }
}
