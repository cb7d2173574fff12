//! Outgoing relay message construction.

use crate::core::feedback::Submission;
use poise::serenity_prelude as serenity;

/// Mention settings for relayed messages: nothing in the text may ping anyone.
#[must_use]
pub fn no_mentions() -> serenity::CreateAllowedMentions {
    serenity::CreateAllowedMentions::new()
        .all_users(false)
        .all_roles(false)
        .everyone(false)
        .replied_user(false)
}

/// Builds the message posted to the feedback channel for `submission`.
#[must_use]
pub fn relay_message(submission: &Submission) -> serenity::CreateMessage {
    serenity::CreateMessage::new()
        .content(submission.compose())
        .allowed_mentions(no_mentions())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use serde_json::{Value, json};

    fn serialized(text: &str, attachment: Option<&str>) -> Value {
        let submission =
            Submission::new(text.to_string(), attachment.map(ToString::to_string)).unwrap();
        serde_json::to_value(relay_message(&submission)).unwrap()
    }

    #[test]
    fn test_relay_content_matches_composed_text() {
        let value = serialized("Please add more cube drafts", None);
        assert_eq!(
            value["content"],
            json!("Anonymous message received:\n> Please add more cube drafts")
        );
    }

    #[test]
    fn test_mentions_are_suppressed() {
        let value = serialized("@everyone @here <@1234> <@&5678> test", None);
        let mentions = &value["allowed_mentions"];
        assert_eq!(mentions["parse"], json!([]));
        assert_eq!(mentions["users"], json!([]));
        assert_eq!(mentions["roles"], json!([]));
        assert_eq!(mentions["replied_user"], json!(false));
    }

    #[test]
    fn test_attachment_line_is_appended() {
        let value = serialized("log attached", Some("https://cdn.example.com/game.log"));
        let content = value["content"].as_str().unwrap();
        assert!(content.ends_with("\nAttachment: https://cdn.example.com/game.log"));
    }
}
