//! Feedback business logic - routing, validation and message composition.
//!
//! Everything here is framework-agnostic: guild and channel ids are plain `u64`s and the
//! relayed message is plain text. The Discord layer converts to serenity types at the edge.

use std::fmt;

/// Longest accepted feedback text, counted in characters.
pub const MAX_TEXT_LEN: usize = 1800;

/// First line of every relayed message.
pub const PREAMBLE: &str = "Anonymous message received:";

/// Private reply sent to the invoker once the message has been relayed.
pub const ACKNOWLEDGEMENT: &str = "Your message has been sent anonymously to the team.";

/// Which of the two recognized guilds an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuildKind {
    /// The public community server
    Public,
    /// The private server used for bot development
    Private,
}

impl fmt::Display for GuildKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => f.write_str("public"),
            Self::Private => f.write_str("private"),
        }
    }
}

/// The two recognized guilds and the feedback channel that belongs to each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackRouting {
    /// Public guild id
    pub public_guild: u64,
    /// Private (testing) guild id
    pub private_guild: u64,
    /// Feedback channel in the public guild
    pub public_channel: u64,
    /// Feedback channel in the private guild
    pub private_channel: u64,
}

impl FeedbackRouting {
    /// Classifies a guild id, returning `None` for any guild the bot does not serve.
    #[must_use]
    pub const fn classify(&self, guild_id: u64) -> Option<GuildKind> {
        if guild_id == self.public_guild {
            Some(GuildKind::Public)
        } else if guild_id == self.private_guild {
            Some(GuildKind::Private)
        } else {
            None
        }
    }

    /// Returns the feedback channel for a guild, or `None` if the guild is not recognized.
    #[must_use]
    pub const fn channel_for(&self, guild_id: u64) -> Option<u64> {
        match self.classify(guild_id) {
            Some(GuildKind::Public) => Some(self.public_channel),
            Some(GuildKind::Private) => Some(self.private_channel),
            None => None,
        }
    }
}

/// Why a submission was refused. The `Display` text is what the invoker sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Text longer than [`MAX_TEXT_LEN`] characters
    TooLong {
        /// Character count of the refused text
        length: usize,
    },
    /// An attachment option was supplied but could not be resolved to a file
    UnresolvedAttachment,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong { .. } => write!(
                f,
                "Your message exceeds the maximum allowed {MAX_TEXT_LEN} characters."
            ),
            Self::UnresolvedAttachment => f.write_str(
                "Your attachment could not be read, so your message was not sent. Please try again.",
            ),
        }
    }
}

/// A validated feedback submission, ready to be relayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    text: String,
    attachment_url: Option<String>,
}

impl Submission {
    /// Validates the submitted text and pairs it with the resolved attachment URL.
    ///
    /// # Errors
    /// Returns [`Rejection::TooLong`] when the text exceeds [`MAX_TEXT_LEN`] characters.
    pub fn new(text: String, attachment_url: Option<String>) -> Result<Self, Rejection> {
        let length = text.chars().count();
        if length > MAX_TEXT_LEN {
            return Err(Rejection::TooLong { length });
        }
        Ok(Self {
            text,
            attachment_url: attachment_url.filter(|url| !url.is_empty()),
        })
    }

    /// The submitted text, unchanged.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The attachment URL, if one was supplied.
    #[must_use]
    pub fn attachment_url(&self) -> Option<&str> {
        self.attachment_url.as_deref()
    }

    /// Builds the relayed message body. Nothing about the submitter is included.
    #[must_use]
    pub fn compose(&self) -> String {
        let mut body = format!("{PREAMBLE}\n> {}", self.text);
        if let Some(url) = &self.attachment_url {
            body.push_str("\nAttachment: ");
            body.push_str(url);
        }
        body
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_classify_recognized_guilds() {
        let routing = sample_routing();
        assert_eq!(routing.classify(PUBLIC_GUILD), Some(GuildKind::Public));
        assert_eq!(routing.classify(PRIVATE_GUILD), Some(GuildKind::Private));
    }

    #[test]
    fn test_unrecognized_guilds_are_ignored() {
        let routing = sample_routing();
        for guild_id in [0, 1, PUBLIC_CHANNEL, PRIVATE_CHANNEL, u64::MAX] {
            assert_eq!(routing.classify(guild_id), None);
            assert_eq!(routing.channel_for(guild_id), None);
        }
    }

    #[test]
    fn test_channel_selection_follows_guild() {
        let routing = sample_routing();
        assert_eq!(routing.channel_for(PUBLIC_GUILD), Some(PUBLIC_CHANNEL));
        assert_eq!(routing.channel_for(PRIVATE_GUILD), Some(PRIVATE_CHANNEL));
    }

    #[test]
    fn test_text_at_limit_is_accepted() {
        let text = "a".repeat(MAX_TEXT_LEN);
        let submission = Submission::new(text.clone(), None).unwrap();
        assert_eq!(submission.text(), text);
    }

    #[test]
    fn test_text_over_limit_is_rejected() {
        let text = "a".repeat(MAX_TEXT_LEN + 1);
        let rejection = Submission::new(text, None).unwrap_err();
        assert_eq!(
            rejection,
            Rejection::TooLong {
                length: MAX_TEXT_LEN + 1
            }
        );
        assert_eq!(
            rejection.to_string(),
            "Your message exceeds the maximum allowed 1800 characters."
        );
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        // 1800 two-byte characters is 3600 bytes but still within the limit
        let text = "é".repeat(MAX_TEXT_LEN);
        assert!(Submission::new(text, None).is_ok());
    }

    #[test]
    fn test_compose_without_attachment() {
        let submission = Submission::new("The queue is too slow".to_string(), None).unwrap();
        assert_eq!(
            submission.compose(),
            "Anonymous message received:\n> The queue is too slow"
        );
        assert!(!submission.compose().contains("Attachment:"));
    }

    #[test]
    fn test_compose_with_attachment() {
        let submission = Submission::new(
            "See screenshot".to_string(),
            Some("https://cdn.example.com/shot.png".to_string()),
        )
        .unwrap();
        assert_eq!(
            submission.compose(),
            "Anonymous message received:\n> See screenshot\nAttachment: https://cdn.example.com/shot.png"
        );
    }

    #[test]
    fn test_empty_attachment_url_is_dropped() {
        let submission = Submission::new("hi".to_string(), Some(String::new())).unwrap();
        assert_eq!(submission.attachment_url(), None);
        assert!(!submission.compose().contains("Attachment:"));
    }

    #[test]
    fn test_text_is_relayed_verbatim() {
        let text = "@everyone <@123> **bold** test";
        let submission = Submission::new(text.to_string(), None).unwrap();
        assert!(submission.compose().ends_with(text));
    }
}
